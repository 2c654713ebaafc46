use core::fmt::{self, Display};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AllocationError {
    /// No free block in the page is large enough.
    OutOfPageMemory,

    /// Zero sized allocations are not served.
    EmptyRequest,
}

impl Display for AllocationError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationError::OutOfPageMemory => {
                fmt.write_str("Page has no free block large enough for request")
            }
            AllocationError::EmptyRequest => fmt.write_str("Requested allocation of zero bytes"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AllocationError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FreeError {
    /// Offset does not start any block allocated from this page.
    /// Covers double free as well as offsets from other pages.
    UnknownOffset,
}

impl Display for FreeError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreeError::UnknownOffset => {
                fmt.write_str("Offset does not belong to any allocated block of this page")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FreeError {}
