use crate::Strategy;

/// Configuration for [`Page`]
///
/// [`Page`]: struct.Page.html
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Size of the page in bytes.
    /// Fixed for the whole lifetime of the page.
    pub size: u32,

    /// Strategy used to pick free block for each allocation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub strategy: Strategy,
}

impl Config {
    /// Returns configuration for page of `size` bytes
    /// using default strategy.
    pub fn new(size: u32) -> Self {
        Config {
            size,
            strategy: Strategy::default(),
        }
    }

    /// Returns configuration for page of `size` bytes
    /// using `BestFit` strategy.
    /// Suitable for long living allocations of mixed sizes.
    pub fn best_fit(size: u32) -> Self {
        Config {
            size,
            strategy: Strategy::BestFit,
        }
    }
}
