//!
//! Sub-allocator for a single fixed-size memory page.
//!
//! [`Page`] hands out non-overlapping byte ranges of one memory object
//! and merges released neighbors back together.
//! It only does bookkeeping over offsets, mapping them onto real
//! memory is up to the caller.
//!

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod block;
mod config;
mod error;
mod page;

pub use self::{block::*, config::*, error::*, page::*};

/// Specifies how a page picks a free block to serve a request from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Takes first free block in list order that is large enough.
    /// Cheapest search, stops as soon as fitting block is found.
    FirstFit,

    /// Takes free block that leaves least memory unused.
    /// Scans whole free list on every allocation.
    /// Among equally good blocks the first one found wins.
    BestFit,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::FirstFit
    }
}
