//! `no_std` / `std` compatible re-exports, matching the teacher crate's
//! convention of a single place that switches between `alloc` and `std`.

#[cfg(not(feature = "std"))]
pub use alloc::{
    string::{String, ToString},
    vec::Vec,
};

#[cfg(feature = "std")]
pub use std::{
    string::{String, ToString},
    vec::Vec,
};
