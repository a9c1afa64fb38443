//! `alloc` types under one path, so modules compile the same with and
//! without the `std` feature.

#[cfg(not(feature = "std"))]
pub use alloc::{
    borrow::Cow,
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
pub use std::{
    borrow::Cow,
    string::{String, ToString},
    vec::Vec,
};
