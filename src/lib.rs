#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod character_sets;
mod error;
mod helpers;
mod host;
mod ipv4;
mod ipv6;
mod parsed_url;
mod parser;
mod path;
mod query;
mod scheme;
mod steps;
mod surt;
mod types;
mod unicode;

mod canonicalizer;

// Public API
pub use canonicalizer::{
    Canonicalizer, Profile, Step, StepFn, aggressive, google, semantic_precise, whatwg,
};
pub use error::{Error, Result};
pub use host::{normalize_host, parse_ipv4or6, reverse_host, ssurt_host};
pub use ipv4::dotted_decimal;
pub use parsed_url::ParsedUrl;
pub use parser::parse_url;
pub use path::resolve_path_dots;
pub use types::{Host, IpAddress, SchemeType};
pub use unicode::idna::idna_label;
