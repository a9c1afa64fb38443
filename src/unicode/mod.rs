//! Percent-encoding and IDNA helpers shared by the parser and the
//! canonicalization steps.

pub mod idna;
pub mod percent_encode;
