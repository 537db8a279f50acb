//! Export path resolution
//!
//! Builds deterministic, human-readable file names from either the
//! in-world date or the fired counter, and guarantees no capture ever
//! overwrites an existing one.

mod path;

pub use path::{resolve, NamePattern, NamingContext};
