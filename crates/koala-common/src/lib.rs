//! Common utilities shared by the Koala crates.
//!
//! - **Warning System** - deduplicated, colored terminal output for
//!   unsupported input
//! - **URL helpers** - the small slice of URL handling the DOM needs

pub mod url;
pub mod warning;
