//! Result types for the global search
//!
//! Hits are rendered in the requested language when the result set is
//! assembled; nothing here touches the store.

mod types;

pub use types::*;
