//! Utility functions

mod time_ago;

pub use time_ago::time_ago;
