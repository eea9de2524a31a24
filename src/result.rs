use crate::error::Error as PostErr;

/// Result type returned throughout the crate.
pub type Result<T> = std::result::Result<T, PostErr>;
