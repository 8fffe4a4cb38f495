//! Result type alias for Karoo
//!
//! This module provides a convenient Result type alias that uses KarooError
//! as the error type.

use super::errors::KarooError;

/// Result type alias for Karoo operations
///
/// This is a convenience type alias that uses `KarooError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use karoo::domain::result::Result;
/// use karoo::domain::errors::KarooError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(KarooError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, KarooError>;
