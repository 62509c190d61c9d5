//! Result type alias for Retouch

use super::errors::RetouchError;

/// Result type alias for Retouch operations
///
/// # Examples
///
/// ```
/// use retouch::domain::result::Result;
/// use retouch::domain::errors::RetouchError;
///
/// fn failing_function() -> Result<()> {
///     Err(RetouchError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RetouchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
