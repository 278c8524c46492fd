use crate::error::AppError;

/// Parses a snowflake id from a String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::BadRequest)` - The string is not a valid id
pub fn parse_u64_from_string(value: &str) -> Result<u64, AppError> {
    value
        .parse::<u64>()
        .map_err(|e| AppError::BadRequest(format!("Failed to parse ID from '{}': {}", value, e)))
}
