use crate::error::{internal::InternalError, AppError};

/// Parses a stored Discord id.
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalError(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses a message id typed by a user, accepting a bare id or a message link.
///
/// Message links end in `/<channel_id>/<message_id>`, so the last path segment is used.
///
/// # Returns
/// - `Ok(u64)` - Parsed message id
/// - `Err(AppError::Validation)` - Input is not a valid id
pub fn parse_message_id(value: &str) -> Result<u64, AppError> {
    let candidate = value.trim().rsplit('/').next().unwrap_or_default();

    candidate
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| AppError::Validation("Invalid message ID format.".to_string()))
}
