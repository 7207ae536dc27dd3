use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Discord snowflakes are stored as strings; a row that fails to parse back into
    /// a `u64` indicates corrupted data.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Stored enum column holds a value the bot no longer recognizes.
    #[error("Unrecognized stored value '{value}' for {column}")]
    UnknownStoredValue {
        /// Column the value was read from
        column: &'static str,
        /// The stored value
        value: String,
    },

    /// Poll option list could not be decoded from its JSON column.
    #[error("Failed to decode poll options for message {message_id}: {source}")]
    PollOptions {
        /// Message the poll record belongs to
        message_id: String,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
    },
}
