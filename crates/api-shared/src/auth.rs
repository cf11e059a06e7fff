/// Request header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing x-api-key header")]
    MissingKey,
    #[error("invalid API key")]
    InvalidKey,
}

/// Validates the provided API key against the key configured at startup.
///
/// When no key is configured every request is accepted.
///
/// # Errors
///
/// Returns [`AuthError::MissingKey`] if a key is configured but none was provided, and
/// [`AuthError::InvalidKey`] if the provided key does not match.
pub fn validate_api_key(provided_key: Option<&str>, expected_key: Option<&str>) -> Result<(), AuthError> {
    let Some(expected_key) = expected_key else {
        return Ok(());
    };

    match provided_key {
        None => Err(AuthError::MissingKey),
        Some(key) if key == expected_key => Ok(()),
        Some(_) => Err(AuthError::InvalidKey),
    }
}
