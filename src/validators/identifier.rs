use crate::SecretString;

use super::ValidationError;

/// Identifiers are opaque (email or IP) and compared byte-exactly, so the
/// only rule is that one is present. Whitespace is not trimmed.
pub fn validate_identifier(identifier: &str) -> Result<(), ValidationError> {
    if identifier.is_empty() {
        return Err(ValidationError::IdentifierEmpty);
    }

    Ok(())
}

pub fn validate_password_history_input(
    user_id: &str,
    password_hash: &SecretString,
) -> Result<(), ValidationError> {
    if user_id.is_empty() {
        return Err(ValidationError::UserIdEmpty);
    }

    if password_hash.is_empty() {
        return Err(ValidationError::PasswordHashEmpty);
    }

    Ok(())
}
