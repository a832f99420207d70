pub mod identifier;
pub mod password;
pub mod strength;

pub use identifier::{validate_identifier, validate_password_history_input};
pub use password::{validate_password, CharacterClass, PasswordPolicy, COMMON_PASSWORDS};
pub use strength::{password_strength, passwords_match, PasswordStrength, StrengthLevel};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    IdentifierEmpty,
    UserIdEmpty,
    PasswordHashEmpty,
    PasswordEmpty,
    PasswordTooShort(usize),
    PasswordTooLong(usize),
    PasswordMissingUppercase,
    PasswordMissingLowercase,
    PasswordMissingDigit,
    PasswordMissingSpecial,
    PasswordCommon,
    PasswordCustom(String),
    InvalidRequestBody(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdentifierEmpty => write!(f, "Identifier is required"),
            Self::UserIdEmpty => write!(f, "userId is required"),
            Self::PasswordHashEmpty => write!(f, "newPasswordHash is required"),
            Self::PasswordEmpty => write!(f, "Password cannot be empty"),
            Self::PasswordTooShort(min) => {
                write!(f, "Password must be at least {min} characters")
            }
            Self::PasswordTooLong(max) => {
                write!(f, "Password is too long (max {max} characters)")
            }
            Self::PasswordMissingUppercase => {
                write!(f, "Must include at least one uppercase letter")
            }
            Self::PasswordMissingLowercase => {
                write!(f, "Must include at least one lowercase letter")
            }
            Self::PasswordMissingDigit => write!(f, "Must include at least one digit"),
            Self::PasswordMissingSpecial => {
                write!(f, "Must include at least one special character")
            }
            Self::PasswordCommon => write!(f, "Password is too common. Choose a unique password"),
            Self::PasswordCustom(msg) | Self::InvalidRequestBody(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ValidationError {}
