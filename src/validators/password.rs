use regex::Regex;

use super::ValidationError;

/// Passwords rejected by [`PasswordPolicy::strict`], compared case-insensitively.
pub const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "qwerty",
    "hospital",
    "admin",
    "12345678",
    "password123",
    "admin123",
    "welcome",
    "letmein",
    "monkey",
    "dragon",
    "master",
    "password1",
];

const SPECIAL_CHARS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

/// A group of characters a password can be required to contain.
///
/// Letters and digits are ASCII only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digit,
    /// One of `!@#$%^&*()_+-=[]{};':"\|,.<>/?`
    Special,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digit,
        CharacterClass::Special,
    ];

    pub fn contains(self, c: char) -> bool {
        match self {
            Self::Uppercase => c.is_ascii_uppercase(),
            Self::Lowercase => c.is_ascii_lowercase(),
            Self::Digit => c.is_ascii_digit(),
            Self::Special => SPECIAL_CHARS.contains(c),
        }
    }

    pub fn is_present_in(self, password: &str) -> bool {
        password.chars().any(|c| self.contains(c))
    }

    fn missing(self) -> ValidationError {
        match self {
            Self::Uppercase => ValidationError::PasswordMissingUppercase,
            Self::Lowercase => ValidationError::PasswordMissingLowercase,
            Self::Digit => ValidationError::PasswordMissingDigit,
            Self::Special => ValidationError::PasswordMissingSpecial,
        }
    }
}

/// Rules a plaintext password must satisfy before it is hashed and sent to
/// the reuse check.
///
/// Rules are checked in a fixed order (length, character classes, pattern,
/// blocklist) and the first failure is reported.
///
/// # Examples
///
/// ```
/// use carelock::validators::{CharacterClass, PasswordPolicy};
///
/// // 8-128 characters, nothing else
/// assert!(PasswordPolicy::default().validate("password123").is_ok());
///
/// // Staff accounts
/// let strict = PasswordPolicy::strict();
/// assert!(strict.validate("Ward7-Supply!Room").is_ok());
/// assert!(strict.validate("hospital").is_err());
///
/// let pin_pad = PasswordPolicy::new().min(6).require(CharacterClass::Digit);
/// assert!(pin_pad.validate("ward-seven").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum length in characters (default: 8)
    pub min_length: usize,
    /// Maximum length in characters (default: 128)
    pub max_length: usize,
    pub required_classes: Vec<CharacterClass>,
    pattern: Option<(Regex, String)>,
    blocklist: Vec<String>,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            required_classes: Vec::new(),
            pattern: None,
            blocklist: Vec::new(),
        }
    }
}

impl PasswordPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The policy enforced on staff accounts: at least 12 characters, every
    /// [`CharacterClass`], and none of [`COMMON_PASSWORDS`].
    #[must_use]
    pub fn strict() -> Self {
        CharacterClass::ALL
            .into_iter()
            .fold(Self::new().min(12), Self::require)
            .block_common()
    }

    #[must_use]
    pub fn min(mut self, len: usize) -> Self {
        self.min_length = len;
        self
    }

    #[must_use]
    pub fn max(mut self, len: usize) -> Self {
        self.max_length = len;
        self
    }

    #[must_use]
    pub fn require(mut self, class: CharacterClass) -> Self {
        if !self.required_classes.contains(&class) {
            self.required_classes.push(class);
        }
        self
    }

    /// Passwords must match `regex`; `message` is reported when they don't.
    #[must_use]
    pub fn pattern(mut self, regex: Regex, message: impl Into<String>) -> Self {
        self.pattern = Some((regex, message.into()));
        self
    }

    /// Adds [`COMMON_PASSWORDS`] to the blocklist.
    #[must_use]
    pub fn block_common(self) -> Self {
        self.block(COMMON_PASSWORDS.iter().copied())
    }

    #[must_use]
    pub fn block<I, S>(mut self, passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocklist.extend(passwords.into_iter().map(Into::into));
        self
    }

    pub fn is_blocked(&self, password: &str) -> bool {
        self.blocklist
            .iter()
            .any(|blocked| blocked.eq_ignore_ascii_case(password))
    }

    /// # Errors
    ///
    /// Returns the first rule the password breaks.
    pub fn validate(&self, password: &str) -> Result<(), ValidationError> {
        if password.is_empty() {
            return Err(ValidationError::PasswordEmpty);
        }

        let length = password.chars().count();
        if length < self.min_length {
            return Err(ValidationError::PasswordTooShort(self.min_length));
        }
        if length > self.max_length {
            return Err(ValidationError::PasswordTooLong(self.max_length));
        }

        if let Some(class) = self
            .required_classes
            .iter()
            .find(|class| !class.is_present_in(password))
        {
            return Err(class.missing());
        }

        if let Some((regex, message)) = &self.pattern {
            if !regex.is_match(password) {
                return Err(ValidationError::PasswordCustom(message.clone()));
            }
        }

        if self.is_blocked(password) {
            return Err(ValidationError::PasswordCommon);
        }

        Ok(())
    }
}

pub(crate) fn is_common_password(password: &str) -> bool {
    COMMON_PASSWORDS
        .iter()
        .any(|common| common.eq_ignore_ascii_case(password))
}

/// Validates a password using the default policy (8-128 characters).
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    PasswordPolicy::default().validate(password)
}
