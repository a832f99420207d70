//! Password strength scoring shown next to the password field.
//!
//! The score is advisory; acceptance is decided by
//! [`PasswordPolicy`](super::PasswordPolicy).

use std::collections::HashSet;

use serde::Serialize;

use super::password::{is_common_password, CharacterClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    /// 0 to 100.
    pub score: u8,
    pub level: StrengthLevel,
    pub feedback: Vec<String>,
}

/// Scores a password out of 100.
///
/// Length is worth up to 30 points, each character class 10, and character
/// variety up to 30. Common passwords are capped at 20.
///
/// ```
/// use carelock::validators::{password_strength, StrengthLevel};
///
/// let strength = password_strength("Ward7-Supply!Room");
/// assert_eq!(strength.score, 100);
/// assert_eq!(strength.level, StrengthLevel::Strong);
/// ```
pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength {
            score: 0,
            level: StrengthLevel::Weak,
            feedback: vec!["Enter a password".to_owned()],
        };
    }

    let mut score: u8 = 0;
    let mut feedback = Vec::new();

    let length = password.chars().count();
    if length >= 12 {
        score += 30;
    } else if length >= 8 {
        score += 15;
        feedback.push("Use at least 12 characters for better security".to_owned());
    } else {
        feedback.push("Password too short - use at least 12 characters".to_owned());
    }

    for class in CharacterClass::ALL {
        if class.is_present_in(password) {
            score += 10;
        } else {
            feedback.push(class_hint(class).to_owned());
        }
    }

    let unique = password.chars().collect::<HashSet<_>>().len();
    if unique >= 10 {
        score += 30;
    } else if unique >= 6 {
        score += 15;
    } else {
        feedback.push("Use more unique characters".to_owned());
    }

    if is_common_password(password) {
        score = score.min(20);
        feedback.push("Avoid common passwords".to_owned());
    }

    let level = match score {
        70.. => StrengthLevel::Strong,
        40..=69 => StrengthLevel::Medium,
        _ => StrengthLevel::Weak,
    };

    if feedback.is_empty() {
        feedback.push("Strong password!".to_owned());
    }

    PasswordStrength {
        score,
        level,
        feedback,
    }
}

fn class_hint(class: CharacterClass) -> &'static str {
    match class {
        CharacterClass::Uppercase => "Add uppercase letters",
        CharacterClass::Lowercase => "Add lowercase letters",
        CharacterClass::Digit => "Add numbers",
        CharacterClass::Special => "Add special characters (!@#$%^&*)",
    }
}

/// True when both entries are identical and non-empty.
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    !password.is_empty() && password == confirmation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password() {
        let strength = password_strength("");
        assert_eq!(strength.score, 0);
        assert_eq!(strength.level, StrengthLevel::Weak);
        assert_eq!(strength.feedback, vec!["Enter a password".to_owned()]);
    }

    #[test]
    fn test_strong_password() {
        let strength = password_strength("Ward7-Supply!Room");
        assert_eq!(strength.score, 100);
        assert_eq!(strength.level, StrengthLevel::Strong);
        assert_eq!(strength.feedback, vec!["Strong password!".to_owned()]);
    }

    #[test]
    fn test_medium_length_password() {
        // 9 chars: 15 for length, 20 for lower + digit, 15 for 6-9 unique chars
        let strength = password_strength("abcdef123");
        assert_eq!(strength.score, 50);
        assert_eq!(strength.level, StrengthLevel::Medium);
        assert!(strength
            .feedback
            .contains(&"Use at least 12 characters for better security".to_owned()));
        assert!(strength
            .feedback
            .contains(&"Add uppercase letters".to_owned()));
        assert!(strength
            .feedback
            .contains(&"Add special characters (!@#$%^&*)".to_owned()));
    }

    #[test]
    fn test_short_repetitive_password() {
        let strength = password_strength("aaa");
        assert_eq!(strength.score, 10);
        assert_eq!(strength.level, StrengthLevel::Weak);
        assert!(strength
            .feedback
            .contains(&"Password too short - use at least 12 characters".to_owned()));
        assert!(strength
            .feedback
            .contains(&"Use more unique characters".to_owned()));
    }

    #[test]
    fn test_common_password_is_capped() {
        // "Password123" would otherwise score 15 + 30 + 30 = 75
        let strength = password_strength("Password123");
        assert_eq!(strength.score, 20);
        assert_eq!(strength.level, StrengthLevel::Weak);
        assert!(strength
            .feedback
            .contains(&"Avoid common passwords".to_owned()));
    }

    #[test]
    fn test_level_serializes_lowercase() {
        let json = serde_json::to_value(password_strength("")).unwrap();
        assert_eq!(json["level"], "weak");
    }

    #[test]
    fn test_passwords_match() {
        assert!(passwords_match("secret", "secret"));
        assert!(!passwords_match("secret", "Secret"));
        assert!(!passwords_match("", ""));
    }
}
