use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actions::{minutes_until, PasswordReuseDecision, RateLimitDecision};
use crate::SecretString;

// Request DTOs

/// `identifier` may be absent or null; both are rejected as a validation error.
/// An absent or null `success` counts as a failed attempt.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitRequest {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

impl RateLimitRequest {
    pub fn succeeded(&self) -> bool {
        self.success.unwrap_or(false)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePasswordRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub new_password_hash: Option<SecretString>,
}

// Response DTOs

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lockout_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RateLimitResponse {
    pub fn from_decision(decision: &RateLimitDecision, now: DateTime<Utc>) -> Self {
        match *decision {
            RateLimitDecision::Allowed {
                remaining_attempts: None,
            } => Self {
                allowed: true,
                remaining_attempts: None,
                lockout_until: None,
                message: Some("Login successful".to_owned()),
            },
            RateLimitDecision::Allowed {
                remaining_attempts: Some(remaining),
            } => Self {
                allowed: true,
                remaining_attempts: Some(remaining),
                lockout_until: None,
                message: Some(format!("Login failed. {remaining} attempts remaining.")),
            },
            RateLimitDecision::LockedOut { lockout_until } => Self {
                allowed: false,
                remaining_attempts: None,
                lockout_until: Some(lockout_until),
                message: Some(format!(
                    "Too many failed attempts. Try again in {} minutes.",
                    minutes_until(lockout_until, now)
                )),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ValidatePasswordResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<PasswordReuseDecision> for ValidatePasswordResponse {
    fn from(decision: PasswordReuseDecision) -> Self {
        let message = match decision {
            PasswordReuseDecision::Valid => "Password is valid",
            PasswordReuseDecision::Reused => {
                "This password was used recently. Please choose a different password."
            }
        };

        ValidatePasswordResponse {
            valid: decision.is_valid(),
            message: Some(message.to_owned()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<crate::AuthError> for ErrorResponse {
    fn from(err: crate::AuthError) -> Self {
        ErrorResponse {
            error: err.to_string(),
        }
    }
}
