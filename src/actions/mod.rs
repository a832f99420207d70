pub mod check_rate_limit;
pub mod validate_password;

pub use check_rate_limit::{minutes_until, CheckRateLimitAction, RateLimitDecision};
pub use validate_password::{PasswordReuseDecision, ValidatePasswordAction};
