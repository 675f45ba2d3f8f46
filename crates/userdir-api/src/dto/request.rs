//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use userdir_core::error::AppError;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Given name.
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, max = 64))]
    pub last_name: String,
    /// Email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Initial password.
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
    /// Contact phone number.
    #[validate(length(min = 1, max = 32))]
    pub phone: String,
}

/// Profile update request body. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New given name.
    #[validate(length(min = 1, max = 64))]
    pub first_name: Option<String>,
    /// New family name.
    #[validate(length(min = 1, max = 64))]
    pub last_name: Option<String>,
    /// New email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    /// New phone number.
    #[validate(length(min = 1, max = 32))]
    pub phone: Option<String>,
}

/// Role change request body (admin only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    /// The new role: `admin` or `user`.
    pub role: String,
}

/// Run declarative validation, folding failures into one message that
/// names each offending field.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate()
        .map_err(|errors| AppError::validation(validation_message(&errors)))
}

fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| match field_errors.first() {
            Some(error) => match &error.message {
                Some(message) => format!("field {field} {message}"),
                None => format!("field {field} is invalid"),
            },
            None => format!("field {field} is invalid"),
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_bad_email() {
        let request = RegisterRequest {
            first_name: "Ryan".to_string(),
            last_name: "Smith".to_string(),
            email: "not-an-email".to_string(),
            password: "longenough".to_string(),
            phone: "5550100".to_string(),
        };
        let err = validate_body(&request).unwrap_err();
        assert!(err.message.contains("email"));
    }

    #[test]
    fn test_register_rejects_short_password() {
        let request = RegisterRequest {
            first_name: "Ryan".to_string(),
            last_name: "Smith".to_string(),
            email: "ryan@example.com".to_string(),
            password: "short".to_string(),
            phone: "5550100".to_string(),
        };
        let err = validate_body(&request).unwrap_err();
        assert!(err.message.contains("password"));
    }

    #[test]
    fn test_update_accepts_absent_fields() {
        let request = UpdateUserRequest {
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
        };
        assert!(validate_body(&request).is_ok());
    }
}
