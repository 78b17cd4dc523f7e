//! Input validation utilities

use common::ValidationErrors;
use regex::Regex;
use std::sync::OnceLock;

use crate::models::{NewUser, RegisterForm};

/// Validate display name
pub fn validate_name(name: &str) -> Result<(), String> {
    let name = name.trim();

    if name.is_empty() {
        return Err("Name is required".to_string());
    }

    let length = name.chars().count();

    if length < 2 {
        return Err("Name must be at least 2 characters long".to_string());
    }

    if length > 100 {
        return Err("Name must be at most 100 characters long".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();

    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters long".to_string());
    }

    if !password.chars().any(char::is_alphabetic) {
        return Err("Password must contain at least one letter".to_string());
    }

    Ok(())
}

/// Validate that both password entries match
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), String> {
    if confirmation.is_empty() {
        return Err("Please confirm your password".to_string());
    }

    if password != confirmation {
        return Err("Passwords do not match".to_string());
    }

    Ok(())
}

/// Validate the whole registration form, collecting every field error
pub fn validate_registration(form: &RegisterForm) -> Result<NewUser, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check("name", validate_name(&form.name));
    errors.check("email", validate_email(&form.email));
    errors.check("password", validate_password(&form.password));
    errors.check(
        "confirmPassword",
        validate_password_confirmation(&form.password, &form.confirm_password),
    );
    errors.into_result()?;

    Ok(NewUser {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    })
}

/// Validate the login form
pub fn validate_login(identifier: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if identifier.trim().is_empty() {
        errors.add("identifier", "Email or username is required");
    }
    if password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterForm {
        RegisterForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "abc123".to_string(),
            confirm_password: "abc123".to_string(),
        }
    }

    #[test]
    fn test_name_bounds() {
        assert!(validate_name("J").is_err());
        assert!(validate_name("  J  ").is_err());
        assert!(validate_name("Jo").is_ok());
        assert!(validate_name(&"a".repeat(100)).is_ok());
        assert!(validate_name(&"a".repeat(101)).is_err());
        assert_eq!(validate_name(""), Err("Name is required".to_string()));
    }

    #[test]
    fn test_email_format() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("a@b.c").is_ok());
        assert!(validate_email("jane@example").is_err());
        assert!(validate_email("jane example@x.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("jane@@example.com").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("abcdef").is_ok());
        assert!(validate_password("12345a").is_ok());
        assert_eq!(
            validate_password("abc12"),
            Err("Password must be at least 6 characters long".to_string())
        );
        assert_eq!(
            validate_password("123456"),
            Err("Password must contain at least one letter".to_string())
        );
    }

    #[test]
    fn test_confirmation() {
        assert!(validate_password_confirmation("abc123", "abc123").is_ok());
        assert!(validate_password_confirmation("abc123", "abc124").is_err());
        assert!(validate_password_confirmation("abc123", "").is_err());
    }

    #[test]
    fn test_registration_collects_all_errors() {
        let form = RegisterForm {
            name: "J".to_string(),
            email: "not-an-email".to_string(),
            password: "123".to_string(),
            confirm_password: "321".to_string(),
        };

        let errors = validate_registration(&form).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.get("name").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
    }

    #[test]
    fn test_registration_trims_fields() {
        let mut form = form();
        form.name = "  Jane Doe ".to_string();
        form.email = " jane@example.com ".to_string();

        let new_user = validate_registration(&form).unwrap();
        assert_eq!(new_user.name, "Jane Doe");
        assert_eq!(new_user.email, "jane@example.com");
        assert_eq!(new_user.password, "abc123");
    }

    #[test]
    fn test_login_form() {
        assert!(validate_login("jane", "pw").is_ok());
        assert_eq!(validate_login(" ", "").unwrap_err().len(), 2);
    }
}
