//! Input format checks for registration and account updates.

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn validate_user_name(user_name: &str) -> Result<(), String> {
    if user_name.is_empty() {
        return Err("userName cannot be empty".to_string());
    }
    if user_name.len() < 3 {
        return Err("userName must be at least 3 characters".to_string());
    }
    if user_name.len() > 50 {
        return Err("userName must be less than 50 characters".to_string());
    }
    // Alphanumeric plus underscore and hyphen, starting alphanumeric
    if !user_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(
            "userName can only contain letters, numbers, underscore, and hyphen".to_string(),
        );
    }
    if !user_name.chars().next().is_some_and(|c| c.is_alphanumeric()) {
        return Err("userName must start with a letter or number".to_string());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("email cannot be empty".to_string());
    }
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err("invalid email format".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_user_names() {
        assert!(validate_user_name("marco").is_ok());
        assert!(validate_user_name("marco_42").is_ok());
        assert!(validate_user_name("m-c").is_ok());
    }

    #[test]
    fn rejects_malformed_user_names() {
        assert!(validate_user_name("").is_err());
        assert!(validate_user_name("ab").is_err());
        assert!(validate_user_name("_leading").is_err());
        assert!(validate_user_name("has space").is_err());
        assert!(validate_user_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@missing.local").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user@example.com").is_ok());
    }

    #[test]
    fn enforces_password_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
    }
}
