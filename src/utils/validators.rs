use anyhow::{anyhow, Result};

/// Validate username (alphanumeric, hyphens, underscores, 1-80 chars to fit the column)
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() || username.len() > 80 {
        return Err(anyhow!("Username must be between 1 and 80 characters"));
    }

    // Allow alphanumeric, hyphens, and underscores
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(anyhow!(
            "Username can only contain alphanumeric characters, hyphens, and underscores"
        ));
    }

    Ok(())
}

/// Validate email shape (single @, non-empty local part, dotted domain, 120 chars max)
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() || email.len() > 120 {
        return Err(anyhow!("Email must be between 1 and 120 characters"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(anyhow!("Email must not contain whitespace"));
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(anyhow!("Email must contain exactly one @ separating local part and domain"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(anyhow!("Email domain must contain a dot"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("octocat").is_ok());
        assert!(validate_username("my-user_123").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username(&"a".repeat(81)).is_err());
        assert!(validate_username("user@example").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email("spaced user@example.com").is_err());
    }
}
