//! Password policy enforcement for new passwords.

use authgate_core::error::AppError;

/// Special characters a password must draw from.
const SPECIAL_CHARS: &str = "@$!%*?&";

/// Minimum password length.
const MIN_LENGTH: usize = 8;

/// Result of checking a candidate password against the policy.
#[derive(Debug, Clone)]
pub struct PolicyReport {
    /// Whether the password satisfies every rule.
    pub is_valid: bool,
    /// One entry per violated rule, empty when valid.
    pub errors: Vec<String>,
}

/// Validates password strength: at least 8 characters, containing a letter,
/// a digit, and one of `@$!%*?&`, with no characters outside that set.
#[derive(Debug, Clone, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Creates a new policy instance.
    pub fn new() -> Self {
        Self
    }

    /// Checks a password against every rule and reports all violations.
    pub fn check(&self, password: &str) -> PolicyReport {
        let mut errors = Vec::new();

        if password.chars().count() < MIN_LENGTH {
            errors.push(format!(
                "Password must be at least {MIN_LENGTH} characters long"
            ));
        }

        if !password.chars().any(|c| c.is_ascii_alphabetic()) {
            errors.push("Password must contain at least one letter".to_string());
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push("Password must contain at least one digit".to_string());
        }

        if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
            errors.push(format!(
                "Password must contain at least one special character ({SPECIAL_CHARS})"
            ));
        }

        if password
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && !SPECIAL_CHARS.contains(c))
        {
            errors.push(format!(
                "Password may only contain letters, digits, and {SPECIAL_CHARS}"
            ));
        }

        PolicyReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Validates a password, surfacing the first violation as an error.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let report = self.check(password);
        match report.errors.into_iter().next() {
            None => Ok(()),
            Some(first) => Err(AppError::validation(first)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authgate_core::error::ErrorKind;

    #[test]
    fn test_valid_password_passes() {
        let policy = PasswordPolicy::new();
        let report = policy.check("Str0ng!pass");
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
        assert!(policy.validate("Str0ng!pass").is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        let policy = PasswordPolicy::new();
        let report = policy.check("a1!");
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("8 characters")));
    }

    #[test]
    fn test_missing_character_classes_all_reported() {
        let policy = PasswordPolicy::new();
        // Letters only: missing digit and special, two violations at once.
        let report = policy.check("onlyletters");
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_disallowed_character_rejected() {
        let policy = PasswordPolicy::new();
        let report = policy.check("Str0ng!pass with spaces");
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("may only contain")));
    }

    #[test]
    fn test_validate_surfaces_validation_kind() {
        let policy = PasswordPolicy::new();
        let err = policy.validate("weak").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
