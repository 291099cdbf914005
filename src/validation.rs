//! Client-side input checks run before any request is sent.

use std::path::{Path, PathBuf};

use crate::constants::MIN_PASSWORD_LEN;

/// Input rejected before reaching the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Upload submitted without a file.
    #[error("Please select a file to upload")]
    MissingFile,

    /// The selected file does not exist or is not a regular file.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A required form field is empty.
    #[error("The {0} field is required")]
    MissingField(&'static str),

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("New password and confirmation do not match")]
    PasswordMismatch,

    /// Update submitted with every field left unchanged.
    #[error("Nothing to update, pass at least one field")]
    NothingToUpdate,

    /// Reservation amount is not a positive number.
    #[error("Amount must be greater than zero")]
    InvalidAmount,
}

/// Require a non-blank value for a form field.
pub fn require_field<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(name));
    }
    Ok(trimmed)
}

/// Require that an upload form has a file selected and that it exists.
pub fn require_file(path: Option<&Path>) -> Result<&Path, ValidationError> {
    let path = path.ok_or(ValidationError::MissingFile)?;
    if !path.is_file() {
        return Err(ValidationError::FileNotFound(path.to_path_buf()));
    }
    Ok(path)
}

/// Check a new password against its confirmation.
///
/// Mismatch is reported before length so the user fixes the typo first.
pub fn check_new_password(new: &str, confirm: &str) -> Result<(), ValidationError> {
    if new != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Require a strictly positive, finite amount.
pub fn require_positive_amount(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ValidationError::InvalidAmount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field() {
        assert_eq!(require_field("title", "  Rapport  ").unwrap(), "Rapport");
        assert_eq!(
            require_field("title", "   "),
            Err(ValidationError::MissingField("title"))
        );
    }

    #[test]
    fn test_require_file_missing_selection() {
        assert_eq!(require_file(None), Err(ValidationError::MissingFile));
    }

    #[test]
    fn test_require_file_nonexistent() {
        let path = Path::new("/definitely/not/here.pdf");
        assert!(matches!(
            require_file(Some(path)),
            Err(ValidationError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_require_file_ok() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(require_file(Some(file.path())).is_ok());
    }

    #[test]
    fn test_password_mismatch_message() {
        let err = check_new_password("secret1", "secret2").unwrap_err();
        assert_eq!(err, ValidationError::PasswordMismatch);
        assert_eq!(
            err.to_string(),
            "New password and confirmation do not match"
        );
    }

    #[test]
    fn test_password_too_short() {
        let err = check_new_password("abc", "abc").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn test_password_ok() {
        assert!(check_new_password("s3cret!", "s3cret!").is_ok());
    }

    #[test]
    fn test_amount() {
        assert_eq!(require_positive_amount(1500.0), Ok(1500.0));
        assert_eq!(
            require_positive_amount(0.0),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(
            require_positive_amount(f64::NAN),
            Err(ValidationError::InvalidAmount)
        );
    }
}
