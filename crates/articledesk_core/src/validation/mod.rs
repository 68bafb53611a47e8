//! Form validation shared by every article and account form.
//!
//! # Responsibility
//! - Hold the field rules (required, email shape, password, full name,
//!   attachment size, category, date) in one place.
//! - Select the ordered rule set that applies to each form kind.
//!
//! # Invariants
//! - Validation is pure: no I/O, no clock reads beyond defaulting the date.
//! - The first failing rule wins and yields exactly one message.

mod forms;
mod rules;

pub use forms::{ArticleForm, FormInput, SignInForm, SignUpForm};
pub use rules::{
    check_attachment, is_present, is_valid_email, validate_form, Field, FormKind, Rule,
    MIN_FULL_NAME_CHARS, MIN_PASSWORD_CHARS,
};

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Local, recoverable input error. The display text is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required article field is blank.
    MissingRequiredFields,
    /// A required account field is blank.
    MissingFields,
    FullNameTooShort,
    InvalidEmail,
    PasswordTooShort,
    PasswordMismatch,
    FileTooLarge { size: u64 },
    /// Files are chosen at creation only.
    AttachmentOnCreateOnly,
    InvalidCategory(String),
    InvalidDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredFields => write!(f, "Please fill in all required fields"),
            Self::MissingFields => write!(f, "Please fill in all fields"),
            Self::FullNameTooShort => write!(
                f,
                "Full name must be at least {MIN_FULL_NAME_CHARS} characters"
            ),
            Self::InvalidEmail => write!(f, "Please enter a valid email address"),
            Self::PasswordTooShort => write!(
                f,
                "Password must be at least {MIN_PASSWORD_CHARS} characters"
            ),
            Self::PasswordMismatch => write!(f, "Passwords do not match"),
            Self::FileTooLarge { .. } => write!(f, "File size must be less than 10MB"),
            Self::AttachmentOnCreateOnly => {
                write!(f, "Files can only be attached when creating an article")
            }
            Self::InvalidCategory(_) => write!(f, "Please select a valid category"),
            Self::InvalidDate(_) => write!(f, "Please enter a valid date"),
        }
    }
}

impl Error for ValidationError {}
