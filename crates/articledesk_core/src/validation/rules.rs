//! Field rules and the per-form rule tables.

use super::forms::FormInput;
use super::ValidationError;
use crate::model::article::{Category, FileAttachment, DATE_FORMAT, MAX_ATTACHMENT_BYTES};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MIN_FULL_NAME_CHARS: usize = 2;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Named input of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Category,
    Date,
    Content,
    FullName,
    Email,
    Password,
    ConfirmPassword,
}

/// Which form is being submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    CreateArticle,
    UpdateArticle,
    SignIn,
    SignUp,
}

/// One check applied to a form, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required(&'static [Field]),
    FullNameLength,
    EmailShape,
    PasswordLength,
    PasswordConfirmation,
    KnownCategory,
    CalendarDate,
}

const ARTICLE_RULES: &[Rule] = &[
    Rule::Required(&[Field::Title, Field::Author, Field::Content]),
    Rule::KnownCategory,
    Rule::CalendarDate,
];

const SIGN_IN_RULES: &[Rule] = &[
    Rule::Required(&[Field::Email, Field::Password]),
    Rule::EmailShape,
];

const SIGN_UP_RULES: &[Rule] = &[
    Rule::Required(&[
        Field::FullName,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ]),
    Rule::FullNameLength,
    Rule::EmailShape,
    Rule::PasswordLength,
    Rule::PasswordConfirmation,
];

impl FormKind {
    /// Ordered rules for this form. Earlier rules report first.
    pub fn rules(self) -> &'static [Rule] {
        match self {
            Self::CreateArticle | Self::UpdateArticle => ARTICLE_RULES,
            Self::SignIn => SIGN_IN_RULES,
            Self::SignUp => SIGN_UP_RULES,
        }
    }

    fn missing_error(self) -> ValidationError {
        match self {
            Self::CreateArticle | Self::UpdateArticle => ValidationError::MissingRequiredFields,
            Self::SignIn | Self::SignUp => ValidationError::MissingFields,
        }
    }
}

/// Runs the rule table of `kind` against `input`.
///
/// # Errors
/// Returns the error of the first rule that fails.
pub fn validate_form(kind: FormKind, input: &impl FormInput) -> Result<(), ValidationError> {
    for rule in kind.rules() {
        check_rule(kind, *rule, input)?;
    }
    Ok(())
}

fn check_rule(kind: FormKind, rule: Rule, input: &impl FormInput) -> Result<(), ValidationError> {
    match rule {
        Rule::Required(fields) => {
            if fields.iter().all(|field| is_present(input.value(*field))) {
                Ok(())
            } else {
                Err(kind.missing_error())
            }
        }
        Rule::FullNameLength => {
            if input.value(Field::FullName).trim().chars().count() >= MIN_FULL_NAME_CHARS {
                Ok(())
            } else {
                Err(ValidationError::FullNameTooShort)
            }
        }
        Rule::EmailShape => {
            if is_valid_email(input.value(Field::Email)) {
                Ok(())
            } else {
                Err(ValidationError::InvalidEmail)
            }
        }
        Rule::PasswordLength => {
            if input.value(Field::Password).chars().count() >= MIN_PASSWORD_CHARS {
                Ok(())
            } else {
                Err(ValidationError::PasswordTooShort)
            }
        }
        Rule::PasswordConfirmation => {
            if input.value(Field::Password) == input.value(Field::ConfirmPassword) {
                Ok(())
            } else {
                Err(ValidationError::PasswordMismatch)
            }
        }
        Rule::KnownCategory => parse_category(input.value(Field::Category)).map(|_| ()),
        Rule::CalendarDate => parse_date(input.value(Field::Date)).map(|_| ()),
    }
}

/// A field is present when it is non-empty after trimming.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Permissive syntactic check: `local@domain.tld` without spaces or extra `@`.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Rejects attachments larger than the 10 MiB limit.
pub fn check_attachment(attachment: &FileAttachment) -> Result<(), ValidationError> {
    if attachment.size > MAX_ATTACHMENT_BYTES {
        return Err(ValidationError::FileTooLarge {
            size: attachment.size,
        });
    }
    Ok(())
}

/// Empty selects no category.
pub(crate) fn parse_category(value: &str) -> Result<Option<Category>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ValidationError::InvalidCategory(trimmed.to_string()))
}

/// Empty means "no date chosen"; callers substitute today.
pub(crate) fn parse_date(value: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}
