//! Raw form inputs as typed by the user.

use super::rules::{check_attachment, parse_category, parse_date, validate_form, Field, FormKind};
use super::ValidationError;
use crate::model::article::{today, Article, ArticleFields, FileAttachment, DATE_FORMAT};

/// Read access to the raw text of a form's fields.
///
/// Fields the form does not have read as `""`.
pub trait FormInput {
    fn value(&self, field: Field) -> &str;
}

/// Create/edit article form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleForm {
    pub title: String,
    pub author: String,
    /// Category label, or empty for none.
    pub category: String,
    /// `YYYY-MM-DD`, or empty for today.
    pub date: String,
    pub content: String,
    attachment: Option<FileAttachment>,
    kind: FormKind,
}

impl Default for ArticleForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            category: String::new(),
            date: today().format(DATE_FORMAT).to_string(),
            content: String::new(),
            attachment: None,
            kind: FormKind::CreateArticle,
        }
    }
}

impl ArticleForm {
    /// Empty create form dated today.
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit form prefilled from a stored article, attachment included.
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            author: article.author.clone(),
            category: article
                .category
                .map(|category| category.label().to_string())
                .unwrap_or_default(),
            date: article
                .date
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            content: article.content.clone(),
            attachment: article.attachment(),
            kind: FormKind::UpdateArticle,
        }
    }

    /// `CreateArticle` for new forms, `UpdateArticle` for forms built from a
    /// stored article.
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn attachment(&self) -> Option<&FileAttachment> {
        self.attachment.as_ref()
    }

    /// Attaches a file by name and size. Only create forms take files; an
    /// edit form keeps whatever the stored article already had.
    ///
    /// # Errors
    /// - `AttachmentOnCreateOnly` on an edit form.
    /// - `FileTooLarge` for files over the limit; the previously attached
    ///   file, if any, stays attached.
    pub fn attach_file(&mut self, attachment: FileAttachment) -> Result<(), ValidationError> {
        if self.kind != FormKind::CreateArticle {
            return Err(ValidationError::AttachmentOnCreateOnly);
        }
        check_attachment(&attachment)?;
        self.attachment = Some(attachment);
        Ok(())
    }

    /// Validates the form and converts it into a full article field set.
    ///
    /// Text fields are kept verbatim; an empty date becomes today.
    pub fn to_fields(&self, kind: FormKind) -> Result<ArticleFields, ValidationError> {
        validate_form(kind, self)?;
        if let Some(attachment) = &self.attachment {
            check_attachment(attachment)?;
        }
        Ok(ArticleFields {
            title: self.title.clone(),
            author: self.author.clone(),
            category: parse_category(&self.category)?,
            date: parse_date(&self.date)?.unwrap_or_else(today),
            content: self.content.clone(),
            attachment: self.attachment.clone(),
        })
    }
}

impl FormInput for ArticleForm {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Category => &self.category,
            Field::Date => &self.date,
            Field::Content => &self.content,
            _ => "",
        }
    }
}

/// Sign-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_form(FormKind::SignIn, self)
    }
}

impl FormInput for SignInForm {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
            _ => "",
        }
    }
}

/// Account creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_form(FormKind::SignUp, self)
    }
}

impl FormInput for SignUpForm {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            _ => "",
        }
    }
}
