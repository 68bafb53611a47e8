//! Article record model.
//!
//! # Responsibility
//! - Define the article record and its editable field set.
//! - Validate record-level invariants shared by write and read paths.
//!
//! # Invariants
//! - `id` is derived from the creation timestamp and never changes.
//! - `file_name` and `file_size` are both set or both unset.
//! - Records written by this crate also have non-blank text fields, a date
//!   and an attachment no larger than [`MAX_ATTACHMENT_BYTES`]. Records from
//!   earlier clients may lack those and are still readable.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Largest attachment accepted at creation time (10 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Calendar date layout used on the wire and in forms.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stable article identifier.
///
/// Newly created ids are the decimal creation time in epoch milliseconds.
/// Ids read from storage are kept verbatim even when they are not numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn from_epoch_ms(epoch_ms: i64) -> Self {
        Self(epoch_ms.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the numeric timestamp this id was derived from, if any.
    pub fn epoch_ms(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl Display for ArticleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ArticleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ArticleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Fixed category set offered by the article forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Technology,
    Science,
    Business,
    Health,
    Education,
    Entertainment,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Technology,
        Category::Science,
        Category::Business,
        Category::Health,
        Category::Education,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Science => "Science",
            Self::Business => "Business",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl Display for UnknownCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown category `{}`", self.0)
    }
}

impl Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == value)
            .ok_or_else(|| UnknownCategory(value.to_string()))
    }
}

/// Name and size of a file chosen at creation time. Bytes are never kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub name: String,
    pub size: u64,
}

/// Full editable field set of an article, i.e. everything except `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFields {
    pub title: String,
    pub author: String,
    pub category: Option<Category>,
    pub date: NaiveDate,
    pub content: String,
    pub attachment: Option<FileAttachment>,
}

impl ArticleFields {
    /// Creates a field set dated today (UTC) with no category or attachment.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            category: None,
            date: today(),
            content: content.into(),
            attachment: None,
        }
    }
}

/// Persisted article record.
///
/// Field names serialize in camelCase to stay compatible with collections
/// written by earlier clients (`fileName`, `fileSize`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub author: String,
    /// Serialized as the category label, or `""` when uncategorized.
    #[serde(default, with = "category_wire")]
    pub category: Option<Category>,
    /// `None` for records stored with an empty date.
    #[serde(default, with = "date_wire")]
    pub date: Option<NaiveDate>,
    pub content: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

impl Article {
    /// Builds a record from an id and a full field set.
    pub fn from_fields(id: ArticleId, fields: ArticleFields) -> Self {
        let (file_name, file_size) = match fields.attachment {
            Some(attachment) => (Some(attachment.name), Some(attachment.size)),
            None => (None, None),
        };
        Self {
            id,
            title: fields.title,
            author: fields.author,
            category: fields.category,
            date: Some(fields.date),
            content: fields.content,
            file_name,
            file_size,
        }
    }

    /// Returns the editable field set. An undated record reads as dated today.
    pub fn fields(&self) -> ArticleFields {
        ArticleFields {
            title: self.title.clone(),
            author: self.author.clone(),
            category: self.category,
            date: self.date.unwrap_or_else(today),
            content: self.content.clone(),
            attachment: self.attachment(),
        }
    }

    /// Returns attachment metadata when both halves are present.
    pub fn attachment(&self) -> Option<FileAttachment> {
        match (&self.file_name, self.file_size) {
            (Some(name), Some(size)) => Some(FileAttachment {
                name: name.clone(),
                size,
            }),
            _ => None,
        }
    }

    /// Checks the invariants every stored record must hold, whoever wrote it.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is empty.
    /// - `PartialAttachment` when only one of `file_name`/`file_size` is set.
    pub fn check_integrity(&self) -> Result<(), ArticleValidationError> {
        if self.id.as_str().is_empty() {
            return Err(ArticleValidationError::EmptyId);
        }
        if self.file_name.is_some() != self.file_size.is_some() {
            return Err(ArticleValidationError::PartialAttachment);
        }
        Ok(())
    }

    /// Checks everything [`Article::check_integrity`] does, plus the rules
    /// applied before this crate writes a record.
    ///
    /// # Errors
    /// - Any `check_integrity` error.
    /// - `BlankField` when title, author or content is blank.
    /// - `AttachmentTooLarge` when `file_size` exceeds the attachment limit.
    pub fn validate(&self) -> Result<(), ArticleValidationError> {
        self.check_integrity()?;
        for (name, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("content", &self.content),
        ] {
            if value.trim().is_empty() {
                return Err(ArticleValidationError::BlankField(name));
            }
        }
        match self.file_size {
            Some(size) if size > MAX_ATTACHMENT_BYTES => {
                Err(ArticleValidationError::AttachmentTooLarge { size })
            }
            _ => Ok(()),
        }
    }
}

/// Record-level invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleValidationError {
    EmptyId,
    BlankField(&'static str),
    PartialAttachment,
    AttachmentTooLarge { size: u64 },
}

impl Display for ArticleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "article id must not be empty"),
            Self::BlankField(name) => write!(f, "article {name} must not be blank"),
            Self::PartialAttachment => {
                write!(f, "fileName and fileSize must be set together")
            }
            Self::AttachmentTooLarge { size } => write!(
                f,
                "attachment of {size} bytes exceeds limit of {MAX_ATTACHMENT_BYTES} bytes"
            ),
        }
    }
}

impl Error for ArticleValidationError {}

/// Current calendar date in UTC, the default `date` of new articles.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

mod category_wire {
    use super::Category;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Category>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map_or("", Category::label))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Category>, D::Error> {
        match Option::<String>::deserialize(deserializer)?.as_deref() {
            None | Some("") => Ok(None),
            Some(label) => label.parse().map(Some).map_err(D::Error::custom),
        }
    }
}

mod date_wire {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map(Some)
                .map_err(D::Error::custom),
        }
    }
}
