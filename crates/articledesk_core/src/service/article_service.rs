//! Article use-case service.
//!
//! # Invariants
//! - Create/update never reach the repository with a form that failed
//!   validation.
//! - Update keeps the article id and its position in the collection.

use crate::model::article::{Article, ArticleId};
use crate::repo::article_repo::ArticleRepository;
use crate::repo::{RepoError, RepoResult};
use crate::validation::{ArticleForm, FormKind, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for article use-cases.
#[derive(Debug)]
pub enum ArticleServiceError {
    /// Form input failed a field rule; nothing was written.
    Validation(ValidationError),
    /// Target article does not exist.
    ArticleNotFound(ArticleId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ArticleServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ArticleNotFound(id) => write!(f, "article not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ArticleServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::ArticleNotFound(_) => None,
        }
    }
}

impl From<ValidationError> for ArticleServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ArticleServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ArticleNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Article service facade over repository implementations.
pub struct ArticleService<R: ArticleRepository> {
    repo: R,
}

impl<R: ArticleRepository> ArticleService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all articles in insertion order.
    pub fn list_articles(&self) -> RepoResult<Vec<Article>> {
        self.repo.list_articles()
    }

    pub fn find_article(&self, id: &ArticleId) -> Result<Article, ArticleServiceError> {
        Ok(self.repo.find_article(id)?)
    }

    /// Validates a create form and appends the new article.
    pub fn create_article(&self, form: &ArticleForm) -> Result<Article, ArticleServiceError> {
        let fields = form.to_fields(FormKind::CreateArticle)?;
        Ok(self.repo.create_article(fields)?)
    }

    /// Validates an edit form and replaces the stored article in place.
    pub fn update_article(
        &self,
        id: &ArticleId,
        form: &ArticleForm,
    ) -> Result<Article, ArticleServiceError> {
        let fields = form.to_fields(FormKind::UpdateArticle)?;
        Ok(self.repo.update_article(id, fields)?)
    }

    /// Removes the article; absent ids are a no-op.
    pub fn delete_article(&self, id: &ArticleId) -> RepoResult<()> {
        self.repo.delete_article(id)
    }
}
