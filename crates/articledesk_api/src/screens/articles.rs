//! Article list, create and edit screens.

use super::StatusMessage;
use crate::context::AppContext;
use articledesk_core::{Article, ArticleForm, ArticleId, ArticleServiceError, FileAttachment};
use log::warn;

const LIST_LOAD_FAILED: &str = "Failed to load articles";
const ARTICLE_NOT_FOUND: &str = "Article not found";
const ARTICLE_LOAD_FAILED: &str = "Failed to load article";

/// All-articles screen.
#[derive(Debug, Clone, Default)]
pub struct ListScreen {
    articles: Option<Vec<Article>>,
    status: Option<StatusMessage>,
}

impl ListScreen {
    /// Loads the collection. A corrupt or unreadable store leaves the list
    /// unavailable (not empty) and shows a load-failure message.
    pub fn load(ctx: &AppContext) -> Self {
        let mut screen = Self::default();
        screen.refresh(ctx);
        screen
    }

    /// `None` when the collection could not be loaded.
    pub fn articles(&self) -> Option<&[Article]> {
        self.articles.as_deref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Deletes `id` once the user confirmed; does nothing otherwise.
    ///
    /// Returns whether the delete was carried out.
    pub fn delete(&mut self, ctx: &AppContext, id: &ArticleId, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }

        match ctx.articles().delete_article(id) {
            Ok(()) => {
                self.refresh(ctx);
                if self.articles.is_some() {
                    self.status = Some(StatusMessage::success("Article deleted successfully!"));
                }
                true
            }
            Err(err) => {
                log_failure("delete_article", &err);
                self.status = Some(StatusMessage::error(format!(
                    "Failed to delete article: {err}"
                )));
                false
            }
        }
    }

    fn refresh(&mut self, ctx: &AppContext) {
        match ctx.articles().list_articles() {
            Ok(articles) => {
                self.articles = Some(articles);
                self.status = None;
            }
            Err(err) => {
                log_failure("list_articles", &err);
                self.articles = None;
                self.status = Some(StatusMessage::error(LIST_LOAD_FAILED));
            }
        }
    }
}

/// New-article screen.
#[derive(Debug, Clone, Default)]
pub struct CreateScreen {
    pub form: ArticleForm,
    status: Option<StatusMessage>,
}

impl CreateScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Attaches file metadata. An oversized file shows an error and keeps
    /// whatever was attached before; the form stays submittable.
    pub fn attach_file(&mut self, name: impl Into<String>, size: u64) -> bool {
        let attachment = FileAttachment {
            name: name.into(),
            size,
        };
        match self.form.attach_file(attachment) {
            Ok(()) => {
                self.status = None;
                true
            }
            Err(err) => {
                self.status = Some(StatusMessage::error(err.to_string()));
                false
            }
        }
    }

    /// Validates and stores the form. Returns the created article.
    pub fn submit(&mut self, ctx: &AppContext) -> Option<Article> {
        match ctx.articles().create_article(&self.form) {
            Ok(article) => {
                self.status = Some(StatusMessage::success("Article created successfully!"));
                Some(article)
            }
            Err(ArticleServiceError::Validation(err)) => {
                self.status = Some(StatusMessage::error(err.to_string()));
                None
            }
            Err(err) => {
                log_failure("create_article", &err);
                self.status = Some(StatusMessage::error(format!(
                    "Failed to create article: {err}"
                )));
                None
            }
        }
    }
}

/// Edit-by-id screen.
#[derive(Debug, Clone)]
pub struct UpdateScreen {
    id: ArticleId,
    /// Last stored version of the article.
    article: Option<Article>,
    /// `None` when the article could not be loaded.
    pub form: Option<ArticleForm>,
    status: Option<StatusMessage>,
}

impl UpdateScreen {
    /// Loads the article into an edit form.
    pub fn load(ctx: &AppContext, id: ArticleId) -> Self {
        let (article, status) = match ctx.articles().find_article(&id) {
            Ok(article) => (Some(article), None),
            Err(ArticleServiceError::ArticleNotFound(_)) => {
                (None, Some(StatusMessage::error(ARTICLE_NOT_FOUND)))
            }
            Err(err) => {
                log_failure("find_article", &err);
                (None, Some(StatusMessage::error(ARTICLE_LOAD_FAILED)))
            }
        };
        let form = article.as_ref().map(ArticleForm::from_article);
        Self {
            id,
            article,
            form,
            status,
        }
    }

    pub fn id(&self) -> &ArticleId {
        &self.id
    }

    /// Article as loaded, or as saved by the last successful submit.
    pub fn article(&self) -> Option<&Article> {
        self.article.as_ref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Validates the edited form and replaces the stored article.
    pub fn submit(&mut self, ctx: &AppContext) -> Option<Article> {
        let Some(form) = &self.form else {
            self.status = Some(StatusMessage::error(ARTICLE_NOT_FOUND));
            return None;
        };

        match ctx.articles().update_article(&self.id, form) {
            Ok(article) => {
                self.status = Some(StatusMessage::success("Article updated successfully!"));
                self.article = Some(article.clone());
                Some(article)
            }
            Err(ArticleServiceError::Validation(err)) => {
                self.status = Some(StatusMessage::error(err.to_string()));
                None
            }
            Err(ArticleServiceError::ArticleNotFound(_)) => {
                self.status = Some(StatusMessage::error(ARTICLE_NOT_FOUND));
                None
            }
            Err(err) => {
                log_failure("update_article", &err);
                self.status = Some(StatusMessage::error(format!(
                    "Failed to update article: {err}"
                )));
                None
            }
        }
    }
}

fn log_failure(action: &str, err: &dyn std::error::Error) {
    warn!("event=screen_action module=api action={action} status=error error={err}");
}
