//! Article collection repository.
//!
//! # Responsibility
//! - List, create, find, update and delete articles in the collection
//!   stored under [`ARTICLES_KEY`].
//! - Assign fresh timestamp-derived ids.
//!
//! # Invariants
//! - Records keep insertion order; updates replace in place.
//! - No two records share an id; new ids are strictly greater than every
//!   numeric id already stored.
//! - An absent key reads as an empty collection; an unparsable value is
//!   `RepoError::Corrupt`, never an empty list.
//! - Stored records only need to pass `Article::check_integrity`; the
//!   stricter `Article::validate` applies to the record being written.

use super::{RepoError, RepoResult};
use crate::kv::{KeyValueStore, ARTICLES_KEY};
use crate::model::article::{Article, ArticleFields, ArticleId};
use chrono::Utc;
use log::info;
use std::collections::HashSet;

/// Repository interface for article CRUD operations.
pub trait ArticleRepository {
    fn list_articles(&self) -> RepoResult<Vec<Article>>;
    fn create_article(&self, fields: ArticleFields) -> RepoResult<Article>;
    fn find_article(&self, id: &ArticleId) -> RepoResult<Article>;
    fn update_article(&self, id: &ArticleId, fields: ArticleFields) -> RepoResult<Article>;
    fn delete_article(&self, id: &ArticleId) -> RepoResult<()>;
}

/// Article repository persisting the whole collection as one JSON value.
pub struct KvArticleRepository<S: KeyValueStore> {
    store: S,
    clock: fn() -> i64,
}

impl<S: KeyValueStore> KvArticleRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, now_epoch_ms)
    }

    /// Uses `clock` (epoch milliseconds) to derive new ids.
    pub fn with_clock(store: S, clock: fn() -> i64) -> Self {
        Self { store, clock }
    }

    /// Runs `f` on the decoded collection and writes the result back.
    ///
    /// The read, `f` and the write form one store transaction. When `f`
    /// fails nothing is written.
    fn transact<T>(&self, f: impl FnOnce(&mut Vec<Article>) -> RepoResult<T>) -> RepoResult<T> {
        self.store.update_entry(ARTICLES_KEY, |raw| {
            let mut articles = decode_articles(raw.as_deref())?;
            let output = f(&mut articles)?;
            let encoded = serde_json::to_string(&articles).map_err(RepoError::Serialization)?;
            Ok((encoded, output))
        })
    }
}

impl<S: KeyValueStore> ArticleRepository for KvArticleRepository<S> {
    fn list_articles(&self) -> RepoResult<Vec<Article>> {
        let raw = self.store.get(ARTICLES_KEY)?;
        decode_articles(raw.as_deref())
    }

    fn create_article(&self, fields: ArticleFields) -> RepoResult<Article> {
        let now_ms = (self.clock)();
        let created = self.transact(|articles| {
            let article = Article::from_fields(next_article_id(articles, now_ms)?, fields);
            article.validate()?;
            articles.push(article.clone());
            Ok(article)
        })?;

        info!(
            "event=article_create module=repo status=ok article_id={}",
            created.id
        );
        Ok(created)
    }

    fn find_article(&self, id: &ArticleId) -> RepoResult<Article> {
        self.list_articles()?
            .into_iter()
            .find(|article| &article.id == id)
            .ok_or_else(|| RepoError::NotFound(id.clone()))
    }

    fn update_article(&self, id: &ArticleId, fields: ArticleFields) -> RepoResult<Article> {
        let updated = self.transact(|articles| {
            let slot = articles
                .iter_mut()
                .find(|article| &article.id == id)
                .ok_or_else(|| RepoError::NotFound(id.clone()))?;
            let article = Article::from_fields(id.clone(), fields);
            article.validate()?;
            *slot = article.clone();
            Ok(article)
        })?;

        info!(
            "event=article_update module=repo status=ok article_id={}",
            updated.id
        );
        Ok(updated)
    }

    fn delete_article(&self, id: &ArticleId) -> RepoResult<()> {
        let removed = self.transact(|articles| {
            let before = articles.len();
            articles.retain(|article| &article.id != id);
            Ok(before - articles.len())
        })?;

        info!(
            "event=article_delete module=repo status=ok article_id={} removed={}",
            id, removed
        );
        Ok(())
    }
}

fn decode_articles(raw: Option<&str>) -> RepoResult<Vec<Article>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let articles: Vec<Article> = serde_json::from_str(raw)
        .map_err(|err| RepoError::Corrupt(format!("invalid `{ARTICLES_KEY}` value: {err}")))?;

    check_collection(&articles)?;
    Ok(articles)
}

fn check_collection(articles: &[Article]) -> RepoResult<()> {
    let mut seen = HashSet::with_capacity(articles.len());
    for article in articles {
        article.check_integrity().map_err(|err| {
            RepoError::Corrupt(format!("invalid stored article `{}`: {err}", article.id))
        })?;
        if !seen.insert(article.id.as_str()) {
            return Err(RepoError::Corrupt(format!(
                "duplicate stored article id `{}`",
                article.id
            )));
        }
    }
    Ok(())
}

/// Picks `now_ms`, bumped past the largest numeric id already stored.
///
/// The result is strictly greater than every id that parses as a number, so
/// no stored id can spell it.
fn next_article_id(existing: &[Article], now_ms: i64) -> RepoResult<ArticleId> {
    let latest = existing
        .iter()
        .filter_map(|article| article.id.epoch_ms())
        .max();
    let candidate = match latest {
        Some(latest) if latest >= now_ms => latest
            .checked_add(1)
            .ok_or(RepoError::IdSpaceExhausted)?,
        _ => now_ms,
    };
    Ok(ArticleId::from_epoch_ms(candidate))
}

fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::next_article_id;
    use crate::model::article::{Article, ArticleFields, ArticleId};
    use crate::repo::RepoError;

    fn stored(id: &str) -> Article {
        Article::from_fields(ArticleId::from(id), ArticleFields::new("T", "A", "C"))
    }

    #[test]
    fn next_id_uses_clock_when_ahead_of_stored_ids() {
        let existing = vec![stored("100")];
        let id = next_article_id(&existing, 500).expect("id below limit");
        assert_eq!(id.as_str(), "500");
    }

    #[test]
    fn next_id_bumps_past_stored_ids_within_same_millisecond() {
        let existing = vec![stored("500"), stored("legacy-id")];
        let same_ms = next_article_id(&existing, 500).expect("id below limit");
        let clock_behind = next_article_id(&existing, 10).expect("id below limit");
        assert_eq!(same_ms.as_str(), "501");
        assert_eq!(clock_behind.as_str(), "501");
    }

    #[test]
    fn next_id_fails_once_largest_id_is_at_the_limit() {
        let existing = vec![stored(&i64::MAX.to_string())];
        assert!(matches!(
            next_article_id(&existing, 500),
            Err(RepoError::IdSpaceExhausted)
        ));
    }
}
