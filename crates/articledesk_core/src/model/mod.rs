//! Domain model for articles and the cached sign-in session.
//!
//! # Responsibility
//! - Define the records persisted under the fixed store keys.
//! - Own the wire shape (camelCase JSON) shared with existing stored data.
//!
//! # Invariants
//! - Every article carries a non-empty, immutable `ArticleId`.
//! - Attachment metadata is either fully present or fully absent.

pub mod article;
pub mod session;
