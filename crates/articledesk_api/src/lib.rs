//! Screen-level use-case API for ArticleDesk front ends.
//!
//! # Responsibility
//! - Own the opened store and auth gateway behind an explicit lifecycle.
//! - Expose one screen object per form, each turning every outcome into a
//!   displayed message with an `error`/`success` classification.
//!
//! # Invariants
//! - No error escapes a screen action; the screen stays usable afterwards.
//! - Failed actions leave stored state unchanged.

pub mod context;
pub mod screens;

pub use context::{AppContext, ContextError};
pub use screens::{
    CreateScreen, ListScreen, MessageKind, SignInScreen, SignUpScreen, StatusMessage,
    UpdateScreen,
};
