//! Core use-case services.
//!
//! # Responsibility
//! - Run form validation, then delegate to repositories or the auth gateway.
//! - Keep screen/CLI layers decoupled from storage and transport details.

pub mod account_service;
pub mod article_service;
