//! Term Frequency Service Library
//!
//! Answers "how many times does term X occur in document Y, or across the
//! whole collection?" over a fixed directory of text documents.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! - **`config`**: Port, documents directory and cache settings from env and flags.
//! - **`error`**: Load-time (`IndexError`) and request-time (`ApiError`) failures.
//! - **`index`**: The in-memory inverted-frequency index and its one-time load pass.
//! - **`search`**: Text normalization plus the HTTP API and its response cache.

pub mod config;
pub mod error;
pub mod index;
pub mod search;
