//! Collection Index Module
//!
//! The in-memory term-frequency index behind the HTTP API.
//!
//! ## Overview
//! At startup the documents directory is scanned once. Every matching file is
//! read, normalized and tallied into a per-document `TermCounts`, and each
//! tally is merged into one global aggregate. After that the index is
//! read-only and every lookup is a plain map read.
//!
//! ## Submodules
//! - **`collection`**: `CollectionIndex`, its single-flight load and the query operations.
//! - **`document`**: Reads one document and counts its tokens.
//! - **`types`**: Counts, load outcome and statistics types.

pub mod collection;
pub mod document;
pub mod types;
