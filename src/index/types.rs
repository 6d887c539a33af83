//! Index Data Types
//!
//! Plain data produced by the load pass and returned by the query operations.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::IndexError;

/// Occurrence count per normalized token. A missing key means zero.
pub type TermCounts = HashMap<String, u64>;

/// Outcome of the one-time load pass.
pub type LoadResult = Result<LoadSummary, IndexError>;

/// Lifecycle of a `CollectionIndex`. `Loaded` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Empty,
    Loading,
    Loaded,
}

/// What a successful scan did.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    /// Documents registered in the index, including unreadable ones.
    pub documents_indexed: usize,
    /// Names of documents that failed to read and were stored as empty.
    pub failed_documents: Vec<String>,
    pub elapsed: Duration,
}

/// Aggregate figures over the loaded collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStats {
    pub document_count: usize,
    /// Size of the global token key set.
    pub unique_term_count: usize,
    /// Sum of all global counts.
    pub total_term_count: u64,
    /// Loaded document names, in file-name order.
    pub document_names: Vec<String>,
}
