//! Collection Index
//!
//! Owns the per-document token counts and the global aggregate built from a
//! directory of text files.
//!
//! ## Lifecycle
//! `Empty -> Loading -> Loaded`. The scan runs at most once per index: the
//! first caller of `load` (or of any query) drives it, concurrent callers
//! await the same in-flight scan, and everyone after that reads the cached
//! snapshot. The snapshot is assembled privately and published in one step,
//! so readers never observe a global aggregate that disagrees with the
//! document set.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use tokio::sync::OnceCell;

use super::document::index_document;
use super::types::{IndexStats, LoadResult, LoadState, LoadSummary, TermCounts};
use crate::error::IndexError;
use crate::search::tokenizer::fold_query_term;

pub const DEFAULT_EXTENSION: &str = "txt";

pub struct CollectionIndex {
    documents_dir: PathBuf,
    extension: String,
    loaded: OnceCell<Snapshot>,
    loading: AtomicBool,
    scans: AtomicUsize,
}

/// Immutable result of the load pass.
struct Snapshot {
    documents: BTreeMap<String, TermCounts>,
    global: TermCounts,
    outcome: LoadResult,
}

impl Snapshot {
    fn empty(outcome: LoadResult) -> Self {
        Self {
            documents: BTreeMap::new(),
            global: TermCounts::new(),
            outcome,
        }
    }
}

/// Clears the `loading` flag when a scan is dropped before it finishes,
/// so a cancelled load reads as `Empty` again.
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
    armed: bool,
}

impl<'a> LoadingGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self { flag, armed: true }
    }

    /// The snapshot is about to be published; `state()` reports it from here on.
    fn finish(mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.flag.store(false, Ordering::Release);
        }
    }
}

impl CollectionIndex {
    /// Creates an empty index over `*.txt` files in `documents_dir`.
    pub fn new(documents_dir: impl Into<PathBuf>) -> Arc<Self> {
        Self::with_extension(documents_dir, DEFAULT_EXTENSION)
    }

    /// Creates an empty index over `*.<extension>` files in `documents_dir`.
    pub fn with_extension(documents_dir: impl Into<PathBuf>, extension: &str) -> Arc<Self> {
        Arc::new(Self {
            documents_dir: documents_dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
            loaded: OnceCell::new(),
            loading: AtomicBool::new(false),
            scans: AtomicUsize::new(0),
        })
    }

    pub fn state(&self) -> LoadState {
        if self.loaded.initialized() {
            LoadState::Loaded
        } else if self.loading.load(Ordering::Acquire) {
            LoadState::Loading
        } else {
            LoadState::Empty
        }
    }

    /// Number of directory scans started so far. Stays at 1 once loaded,
    /// unless an earlier scan was cancelled before it finished.
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    /// Runs the load pass if it has not run yet and returns its outcome.
    ///
    /// Calling this again after the index is loaded is a no-op that returns
    /// the cached outcome. A missing directory yields
    /// `Err(IndexError::DirectoryNotFound)` and leaves the index empty;
    /// queries keep answering 0.
    pub async fn load(&self) -> LoadResult {
        self.snapshot().await.outcome.clone()
    }

    /// Global occurrence count of `term` (lowercased only), 0 if absent.
    pub async fn term_frequency(&self, term: &str) -> u64 {
        let snapshot = self.snapshot().await;
        snapshot
            .global
            .get(&fold_query_term(term))
            .copied()
            .unwrap_or(0)
    }

    /// Occurrence count of `term` inside `doc_name`.
    ///
    /// Returns 0 both when the document is unknown and when the term is
    /// absent from it.
    pub async fn term_frequency_in_document(&self, doc_name: &str, term: &str) -> u64 {
        let snapshot = self.snapshot().await;
        snapshot
            .documents
            .get(doc_name)
            .and_then(|counts| counts.get(&fold_query_term(term)))
            .copied()
            .unwrap_or(0)
    }

    pub async fn stats(&self) -> IndexStats {
        let snapshot = self.snapshot().await;
        IndexStats {
            document_count: snapshot.documents.len(),
            unique_term_count: snapshot.global.len(),
            total_term_count: snapshot.global.values().sum(),
            document_names: snapshot.documents.keys().cloned().collect(),
        }
    }

    pub async fn document_names(&self) -> Vec<String> {
        self.snapshot().await.documents.keys().cloned().collect()
    }

    async fn snapshot(&self) -> &Snapshot {
        self.loaded.get_or_init(|| self.scan()).await
    }

    async fn scan(&self) -> Snapshot {
        let guard = LoadingGuard::start(&self.loading);
        self.scans.fetch_add(1, Ordering::SeqCst);

        let started = Instant::now();
        tracing::info!("Loading documents from {}", self.documents_dir.display());

        let files = match self.list_documents().await {
            Ok(files) => files,
            Err(err) => {
                tracing::error!("{}", err);
                guard.finish();
                return Snapshot::empty(Err(err));
            }
        };

        let mut documents = BTreeMap::new();
        let mut global = TermCounts::new();
        let mut failed_documents = Vec::new();

        for (doc_name, path) in files {
            tracing::debug!("Indexing {}...", doc_name);

            let counts = match index_document(&path).await {
                Ok(counts) => counts,
                Err(err) => {
                    tracing::error!("{}", err);
                    failed_documents.push(doc_name.clone());
                    TermCounts::new()
                }
            };

            for (token, count) in &counts {
                *global.entry(token.clone()).or_insert(0) += count;
            }
            documents.insert(doc_name, counts);
        }

        let summary = LoadSummary {
            documents_indexed: documents.len(),
            failed_documents,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            "Loading complete. {} documents indexed ({} failed, {} unique terms) in {:?}",
            summary.documents_indexed,
            summary.failed_documents.len(),
            global.len(),
            summary.elapsed
        );

        guard.finish();
        Snapshot {
            documents,
            global,
            outcome: Ok(summary),
        }
    }

    /// Lists `*.<extension>` entries directly inside the documents directory,
    /// sorted by name. Hidden names and subdirectories are skipped, as a
    /// shell glob followed by a file read would.
    async fn list_documents(&self) -> Result<Vec<(String, PathBuf)>, IndexError> {
        let dir = &self.documents_dir;

        match tokio::fs::metadata(dir).await {
            Ok(meta) if meta.is_dir() => {}
            _ => {
                return Err(IndexError::DirectoryNotFound { path: dir.clone() });
            }
        }

        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| IndexError::directory_read(dir, e))?;

        let suffix = format!(".{}", self.extension);
        let mut files = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| IndexError::directory_read(dir, e))?
        {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!("Skipping non UTF-8 file name {:?}", entry.file_name());
                continue;
            };

            if name.starts_with('.') || !name.ends_with(&suffix) {
                continue;
            }

            let path = entry.path();
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_dir() => continue,
                // Dangling symlinks stay in: the read failure is logged and
                // the document is registered as empty.
                _ => files.push((name, path)),
            }
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(files)
    }
}
