use serde::{Deserialize, Serialize};

use crate::index::types::IndexStats;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_documents: usize,
    pub total_unique_terms: usize,
    pub total_terms: u64,
    pub documents: Vec<String>,
}

impl From<IndexStats> for StatsResponse {
    fn from(stats: IndexStats) -> Self {
        Self {
            total_documents: stats.document_count,
            total_unique_terms: stats.unique_term_count,
            total_terms: stats.total_term_count,
            documents: stats.document_names,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentsResponse {
    pub documents: Vec<String>,
    pub total_count: usize,
}

/// Body of `GET /?term=...`.
///
/// The `frecuencia` key is part of the public wire format. The document
/// variant echoes the requested `doc_name`, the global one carries
/// `"scope": "global"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrequencyResponse {
    Document {
        frecuencia: u64,
        term: String,
        document: String,
    },
    Global {
        frecuencia: u64,
        term: String,
        scope: String,
    },
}

impl FrequencyResponse {
    pub fn document(frequency: u64, term: &str, document: &str) -> Self {
        Self::Document {
            frecuencia: frequency,
            term: term.to_string(),
            document: document.to_string(),
        }
    }

    pub fn global(frequency: u64, term: &str) -> Self {
        Self::Global {
            frecuencia: frequency,
            term: term.to_string(),
            scope: "global".to_string(),
        }
    }
}
