//! Search Service Module
//!
//! Exposes the collection index over HTTP and defines what counts as "the
//! same term".
//!
//! ## Responsibilities
//! - **Tokenization**: Lowercasing, accent stripping and word extraction for documents.
//! - **API**: RESTful endpoints for term frequencies, statistics and health.
//! - **Caching**: Short-lived responses for repeated identical queries.
//!
//! ## Submodules
//! - **`cache`**: The swappable response cache in front of the query route.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`router`**: Route table, fallback and middleware layers.
//! - **`tokenizer`**: Text normalization shared by the indexer and the query path.
//! - **`types`**: Data Transfer Objects (DTOs) for API communication.

pub mod cache;
pub mod handlers;
pub mod router;
pub mod tokenizer;
pub mod types;

#[cfg(test)]
mod tests;
