//! Search backend client
//!
//! This crate provides the async boundary between the query layer and an
//! Elasticsearch-compatible search service.
//!
//! # Examples
//!
//! ## Talk to a running cluster
//!
//! ```rust,no_run
//! use sift_client::{ClientConfig, ElasticClient, SearchBackend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ElasticClient::from_config(&ClientConfig::default())?;
//! let exists = client.index_exists("posts").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## In-memory backend
//!
//! ```rust
//! use sift_client::{IndexSettings, MemoryBackend, SearchBackend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = MemoryBackend::new();
//! backend.create_index("posts", &IndexSettings::default()).await?;
//! assert!(backend.index_exists("posts").await?);
//! # Ok(())
//! # }
//! ```
//!
pub mod backend;
pub mod elastic;
pub mod error;
pub mod memory;
pub mod models;

pub use backend::SearchBackend;
pub use elastic::ElasticClient;
pub use error::{Error, Result};
pub use memory::MemoryBackend;
pub use models::{Acknowledged, ClientConfig, IndexSettings, QueryRequest};
