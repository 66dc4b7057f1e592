#![doc = include_str!("../README.md")]
//!
//! ## Modules
//!
//! - [`catalog`] - Per-kind accessors and the cached catalog snapshot
//! - [`config`] - Content root configuration
//! - [`error`] - Error types
//! - [`filter`] - Case-insensitive substring search
//! - [`frontmatter`] - Header block and body parsing
//! - [`kind`] - The agent / skill / workflow kinds
//! - [`loader`] - Loading documents from disk
//! - [`metadata`] - Kind-specific metadata shapes
//! - [`record`] - Catalog records

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod frontmatter;
pub mod kind;
pub mod loader;
pub mod metadata;
pub mod record;

pub use catalog::{Catalog, ContentDir, Counts, FilteredView, SearchResults, Snapshot};
pub use config::{CONTENT_DIR_ENV, CatalogConfig, DEFAULT_CONTENT_DIR};
pub use error::{Error, Result};
pub use filter::{Searchable, filter, matches};
pub use frontmatter::{Document, HeaderValue, parse_document};
pub use kind::Kind;
pub use loader::{load_file, load_kind, load_one, sort_by_name};
pub use metadata::{
    AgentMetadata, Difficulty, Metadata, SkillMetadata, WorkflowMetadata, WorkflowStep,
};
pub use record::{AgentRecord, CatalogRecord, SkillRecord, WorkflowRecord};
