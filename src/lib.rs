//! # Gene Pair Text
//!
//! Builds a labeled textual dataset of adjacent gene pairs for machine-learning use.
//!
//! ## Features
//!
//! - Parses BV-BRC/PATRIC `*.features.tab` tables into position-ordered coding genes
//! - Joins GC content, labels and cross-genome conservation per gene pair
//! - Optional codon-usage distance and protein-interaction scores
//! - Renders one deterministic natural-language description per labeled pair
//! - Writes the whole dataset as a single CSV

pub mod discovery;
pub mod error;
pub mod output;
pub mod pairs;
pub mod parsers;
pub mod pipeline;
pub mod text;
pub mod types;

// Re-export key types
pub use discovery::FileDiscovery;
pub use error::Error;
pub use output::DatasetWriter;
pub use pairs::{PairSerializer, PairStats};
pub use parsers::FeatureTableParser;
pub use pipeline::{run, PipelineConfig, PipelineSummary};
pub use types::*;
