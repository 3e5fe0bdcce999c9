//! End-to-end dataset build: load tables, pair genes per genome, write the dataset.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::info;

use crate::discovery::FileDiscovery;
use crate::output::DatasetWriter;
use crate::pairs::{PairSerializer, PairStats};
use crate::parsers::{self, FeatureTableParser};
use crate::types::{AuxiliaryTables, GenePairRecord};

/// Inputs of one dataset build
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub genome_dir: PathBuf,
    pub gc_path: PathBuf,
    pub label_path: PathBuf,
    pub conservation_path: PathBuf,
    pub output_path: PathBuf,
    pub codon_bias_path: Option<PathBuf>,
    pub interaction_score_path: Option<PathBuf>,
    /// Also search subdirectories of `genome_dir`
    pub recursive: bool,
    pub show_progress: bool,
}

impl PipelineConfig {
    pub fn new(
        genome_dir: impl Into<PathBuf>,
        gc_path: impl Into<PathBuf>,
        label_path: impl Into<PathBuf>,
        conservation_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            genome_dir: genome_dir.into(),
            gc_path: gc_path.into(),
            label_path: label_path.into(),
            conservation_path: conservation_path.into(),
            output_path: output_path.into(),
            codon_bias_path: None,
            interaction_score_path: None,
            recursive: false,
            show_progress: false,
        }
    }

    pub fn with_codon_bias(mut self, path: impl Into<PathBuf>) -> Self {
        self.codon_bias_path = Some(path.into());
        self
    }

    pub fn with_interaction_scores(mut self, path: impl Into<PathBuf>) -> Self {
        self.interaction_score_path = Some(path.into());
        self
    }
}

/// Outcome of a finished build
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub output_path: PathBuf,
    pub records_written: usize,
    pub stats: PairStats,
}

impl AuxiliaryTables {
    /// Load every lookup table named by `config`
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        let gc = parsers::load_gc_ratios(&config.gc_path)
            .with_context(|| format!("Failed to load GC ratios from {}", config.gc_path.display()))?;
        let labels = parsers::load_labels(&config.label_path).with_context(|| {
            format!("Failed to load labels from {}", config.label_path.display())
        })?;
        let conservation = parsers::load_conservation(&config.conservation_path).with_context(|| {
            format!(
                "Failed to load conservation scores from {}",
                config.conservation_path.display()
            )
        })?;

        let codon_bias = match &config.codon_bias_path {
            Some(path) => Some(parsers::load_codon_bias(path).with_context(|| {
                format!("Failed to load codon bias from {}", path.display())
            })?),
            None => None,
        };

        let interactions = match &config.interaction_score_path {
            Some(path) => Some(parsers::load_interaction_scores(path).with_context(|| {
                format!("Failed to load interaction scores from {}", path.display())
            })?),
            None => None,
        };

        info!(
            "Loaded {} GC ratios, {} labels, {} conservation scores",
            gc.len(),
            labels.len(),
            conservation.len()
        );

        Ok(Self {
            gc,
            labels,
            conservation,
            codon_bias,
            interactions,
        })
    }
}

/// Serialize every genome under `config.genome_dir` against already loaded tables
pub fn build_records(
    config: &PipelineConfig,
    tables: &AuxiliaryTables,
) -> Result<(Vec<GenePairRecord>, PairStats)> {
    let files = FileDiscovery::new(config.recursive).discover(&config.genome_dir)?;
    info!(
        "Found {} genome feature tables in {}",
        files.len(),
        config.genome_dir.display()
    );

    let pb = if config.show_progress {
        ProgressBar::new(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let parser = FeatureTableParser::new();
    let serializer = PairSerializer::new(tables);
    let mut stats = PairStats::new();
    let mut records = Vec::new();

    for path in &files {
        let genome_id = parsers::genome_id_from_path(path);
        pb.set_message(genome_id.clone());

        let genes = parser
            .parse(path)
            .with_context(|| format!("Failed to parse genome {}", path.display()))?;
        let line = genome_line(&genome_id, genes.len());
        info!("{}", line);
        pb.suspend(|| println!("{}", line));

        let genome_records = serializer
            .serialize_genome(&genome_id, &genes, &mut stats)
            .with_context(|| format!("Failed to serialize gene pairs of {}", genome_id))?;
        records.extend(genome_records);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok((records, stats))
}

/// Per-genome progress line, printed to stdout for every parsed genome
fn genome_line(genome_id: &str, gene_count: usize) -> String {
    format!("{}: {} genes", genome_id, gene_count)
}

/// Run a complete build and write the dataset
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary> {
    let tables = AuxiliaryTables::load(config)?;
    let (records, stats) = build_records(config, &tables)?;

    let records_written = DatasetWriter::new(&config.output_path).write(&records)?;
    info!(
        "Wrote {} gene pairs to {}",
        records_written,
        config.output_path.display()
    );

    Ok(PipelineSummary {
        output_path: config.output_path.clone(),
        records_written,
        stats,
    })
}
