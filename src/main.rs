use anyhow::Result;
use clap::{CommandFactory, Parser, ValueHint};
use clap_complete::{generate, Shell};
use console::style;
use std::io;
use std::path::PathBuf;
use tracing::info;

use gene_pair_text::pipeline::{self, PipelineConfig, PipelineSummary};

/// Labeled textual dataset builder for adjacent gene pairs
#[derive(Parser, Debug)]
#[command(
    name = "gene-pair-text",
    version,
    about = "Serialize adjacent gene pairs of annotated genomes into a labeled text dataset",
    long_about = r#"
Reads every <genome_id>.*.features.tab file in GENOME_DIR, pairs each coding
gene with the next one on the genome and writes one description per pair whose
first gene is labeled.

Descriptions combine gene lengths, products, protein families, intergenic
distance, GC content difference, strand relation and cross-genome conservation.
Codon bias distance and STRING interaction scores are added when their tables
are supplied.
"#
)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Directory containing genome feature tables
    #[arg(value_name = "GENOME_DIR", value_hint = ValueHint::DirPath, required_unless_present = "completions")]
    genome_dir: Option<PathBuf>,

    /// GC ratio table (tag,gc_ratio)
    #[arg(value_name = "GC_CSV", value_hint = ValueHint::FilePath, required_unless_present = "completions")]
    gc: Option<PathBuf>,

    /// Label table (tag,label)
    #[arg(value_name = "LABELS_CSV", value_hint = ValueHint::FilePath, required_unless_present = "completions")]
    labels: Option<PathBuf>,

    /// Tab-delimited conservation table (gene1_id, gene2_id, conservation_score)
    #[arg(value_name = "CONSERVATION_TSV", value_hint = ValueHint::FilePath, required_unless_present = "completions")]
    conservation: Option<PathBuf>,

    /// Output dataset
    #[arg(value_name = "OUTPUT_CSV", value_hint = ValueHint::FilePath, required_unless_present = "completions")]
    output: Option<PathBuf>,

    /// Codon bias table (tag,bias)
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    codon_bias: Option<PathBuf>,

    /// STRING interaction score table (peg1,peg2,string)
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    string_scores: Option<PathBuf>,

    /// Also search subdirectories of GENOME_DIR
    #[arg(short, long)]
    recursive: bool,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return Ok(());
    }

    init_logging(cli.verbose);

    let config = app_config(cli)?;
    info!("Building gene pair dataset from {}", config.genome_dir.display());

    let summary = pipeline::run(&config)?;
    print_summary(&summary);

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("gene_pair_text={}", level))
        .with_writer(io::stderr)
        .init();
}

fn app_config(cli: Cli) -> Result<PipelineConfig> {
    let (Some(genome_dir), Some(gc), Some(labels), Some(conservation), Some(output)) =
        (cli.genome_dir, cli.gc, cli.labels, cli.conservation, cli.output)
    else {
        // clap enforces these unless --completions is given
        anyhow::bail!("missing required input paths");
    };

    let mut config = PipelineConfig::new(genome_dir, gc, labels, conservation, output);
    config.codon_bias_path = cli.codon_bias;
    config.interaction_score_path = cli.string_scores;
    config.recursive = cli.recursive;
    config.show_progress = true;

    Ok(config)
}

fn print_summary(summary: &PipelineSummary) {
    let stats = &summary.stats;

    println!(
        "\n{} Wrote {} gene pairs to {}",
        style("✓").green().bold(),
        style(summary.records_written).bold(),
        style(summary.output_path.display()).cyan()
    );
    println!(
        "  {} genomes, {} genes, {} pairs examined, {} skipped without label",
        stats.genomes, stats.genes, stats.pairs_examined, stats.skipped_unlabeled
    );
    println!(
        "  conservation: {} found, {} defaulted to 0",
        stats.conservation_hits, stats.conservation_misses
    );
    if stats.interaction_hits + stats.interaction_misses > 0 {
        println!(
            "  interaction scores: {} found, {} unavailable",
            stats.interaction_hits, stats.interaction_misses
        );
    }
    if stats.codon_available + stats.codon_unavailable > 0 {
        println!(
            "  codon bias: {} computed, {} unavailable",
            stats.codon_available, stats.codon_unavailable
        );
    }
}
