use anyhow::Result;
use gene_pair_text::{pipeline, AuxiliaryTables, InteractionTable, PipelineConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FEATURE_HEADER: &str =
    "genome_id\tgenome_name\tfeature_type\tpatric_id\tstart\tend\tstrand\tproduct\tpgfam_id";

struct Fixture {
    _dir: TempDir,
    root: PathBuf,
}

impl Fixture {
    /// Genome X with two forward CDS genes, X.1 labeled 1, GC 45/50, empty conservation
    fn scenario(labels: &str) -> Result<Self> {
        let dir = TempDir::new()?;
        let root = dir.path().to_path_buf();
        let genomes = root.join("genomes");
        fs::create_dir(&genomes)?;

        fs::write(
            genomes.join("X.PATRIC.features.tab"),
            format!(
                "{FEATURE_HEADER}\n\
                 X\tTest\tCDS\tfig|X.1\t1\t9\t+\tkinase\tPGF_1\n\
                 X\tTest\tsource\t\t1\t100\t+\t\t\n\
                 X\tTest\tCDS\tfig|X.2\t20\t29\t+\t\tPGF_2\n"
            ),
        )?;
        fs::write(root.join("gc.csv"), "tag,gc_ratio\nX.1,0.45\nX.2,0.50\n")?;
        fs::write(root.join("labels.csv"), format!("tag,label\n{labels}"))?;
        fs::write(
            root.join("conservation.tsv"),
            "gene1_id\tgene2_id\tconservation_score\n",
        )?;

        Ok(Self { _dir: dir, root })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn config(&self) -> PipelineConfig {
        PipelineConfig::new(
            self.path("genomes"),
            self.path("gc.csv"),
            self.path("labels.csv"),
            self.path("conservation.tsv"),
            self.path("out/pairs.csv"),
        )
    }
}

fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::Reader::from_path(path)?;
    assert_eq!(
        reader.headers()?.iter().collect::<Vec<_>>(),
        vec!["genome_id", "gene1", "gene2", "text", "label"]
    );

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[test]
fn test_single_labeled_pair() -> Result<()> {
    let fixture = Fixture::scenario("X.1,1\n")?;
    let config = fixture.config();

    let summary = pipeline::run(&config)?;
    assert_eq!(summary.records_written, 1);
    assert_eq!(summary.stats.genes, 2);

    let rows = read_rows(&config.output_path)?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "X");
    assert_eq!(rows[0][1], "X.1");
    assert_eq!(rows[0][2], "X.2");
    assert_eq!(rows[0][4], "1");

    let text = &rows[0][3];
    assert_eq!(
        text,
        "Gene A is 9 bp long, annotated as \"kinase\", and is part of the PGF_1 family. \
         It is followed by Gene B, 10 bp long, annotated as \"hypothetical protein\", and is part of the PGF_2 family. \
         The intergenic distance is 10 base pairs. \
         The GC content difference is 5.0%. \
         They are on the same strand. \
         They are adjacent in 0.0% of representative genomes."
    );
    assert!(!text.contains("different strands"));

    Ok(())
}

#[test]
fn test_unlabeled_first_gene_emits_nothing() -> Result<()> {
    let fixture = Fixture::scenario("X.2,1\n")?;
    let config = fixture.config();

    let summary = pipeline::run(&config)?;
    assert_eq!(summary.records_written, 0);
    assert_eq!(summary.stats.skipped_unlabeled, 1);
    assert!(read_rows(&config.output_path)?.is_empty());

    Ok(())
}

#[test]
fn test_interaction_score_is_looked_up_in_pair_order() -> Result<()> {
    let fixture = Fixture::scenario("X.1,1\n")?;

    fs::write(fixture.path("forward.csv"), "peg1,peg2,string\nX.1,X.2,150\n")?;
    let config = fixture
        .config()
        .with_interaction_scores(fixture.path("forward.csv"));
    pipeline::run(&config)?;
    let rows = read_rows(&config.output_path)?;
    assert!(rows[0][3].ends_with(" Their String score is 150."));

    // The loader stores both orders, so a reversed row still matches here.
    fs::write(fixture.path("reverse.csv"), "peg1,peg2,string\nX.2,X.1,150\n")?;
    let config = fixture
        .config()
        .with_interaction_scores(fixture.path("reverse.csv"));
    let summary = pipeline::run(&config)?;
    assert_eq!(summary.stats.interaction_hits, 1);

    Ok(())
}

#[test]
fn test_reverse_only_interaction_entry_is_unavailable() -> Result<()> {
    let fixture = Fixture::scenario("X.1,1\n")?;
    let config = fixture.config();

    let mut tables = AuxiliaryTables::load(&config)?;
    let mut scores = InteractionTable::new();
    scores.insert(("X.2".to_string(), "X.1".to_string()), 150);
    tables.interactions = Some(scores);

    let (records, stats) = pipeline::build_records(&config, &tables)?;
    assert_eq!(records.len(), 1);
    assert!(records[0].text.ends_with(" Their String score is unavailable."));
    assert_eq!(stats.interaction_misses, 1);

    Ok(())
}

#[test]
fn test_codon_bias_clause() -> Result<()> {
    let fixture = Fixture::scenario("X.1,1\n")?;
    fs::write(
        fixture.path("codon.csv"),
        "tag,bias\nX.1,\"{'AAA': 0.5, 'AAC': 0.5}\"\nX.2,\"{'AAA': 0.2, 'AAC': 0.9}\"\n",
    )?;

    let config = fixture.config().with_codon_bias(fixture.path("codon.csv"));
    pipeline::run(&config)?;
    let rows = read_rows(&config.output_path)?;
    assert!(rows[0][3].ends_with(" The codon bias difference between the genes is 0.50."));

    fs::write(fixture.path("codon.csv"), "tag,bias\nX.1,\"{'AAA': 0.5}\"\n")?;
    pipeline::run(&config)?;
    let rows = read_rows(&config.output_path)?;
    assert!(rows[0][3].ends_with(" Codon bias information is not available for both genes."));

    Ok(())
}

#[test]
fn test_both_optional_tables_in_order() -> Result<()> {
    let fixture = Fixture::scenario("X.1,0\n")?;
    fs::write(fixture.path("string.csv"), "peg1,peg2,string\nX.9,X.8,700\n")?;
    fs::write(fixture.path("codon.csv"), "tag,bias\n")?;

    let config = fixture
        .config()
        .with_codon_bias(fixture.path("codon.csv"))
        .with_interaction_scores(fixture.path("string.csv"));
    pipeline::run(&config)?;

    let rows = read_rows(&config.output_path)?;
    assert_eq!(rows[0][4], "0");
    assert!(rows[0][3].ends_with(
        "genomes. Their String score is unavailable. Codon bias information is not available for both genes."
    ));

    Ok(())
}

#[test]
fn test_rendering_is_deterministic() -> Result<()> {
    let fixture = Fixture::scenario("X.1,1\n")?;
    fs::write(
        fixture.path("conservation.tsv"),
        "gene1_id\tgene2_id\tconservation_score\nPGF_1\tPGF_2\t0.8349\n",
    )?;
    let config = fixture.config();

    pipeline::run(&config)?;
    let first = fs::read(&config.output_path)?;
    pipeline::run(&config)?;
    let second = fs::read(&config.output_path)?;
    assert_eq!(first, second);

    let rows = read_rows(&config.output_path)?;
    assert!(rows[0][3].contains("They are adjacent in 83.0% of representative genomes."));

    Ok(())
}

#[test]
fn test_near_tie_ratios_round_on_exact_value() -> Result<()> {
    let fixture = Fixture::scenario("X.1,1\n")?;
    fs::write(fixture.path("gc.csv"), "tag,gc_ratio\nX.1,0.005\nX.2,0.065\n")?;
    fs::write(
        fixture.path("conservation.tsv"),
        "gene1_id\tgene2_id\tconservation_score\nPGF_1\tPGF_2\t0.065\n",
    )?;
    let config = fixture.config();

    pipeline::run(&config)?;
    let rows = read_rows(&config.output_path)?;
    assert!(rows[0][3].contains("The GC content difference is 6.0%."));
    assert!(rows[0][3].contains("They are adjacent in 7.0% of representative genomes."));

    Ok(())
}

#[test]
fn test_multiple_genomes_and_missing_gc() -> Result<()> {
    let fixture = Fixture::scenario("X.1,1\nY.1,0\n")?;
    fs::write(
        fixture.path("genomes/Y.PATRIC.features.tab"),
        format!(
            "{FEATURE_HEADER}\n\
             Y\tTest\tCDS\tfig|Y.1\t300\t100\t-\tpermease\t\n\
             Y\tTest\tCDS\tfig|Y.2\t320\t400\t+\tregulator\t\n"
        ),
    )?;
    fs::write(
        fixture.path("gc.csv"),
        "tag,gc_ratio\nX.1,0.45\nX.2,0.50\nY.1,0.381\nY.2,0.5\n",
    )?;
    let config = fixture.config();

    let summary = pipeline::run(&config)?;
    assert_eq!(summary.records_written, 2);
    assert_eq!(summary.stats.genomes, 2);

    let rows = read_rows(&config.output_path)?;
    assert_eq!(rows[1][0], "Y");
    assert_eq!(rows[1][4], "0");
    assert!(rows[1][3].contains("The intergenic distance is -181 base pairs."));
    assert!(rows[1][3].contains("The GC content difference is 12.0%."));
    assert!(rows[1][3].contains("They are on the different strands."));

    fs::write(fixture.path("gc.csv"), "tag,gc_ratio\nX.1,0.45\n")?;
    assert!(pipeline::run(&config).is_err());

    Ok(())
}
