use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use super::{parse_field, require_columns, table_reader};
use crate::error::{Error, Result};
use crate::types::*;

#[derive(Debug, Deserialize)]
struct GcRow {
    tag: String,
    gc_ratio: String,
}

#[derive(Debug, Deserialize)]
struct LabelRow {
    tag: String,
    label: String,
}

#[derive(Debug, Deserialize)]
struct ConservationRow {
    gene1_id: String,
    gene2_id: String,
    conservation_score: String,
}

#[derive(Debug, Deserialize)]
struct InteractionRow {
    peg1: String,
    peg2: String,
    string: String,
}

/// Load per-gene GC ratios (comma-delimited `tag,gc_ratio`).
///
/// Ratios are fractions; the table stores them rounded to two places and
/// scaled to percent.
pub fn load_gc_ratios(path: &Path) -> Result<GcTable> {
    let mut reader = table_reader(path, b',')?;
    require_columns(&mut reader, path, &["tag", "gc_ratio"])?;
    let headers = reader.headers()?.clone();

    let mut table = GcTable::new();
    for result in reader.records() {
        let record = result?;
        let row: GcRow = record.deserialize(Some(&headers))?;
        let ratio: f64 = parse_field(&row.gc_ratio, "gc_ratio", path, record.position())?;
        table.insert(row.tag, round_half_even(ratio, 2) * 100.0);
    }

    debug!("Loaded {} GC ratios from {}", table.len(), path.display());
    Ok(table)
}

/// Load binary labels (comma-delimited `tag,label`)
pub fn load_labels(path: &Path) -> Result<LabelTable> {
    let mut reader = table_reader(path, b',')?;
    require_columns(&mut reader, path, &["tag", "label"])?;
    let headers = reader.headers()?.clone();

    let mut table = LabelTable::new();
    for result in reader.records() {
        let record = result?;
        let row: LabelRow = record.deserialize(Some(&headers))?;
        let value: i64 = parse_field(&row.label, "label", path, record.position())?;
        let label = Label::from_int(value).ok_or_else(|| Error::InvalidField {
            path: path.to_path_buf(),
            line: record.position().map_or(0, |p| p.line()),
            field: "label",
            value: row.label.clone(),
        })?;
        table.insert(row.tag, label);
    }

    debug!("Loaded {} labels from {}", table.len(), path.display());
    Ok(table)
}

/// Load pairwise conservation scores (tab-delimited).
///
/// Keys are kept in the order given by the file; `(a, b)` does not imply `(b, a)`.
pub fn load_conservation(path: &Path) -> Result<ConservationTable> {
    let mut reader = table_reader(path, b'\t')?;
    require_columns(
        &mut reader,
        path,
        &["gene1_id", "gene2_id", "conservation_score"],
    )?;
    let headers = reader.headers()?.clone();

    let mut table = ConservationTable::new();
    for result in reader.records() {
        let record = result?;
        let row: ConservationRow = record.deserialize(Some(&headers))?;
        let score: f64 = parse_field(
            &row.conservation_score,
            "conservation_score",
            path,
            record.position(),
        )?;
        table.insert((row.gene1_id, row.gene2_id), round_half_even(score, 2));
    }

    debug!(
        "Loaded {} conservation scores from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Load interaction scores (comma-delimited `peg1,peg2,string`), storing both orders
pub fn load_interaction_scores(path: &Path) -> Result<InteractionTable> {
    let mut reader = table_reader(path, b',')?;
    require_columns(&mut reader, path, &["peg1", "peg2", "string"])?;
    let headers = reader.headers()?.clone();

    let mut table = InteractionTable::new();
    for result in reader.records() {
        let record = result?;
        let row: InteractionRow = record.deserialize(Some(&headers))?;
        let score: i64 = parse_field(&row.string, "string", path, record.position())?;

        table.insert((row.peg1.clone(), row.peg2.clone()), score);
        table.insert((row.peg2, row.peg1), score);
    }

    debug!(
        "Loaded {} interaction entries from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}
