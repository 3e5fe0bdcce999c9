use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use super::{require_columns, table_reader};
use crate::error::{Error, Result};
use crate::types::{CodonBiasTable, CodonUsage};

lazy_static! {
    // 'AAA': 0.0123   or   "AAA": 1e-3
    static ref ENTRY_RE: Regex =
        Regex::new(r#"^\s*(?:'([^']*)'|"([^"]*)")\s*:\s*(\S+)\s*$"#).unwrap();
}

#[derive(Debug, Deserialize)]
struct CodonBiasRow {
    tag: String,
    bias: String,
}

/// Load per-gene codon usage (comma-delimited `tag,bias`)
pub fn load_codon_bias(path: &Path) -> Result<CodonBiasTable> {
    let mut reader = table_reader(path, b',')?;
    require_columns(&mut reader, path, &["tag", "bias"])?;
    let headers = reader.headers()?.clone();

    let mut table = CodonBiasTable::new();
    for result in reader.records() {
        let record = result?;
        let row: CodonBiasRow = record.deserialize(Some(&headers))?;
        let usage = parse_codon_literal(&row.tag, &row.bias)?;
        table.insert(row.tag, usage);
    }

    debug!(
        "Loaded codon bias vectors for {} genes from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Parse a mapping literal such as `{'AAA': 0.01, 'AAC': 0.02}`.
///
/// `tag` is only used to label errors.
pub fn parse_codon_literal(tag: &str, literal: &str) -> Result<CodonUsage> {
    let invalid = |reason: String| Error::InvalidCodonLiteral {
        tag: tag.to_string(),
        reason,
    };

    let body = literal
        .trim()
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| invalid("expected a {...} mapping".to_string()))?;

    let mut usage = CodonUsage::new();
    let body = body.trim();
    if body.is_empty() {
        return Ok(usage);
    }
    let body = body.strip_suffix(',').unwrap_or(body);

    for entry in body.split(',') {
        let caps = ENTRY_RE
            .captures(entry)
            .ok_or_else(|| invalid(format!("bad entry {:?}", entry.trim())))?;
        let codon = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        let raw = &caps[3];
        let frequency: f64 = raw
            .parse()
            .map_err(|_| invalid(format!("bad frequency {:?} for {}", raw, codon)))?;

        usage.insert(codon, frequency);
    }

    Ok(usage)
}
