use serde::Deserialize;
use std::path::Path;

use super::{parse_field, require_columns, table_reader};
use crate::error::{Error, Result};
use crate::types::*;

/// Columns a feature table must provide
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "feature_type",
    "start",
    "end",
    "patric_id",
    "strand",
    "product",
    "pgfam_id",
];

/// Source-database prefix carried by every `patric_id` ("fig|")
const PATRIC_PREFIX_LEN: usize = 4;

#[derive(Debug, Deserialize)]
struct FeatureRow {
    feature_type: String,
    start: String,
    end: String,
    patric_id: String,
    strand: String,
    product: String,
    pgfam_id: String,
}

/// Parser for BV-BRC/PATRIC `*.features.tab` genome feature tables
pub struct FeatureTableParser {
    feature_type: String,
}

impl FeatureTableParser {
    pub fn new() -> Self {
        Self {
            feature_type: "CDS".to_string(),
        }
    }

    /// Read the coding genes of one genome, ordered by start position.
    ///
    /// The sort is stable, so genes sharing a start keep their file order.
    pub fn parse(&self, path: &Path) -> Result<Vec<Gene>> {
        let mut reader = table_reader(path, b'\t')?;
        require_columns(&mut reader, path, &REQUIRED_COLUMNS)?;
        let headers = reader.headers()?.clone();

        let mut genes = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: FeatureRow = record.deserialize(Some(&headers))?;
            if row.feature_type != self.feature_type {
                continue;
            }

            genes.push(self.parse_gene(row, path, record.position())?);
        }

        genes.sort_by_key(|gene| gene.start);
        Ok(genes)
    }

    fn parse_gene(
        &self,
        row: FeatureRow,
        path: &Path,
        position: Option<&csv::Position>,
    ) -> Result<Gene> {
        let start: i64 = parse_field(&row.start, "start", path, position)?;
        let end: i64 = parse_field(&row.end, "end", path, position)?;

        let invalid = |field: &'static str, value: &str| Error::InvalidField {
            path: path.to_path_buf(),
            line: position.map_or(0, |p| p.line()),
            field,
            value: value.to_string(),
        };

        let id = row
            .patric_id
            .get(PATRIC_PREFIX_LEN..)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| invalid("patric_id", &row.patric_id))?
            .to_string();
        let strand = Strand::from_symbol(&row.strand).ok_or_else(|| invalid("strand", &row.strand))?;

        let product = if row.product.is_empty() {
            HYPOTHETICAL_PROTEIN.to_string()
        } else {
            row.product
        };

        Ok(Gene {
            start,
            id,
            length: (end - start).abs() + 1,
            strand,
            product,
            family: row.pgfam_id,
        })
    }
}

impl Default for FeatureTableParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper around [`FeatureTableParser::parse`]
pub fn parse_genome(path: &Path) -> Result<Vec<Gene>> {
    FeatureTableParser::new().parse(path)
}

/// Genome id encoded in a feature file name: everything before the first '.'
pub fn genome_id_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    name.split('.').next().unwrap_or_default().to_string()
}
