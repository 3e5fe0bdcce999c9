//! Readers for the delimited input tables.

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

pub mod auxiliary;
pub mod codon;
pub mod features;

pub use auxiliary::{load_conservation, load_gc_ratios, load_interaction_scores, load_labels};
pub use codon::{load_codon_bias, parse_codon_literal};
pub use features::{genome_id_from_path, parse_genome, FeatureTableParser};

/// Open a file for reading, decompressing it if the name ends in `.gz`
pub fn open_file(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)?;
    let reader: Box<dyn Read> = if path.extension().map_or(false, |ext| ext == "gz") {
        Box::new(MultiGzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(reader)
}

/// Build a CSV reader over `path` with the given field delimiter
pub fn table_reader(path: &Path, delimiter: u8) -> Result<csv::Reader<Box<dyn Read>>> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(open_file(path)?);

    Ok(reader)
}

/// Fail unless every column in `required` is present in the header row
pub fn require_columns<R: Read>(
    reader: &mut csv::Reader<R>,
    path: &Path,
    required: &[&str],
) -> Result<()> {
    let headers = reader.headers()?;
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(Error::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}

/// Parse one field, reporting the file, line and column on failure
pub(crate) fn parse_field<T: FromStr>(
    raw: &str,
    field: &'static str,
    path: &Path,
    position: Option<&csv::Position>,
) -> Result<T> {
    raw.trim().parse().map_err(|_| Error::InvalidField {
        path: path.to_path_buf(),
        line: position.map_or(0, |p| p.line()),
        field,
        value: raw.to_string(),
    })
}
