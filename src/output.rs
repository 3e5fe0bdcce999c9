use anyhow::{Context, Result};
use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::GenePairRecord;

/// Column names of the dataset file
pub const DATASET_HEADER: [&str; 5] = ["genome_id", "gene1", "gene2", "text", "label"];

/// Writes gene-pair records as a single CSV dataset
pub struct DatasetWriter {
    output_path: PathBuf,
}

impl DatasetWriter {
    pub fn new(output_path: &Path) -> Self {
        Self {
            output_path: output_path.to_path_buf(),
        }
    }

    /// Write every record in one pass and return the number of rows written
    pub fn write(&self, records: &[GenePairRecord]) -> Result<usize> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory {}", parent.display())
                })?;
            }
        }

        let mut wtr = Writer::from_path(&self.output_path).with_context(|| {
            format!(
                "Failed to create CSV writer for {}",
                self.output_path.display()
            )
        })?;

        wtr.write_record(DATASET_HEADER)?;

        for record in records {
            wtr.write_record(&[
                &record.genome_id,
                &record.gene1,
                &record.gene2,
                &record.text,
                &record.label.as_int().to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(records.len())
    }
}
