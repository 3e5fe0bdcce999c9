use tracing::debug;

use crate::error::{Error, Result};
use crate::text::{render_description, Annotation, PairFeatures};
use crate::types::*;

/// Counters gathered while serializing gene pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairStats {
    pub genomes: usize,
    pub genes: usize,
    pub pairs_examined: usize,
    /// Pairs dropped because the first gene has no label
    pub skipped_unlabeled: usize,
    pub records: usize,
    pub conservation_hits: usize,
    pub conservation_misses: usize,
    pub interaction_hits: usize,
    pub interaction_misses: usize,
    pub codon_available: usize,
    pub codon_unavailable: usize,
}

impl PairStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, features: &PairFeatures<'_>) {
        if features.conservation == 0.0 {
            self.conservation_misses += 1;
        } else {
            self.conservation_hits += 1;
        }

        match features.interaction_score {
            Annotation::Known(_) => self.interaction_hits += 1,
            Annotation::Unavailable => self.interaction_misses += 1,
            Annotation::NotRequested => {}
        }

        match features.codon_distance {
            Annotation::Known(_) => self.codon_available += 1,
            Annotation::Unavailable => self.codon_unavailable += 1,
            Annotation::NotRequested => {}
        }
    }
}

/// Joins auxiliary tables onto adjacent genes and renders one record per labeled pair
pub struct PairSerializer<'a> {
    tables: &'a AuxiliaryTables,
}

impl<'a> PairSerializer<'a> {
    pub fn new(tables: &'a AuxiliaryTables) -> Self {
        Self { tables }
    }

    /// Serialize every adjacent pair of one genome.
    ///
    /// `genes` must already be ordered by start position.
    pub fn serialize_genome(
        &self,
        genome_id: &str,
        genes: &[Gene],
        stats: &mut PairStats,
    ) -> Result<Vec<GenePairRecord>> {
        stats.genomes += 1;
        stats.genes += genes.len();

        let mut records = Vec::new();
        for pair in genes.windows(2) {
            let (gene1, gene2) = (&pair[0], &pair[1]);
            stats.pairs_examined += 1;

            let label = match self.tables.labels.get(&gene1.id) {
                Some(label) => *label,
                None => {
                    stats.skipped_unlabeled += 1;
                    continue;
                }
            };

            let features = self.pair_features(gene1, gene2)?;
            stats.record(&features);

            records.push(GenePairRecord {
                genome_id: genome_id.to_string(),
                gene1: gene1.id.clone(),
                gene2: gene2.id.clone(),
                text: render_description(&features),
                label,
            });
        }

        debug!(
            "Genome {}: {} genes, {} records",
            genome_id,
            genes.len(),
            records.len()
        );
        stats.records += records.len();
        Ok(records)
    }

    /// Derive the joined features of `gene1` followed by `gene2`
    pub fn pair_features<'g>(&self, gene1: &'g Gene, gene2: &'g Gene) -> Result<PairFeatures<'g>> {
        let gc1 = self.gc_percent(gene1)?;
        let gc2 = self.gc_percent(gene2)?;

        // Keyed on family ids even though the conservation table is keyed on
        // whatever ids its source file used.
        let conservation = self
            .tables
            .conservation
            .get(&(gene1.family.clone(), gene2.family.clone()))
            .copied()
            .unwrap_or(0.0);

        Ok(PairFeatures {
            gene1,
            gene2,
            intergenic_distance: gene2.start - gene1.end_exclusive(),
            gc_difference: round_half_even((gc1 - gc2).abs(), 1),
            strand_relation: gene1.strand.relation(gene2.strand),
            conservation,
            interaction_score: self.interaction_score(gene1, gene2),
            codon_distance: self.codon_distance(&gene1.id, &gene2.id),
        })
    }

    /// Interaction score of the ordered pair. The reverse order is not consulted.
    pub fn interaction_score(&self, gene1: &Gene, gene2: &Gene) -> Annotation<i64> {
        match &self.tables.interactions {
            None => Annotation::NotRequested,
            Some(table) => match table.get(&(gene1.id.clone(), gene2.id.clone())) {
                Some(score) => Annotation::Known(*score),
                None => Annotation::Unavailable,
            },
        }
    }

    /// Euclidean distance between two genes' codon usage
    pub fn codon_distance(&self, peg1: &str, peg2: &str) -> Annotation<f64> {
        match &self.tables.codon_bias {
            None => Annotation::NotRequested,
            Some(table) => match (table.get(peg1), table.get(peg2)) {
                (Some(v1), Some(v2)) => Annotation::Known(v1.distance(v2)),
                _ => Annotation::Unavailable,
            },
        }
    }

    fn gc_percent(&self, gene: &Gene) -> Result<f64> {
        self.tables
            .gc
            .get(&gene.id)
            .copied()
            .ok_or_else(|| Error::MissingGcRatio {
                gene: gene.id.clone(),
            })
    }
}
