//! Natural-language rendering of gene-pair features.

use crate::types::{format_decimal, Gene};

/// An optional feature: not requested for this run, requested but missing for this pair, or known
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Annotation<T> {
    NotRequested,
    Unavailable,
    Known(T),
}

impl<T> Annotation<T> {
    pub fn is_requested(&self) -> bool {
        !matches!(self, Annotation::NotRequested)
    }
}

/// Derived features of one adjacent gene pair
#[derive(Debug, Clone)]
pub struct PairFeatures<'a> {
    pub gene1: &'a Gene,
    pub gene2: &'a Gene,
    pub intergenic_distance: i64,
    /// Absolute GC difference in percentage points, rounded to one place
    pub gc_difference: f64,
    pub strand_relation: &'static str,
    /// Fraction of representative genomes with the two families adjacent
    pub conservation: f64,
    pub interaction_score: Annotation<i64>,
    pub codon_distance: Annotation<f64>,
}

/// Render the description of a gene pair.
///
/// Output depends only on `features`, so identical inputs always give byte-identical text.
pub fn render_description(features: &PairFeatures<'_>) -> String {
    let g1 = features.gene1;
    let g2 = features.gene2;

    let mut text = format!(
        "Gene A is {} bp long, annotated as \"{}\", and is part of the {} family. \
         It is followed by Gene B, {} bp long, annotated as \"{}\", and is part of the {} family. \
         The intergenic distance is {} base pairs. \
         The GC content difference is {}%. \
         They are on the {}. \
         They are adjacent in {:.1}% of representative genomes.",
        g1.length,
        g1.product,
        g1.family,
        g2.length,
        g2.product,
        g2.family,
        features.intergenic_distance,
        format_decimal(features.gc_difference),
        features.strand_relation,
        features.conservation * 100.0,
    );

    match features.interaction_score {
        Annotation::NotRequested => {}
        Annotation::Known(score) => {
            text.push_str(&format!(" Their String score is {}.", score));
        }
        Annotation::Unavailable => text.push_str(" Their String score is unavailable."),
    }

    match features.codon_distance {
        Annotation::NotRequested => {}
        Annotation::Known(distance) => {
            text.push_str(&format!(
                " The codon bias difference between the genes is {:.2}.",
                distance
            ));
        }
        Annotation::Unavailable => {
            text.push_str(" Codon bias information is not available for both genes.")
        }
    }

    text
}
