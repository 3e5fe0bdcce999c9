use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Product text used when a coding feature carries no annotation
pub const HYPOTHETICAL_PROTEIN: &str = "hypothetical protein";

/// Strand of a coding feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse the `strand` column of a feature table ("+" or "-")
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s.trim() {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }

    /// Phrase used in pair descriptions
    pub fn relation(self, other: Strand) -> &'static str {
        if self == other {
            "same strand"
        } else {
            "different strands"
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// One protein-coding gene taken from a genome feature table
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    pub start: i64,
    pub id: String,
    pub length: i64,
    pub strand: Strand,
    pub product: String,
    pub family: String,
}

impl Gene {
    /// First position after the gene, as used for intergenic distance
    pub fn end_exclusive(&self) -> i64 {
        self.start + self.length
    }
}

/// Binary class attached to the first gene of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Label::Negative),
            1 => Some(Label::Positive),
            _ => None,
        }
    }

    pub fn as_int(self) -> u8 {
        match self {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }
}

/// One output row of the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct GenePairRecord {
    pub genome_id: String,
    pub gene1: String,
    pub gene2: String,
    pub text: String,
    pub label: Label,
}

/// Ordered pair of identifiers used as a lookup key
pub type PairKey = (String, String);

/// gene id -> GC content in percent
pub type GcTable = HashMap<String, f64>;

/// gene id -> label
pub type LabelTable = HashMap<String, Label>;

/// (id, id) -> fraction of representative genomes with the pair adjacent
pub type ConservationTable = HashMap<PairKey, f64>;

/// (peg, peg) -> interaction score, stored in both orders
pub type InteractionTable = HashMap<PairKey, i64>;

/// gene id -> codon usage
pub type CodonBiasTable = HashMap<String, CodonUsage>;

/// Codon usage frequencies of a single gene. Codons absent from the map count as 0.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodonUsage {
    frequencies: BTreeMap<String, f64>,
}

impl CodonUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, codon: impl Into<String>, frequency: f64) {
        self.frequencies.insert(codon.into(), frequency);
    }

    pub fn frequency(&self, codon: &str) -> f64 {
        self.frequencies.get(codon).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn codons(&self) -> impl Iterator<Item = &str> {
        self.frequencies.keys().map(String::as_str)
    }

    /// Euclidean distance over the union of codons present in either vector
    pub fn distance(&self, other: &CodonUsage) -> f64 {
        let mut codons: Vec<&str> = self.codons().chain(other.codons()).collect();
        codons.sort_unstable();
        codons.dedup();

        codons
            .iter()
            .map(|codon| {
                let d = self.frequency(codon) - other.frequency(codon);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}

impl FromIterator<(String, f64)> for CodonUsage {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            frequencies: iter.into_iter().collect(),
        }
    }
}

/// All lookup tables joined against each gene pair. Built once per run, then read-only.
#[derive(Debug, Clone, Default)]
pub struct AuxiliaryTables {
    pub gc: GcTable,
    pub labels: LabelTable,
    pub conservation: ConservationTable,
    pub codon_bias: Option<CodonBiasTable>,
    pub interactions: Option<InteractionTable>,
}

/// Round to `digits` decimal places, ties to even on the exact binary value.
///
/// Scaling first (`value * 100`) would turn near-ties such as 0.065 into exact
/// ties, so the rounding goes through fixed-precision formatting instead.
pub fn round_half_even(value: f64, digits: usize) -> f64 {
    format!("{:.*}", digits, value).parse().unwrap_or(value)
}

/// Shortest round-trip rendering of a float that always keeps a fractional part ("5.0", "12.3")
pub fn format_decimal(value: f64) -> String {
    format!("{:?}", value)
}
