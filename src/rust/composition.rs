//! Amino acid composition of a protein sequence.
//!
//! [`analyze`] turns a validated, upper-cased sequence into its length,
//! average molecular weight, number of distinct residues and per-residue
//! counts. The counts live in [`ResidueCounts`], which always holds exactly
//! one slot per standard amino acid.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::aminoacid::{AminoAcid, STANDARD_AA};

/// Occurrence count of each of the 20 standard residues.
///
/// Serializes as a JSON object keyed by one-letter code, e.g.
/// `{"A":2,"R":0,...}`. Deserialization requires every key exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ResidueCounts([u32; 20]);

impl ResidueCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, aa: AminoAcid) -> u32 {
        self.0[aa.index()]
    }

    pub fn increment(&mut self, aa: AminoAcid) {
        self.0[aa.index()] += 1;
    }

    /// Total number of counted residues
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&n| n as u64).sum()
    }

    /// Number of residues with a non-zero count
    pub fn distinct(&self) -> usize {
        self.0.iter().filter(|&&n| n > 0).count()
    }

    /// `(residue, count)` pairs in alphabet order
    pub fn iter(&self) -> impl Iterator<Item = (AminoAcid, u32)> + '_ {
        AminoAcid::ALL.iter().map(move |&aa| (aa, self.get(aa)))
    }

    /// `(symbol, count)` pairs in alphabet order, ready for charting
    pub fn to_pairs(&self) -> Vec<(char, u32)> {
        self.iter().map(|(aa, n)| (aa.symbol(), n)).collect()
    }

    /// Encodes the counts as the JSON text blob stored alongside a record
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

impl Serialize for ResidueCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(STANDARD_AA.len()))?;
        for (aa, count) in self.iter() {
            map.serialize_entry(&aa.symbol(), &count)?;
        }
        map.end()
    }
}

struct ResidueCountsVisitor;

impl<'de> Visitor<'de> for ResidueCountsVisitor {
    type Value = ResidueCounts;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from each of the 20 amino acid codes to a count")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut seen: BTreeMap<AminoAcid, u32> = BTreeMap::new();

        while let Some((key, count)) = access.next_entry::<char, u32>()? {
            let aa = AminoAcid::from_char(key).ok_or_else(|| {
                <A::Error as de::Error>::custom(format!("unknown amino acid code '{}'", key))
            })?;
            if seen.insert(aa, count).is_some() {
                return Err(de::Error::custom(format!("duplicate amino acid code '{}'", key)));
            }
        }

        if let Some(missing) = AminoAcid::ALL.iter().find(|aa| !seen.contains_key(*aa)) {
            return Err(de::Error::custom(format!(
                "missing amino acid code '{}'",
                missing.symbol()
            )));
        }

        let mut counts = ResidueCounts::new();
        for (aa, count) in seen {
            counts.0[aa.index()] = count;
        }
        Ok(counts)
    }
}

impl<'de> Deserialize<'de> for ResidueCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ResidueCountsVisitor)
    }
}

/// Descriptive statistics derived from a protein sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub length: usize,
    /// Daltons, rounded to 2 decimals
    pub molecular_weight: f64,
    pub unique_count: usize,
    pub frequencies: ResidueCounts,
}

/// Rounds to 2 decimal places, halves away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum of average residue weights, rounded to 2 decimals.
/// Characters outside the alphabet weigh nothing.
pub fn molecular_weight(sequence: &str) -> f64 {
    let total: f64 = sequence
        .chars()
        .filter_map(AminoAcid::from_char)
        .map(AminoAcid::average_weight)
        .sum();
    round2(total)
}

/// Per-residue counts. Characters outside the alphabet are not counted.
pub fn residue_frequencies(sequence: &str) -> ResidueCounts {
    let mut counts = ResidueCounts::new();
    for aa in sequence.chars().filter_map(AminoAcid::from_char) {
        counts.increment(aa);
    }
    counts
}

/// Computes the composition of an already validated, upper-cased sequence.
pub fn analyze(sequence: &str) -> Composition {
    let frequencies = residue_frequencies(sequence);
    Composition {
        length: sequence.chars().count(),
        molecular_weight: molecular_weight(sequence),
        unique_count: frequencies.distinct(),
        frequencies,
    }
}
