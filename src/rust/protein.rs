use serde::{Deserialize, Serialize};

use crate::composition::{analyze, ResidueCounts};
use crate::types::ProteinId;

/// Everything stored for a protein except its id.
///
/// Built only through [`NewProtein::from_sequence`], so the derived fields
/// always match the sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProtein {
    pub name: String,
    pub sequence: String,
    pub length: usize,
    pub molecular_weight: f64,
    pub unique_count: usize,
    pub frequencies: ResidueCounts,
}

impl NewProtein {
    /// Derive all statistics from a validated, upper-cased sequence
    pub fn from_sequence(name: &str, sequence: &str) -> Self {
        let composition = analyze(sequence);
        Self {
            name: name.to_string(),
            sequence: sequence.to_string(),
            length: composition.length,
            molecular_weight: composition.molecular_weight,
            unique_count: composition.unique_count,
            frequencies: composition.frequencies,
        }
    }

    pub fn with_id(self, id: ProteinId) -> ProteinRecord {
        ProteinRecord {
            id,
            name: self.name,
            sequence: self.sequence,
            length: self.length,
            molecular_weight: self.molecular_weight,
            unique_count: self.unique_count,
            frequencies: self.frequencies,
        }
    }
}

/// A persisted protein entry with its derived statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinRecord {
    pub id: ProteinId,
    pub name: String,
    pub sequence: String,
    pub length: usize,
    pub molecular_weight: f64,
    pub unique_count: usize,
    pub frequencies: ResidueCounts,
}

/// On-disk shape of a record: the `proteins` row, with the frequencies kept
/// as a JSON text column.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ProteinRow {
    pub id: u64,
    pub name: String,
    pub sequence: String,
    pub length: usize,
    pub molecular_weight: f64,
    pub unique_count: usize,
    pub frequencies: String,
}

impl ProteinRow {
    pub(crate) fn encode(id: ProteinId, protein: &NewProtein) -> serde_json::Result<Self> {
        Ok(Self {
            id: id.get(),
            name: protein.name.clone(),
            sequence: protein.sequence.clone(),
            length: protein.length,
            molecular_weight: protein.molecular_weight,
            unique_count: protein.unique_count,
            frequencies: protein.frequencies.to_json()?,
        })
    }

    pub(crate) fn decode(self) -> serde_json::Result<ProteinRecord> {
        Ok(ProteinRecord {
            id: ProteinId(self.id),
            name: self.name,
            sequence: self.sequence,
            length: self.length,
            molecular_weight: self.molecular_weight,
            unique_count: self.unique_count,
            frequencies: ResidueCounts::from_json(&self.frequencies)?,
        })
    }
}
