use serde::{Deserialize, Serialize};

use crate::protein::ProteinRecord;

/// The supported search filter combinations.
///
/// Each present filter is a case-sensitive substring match against its field;
/// when both are present both must match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchFilter {
    /// No filter: every record
    #[default]
    All,
    Name(String),
    Sequence(String),
    NameAndSequence { name: String, sequence: String },
}

impl SearchFilter {
    /// Build a filter from optional queries. Empty strings count as absent.
    pub fn new(name: Option<&str>, sequence: Option<&str>) -> Self {
        let name = name.filter(|s| !s.is_empty()).map(str::to_string);
        let sequence = sequence.filter(|s| !s.is_empty()).map(str::to_string);

        match (name, sequence) {
            (None, None) => SearchFilter::All,
            (Some(name), None) => SearchFilter::Name(name),
            (None, Some(sequence)) => SearchFilter::Sequence(sequence),
            (Some(name), Some(sequence)) => SearchFilter::NameAndSequence { name, sequence },
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            SearchFilter::Name(name) | SearchFilter::NameAndSequence { name, .. } => {
                Some(name.as_str())
            }
            _ => None,
        }
    }

    pub fn sequence(&self) -> Option<&str> {
        match self {
            SearchFilter::Sequence(sequence)
            | SearchFilter::NameAndSequence { sequence, .. } => Some(sequence.as_str()),
            _ => None,
        }
    }

    /// Whether a record satisfies this filter
    pub fn matches(&self, record: &ProteinRecord) -> bool {
        match self {
            SearchFilter::All => true,
            SearchFilter::Name(name) => record.name.contains(name.as_str()),
            SearchFilter::Sequence(sequence) => record.sequence.contains(sequence.as_str()),
            SearchFilter::NameAndSequence { name, sequence } => {
                record.name.contains(name.as_str()) && record.sequence.contains(sequence.as_str())
            }
        }
    }
}

/// One row of a search listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    pub name: String,
    pub sequence: String,
    pub length: usize,
    pub molecular_weight: f64,
    pub unique_count: usize,
}

impl From<&ProteinRecord> for SearchResult {
    fn from(record: &ProteinRecord) -> Self {
        Self {
            id: record.id.get(),
            name: record.name.clone(),
            sequence: record.sequence.clone(),
            length: record.length,
            molecular_weight: record.molecular_weight,
            unique_count: record.unique_count,
        }
    }
}

/// Column names of [`SearchResult`], in field order
const CSV_HEADER: [&str; 6] =
    ["id", "name", "sequence", "length", "molecular_weight", "unique_count"];

/// Write search results as CSV. The header row is written even when there
/// are no results.
pub fn write_results_csv<W: std::io::Write>(
    results: &[SearchResult],
    writer: W,
) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(CSV_HEADER)?;
    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;
    Ok(())
}
