//! Plain-text views handed back by the request handlers.

use std::fmt;

use crate::aminoacid::AminoAcid;
use crate::protein::ProteinRecord;
use crate::search::SearchResult;
use crate::types::{ChartWidth, ProteinId};

const SEQUENCE_PREVIEW: usize = 30;

/// A single protein with its statistics and chart data
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinView {
    pub id: ProteinId,
    pub name: String,
    pub sequence: String,
    pub length: usize,
    pub molecular_weight: f64,
    pub unique_count: usize,
    /// `(symbol, count)` for all 20 residues, alphabet order
    pub frequencies: Vec<(char, u32)>,
}

impl From<ProteinRecord> for ProteinView {
    fn from(record: ProteinRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            sequence: record.sequence,
            length: record.length,
            molecular_weight: record.molecular_weight,
            unique_count: record.unique_count,
            frequencies: record.frequencies.to_pairs(),
        }
    }
}

/// Bar length for `count`, scaled so that `max` fills `width`.
/// Non-zero counts always get at least one cell.
fn bar_len(count: u32, max: u32, width: usize) -> usize {
    if max == 0 || count == 0 {
        return 0;
    }
    (count as usize * width).div_ceil(max as usize)
}

impl ProteinView {
    /// Report with the frequency chart scaled to `width` cells
    pub fn render(&self, width: ChartWidth) -> ProteinReport<'_> {
        ProteinReport { view: self, width }
    }
}

impl fmt::Display for ProteinView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.render(ChartWidth::default()), f)
    }
}

/// A [`ProteinView`] paired with the chart width it is drawn at
#[derive(Debug, Clone, Copy)]
pub struct ProteinReport<'a> {
    view: &'a ProteinView,
    width: ChartWidth,
}

impl fmt::Display for ProteinReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view;
        let width = self.width.get();
        let max = view.frequencies.iter().map(|(_, n)| *n).max().unwrap_or(0);

        writeln!(f, "Protein #{}: {}", view.id, view.name)?;
        writeln!(f, "Sequence:          {}", view.sequence)?;
        writeln!(f, "Length:            {}", view.length)?;
        writeln!(f, "Molecular weight:  {:.2} Da", view.molecular_weight)?;
        writeln!(f, "Unique residues:   {}", view.unique_count)?;
        writeln!(f)?;
        writeln!(f, "Residue frequencies")?;

        for (symbol, count) in &view.frequencies {
            let bar = "#".repeat(bar_len(*count, max, width));
            writeln!(f, "{} | {:<w$} {}", symbol, bar, count, w = width)?;
        }
        Ok(())
    }
}

/// Search listing, with the queries echoed back
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchView {
    pub query_name: String,
    pub query_sequence: String,
    pub results: Vec<SearchResult>,
}

fn preview(sequence: &str) -> String {
    if sequence.len() > SEQUENCE_PREVIEW {
        format!("{}...", &sequence[..SEQUENCE_PREVIEW])
    } else {
        sequence.to_string()
    }
}

impl fmt::Display for SearchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.query_name.is_empty() {
            writeln!(f, "Name contains:     {}", self.query_name)?;
        }
        if !self.query_sequence.is_empty() {
            writeln!(f, "Sequence contains: {}", self.query_sequence)?;
        }

        if self.results.is_empty() {
            return writeln!(f, "No proteins found.");
        }

        writeln!(f, "Found {} protein(s)", self.results.len())?;
        writeln!(
            f,
            "{:>6}  {:<24} {:>8} {:>12} {:>6}  {}",
            "ID", "Name", "Length", "Weight (Da)", "Unique", "Sequence"
        )?;
        for result in &self.results {
            writeln!(
                f,
                "{:>6}  {:<24} {:>8} {:>12.2} {:>6}  {}",
                result.id,
                result.name,
                result.length,
                result.molecular_weight,
                result.unique_count,
                preview(&result.sequence)
            )?;
        }
        Ok(())
    }
}

/// Reference table of the 20 residues and their average weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReferenceView;

impl fmt::Display for ReferenceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<6} {:<5} {:<15} {:>12}", "Code", "Abbr", "Name", "Weight (Da)")?;
        for aa in AminoAcid::ALL {
            writeln!(
                f,
                "{:<6} {:<5} {:<15} {:>12.2}",
                aa.symbol(),
                aa.three_letter_code(),
                aa.full_name(),
                aa.average_weight()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protein::NewProtein;

    fn insulin_view() -> ProteinView {
        NewProtein::from_sequence("Insulin-A", "GIVGQCC").with_id(ProteinId(1)).into()
    }

    #[test]
    fn test_bar_len() {
        assert_eq!(bar_len(0, 5, 40), 0);
        assert_eq!(bar_len(5, 5, 40), 40);
        assert_eq!(bar_len(1, 100, 40), 1);
        assert_eq!(bar_len(1, 2, 10), 5);
        assert_eq!(bar_len(3, 0, 10), 0);
    }

    #[test]
    fn test_protein_view_render() {
        let text = insulin_view().render(ChartWidth(4)).to_string();

        assert!(text.contains("Protein #1: Insulin-A"));
        assert!(text.contains("Molecular weight:  786.91 Da"));
        assert!(text.contains("Unique residues:   5"));
        assert!(text.contains("G | #### 2"));
        assert!(text.contains("I | ##   1"));
        assert!(text.contains("A |      0"));
    }

    #[test]
    fn test_protein_view_lists_every_residue() {
        let view = insulin_view();
        assert_eq!(view.frequencies.len(), 20);
        assert_eq!(view.to_string().lines().filter(|l| l.contains(" | ")).count(), 20);
    }

    #[test]
    fn test_search_view_empty() {
        let view = SearchView { query_sequence: "ZZZZ".into(), ..SearchView::default() };
        let text = view.to_string();
        assert!(text.contains("Sequence contains: ZZZZ"));
        assert!(text.contains("No proteins found."));
    }

    #[test]
    fn test_search_view_truncates_long_sequences() {
        let long = "A".repeat(50);
        let record = NewProtein::from_sequence("long", &long).with_id(ProteinId(2));
        let view = SearchView { results: vec![SearchResult::from(&record)], ..Default::default() };
        let text = view.to_string();

        assert!(text.contains("Found 1 protein(s)"));
        assert!(text.contains(&format!("{}...", "A".repeat(30))));
        assert!(!text.contains(&long));
    }

    #[test]
    fn test_reference_view() {
        let text = ReferenceView.to_string();
        assert_eq!(text.lines().count(), 21);
        assert!(text.contains("Trp   Tryptophan"));
        assert!(text.contains("204.23"));
    }
}
