use std::fmt;

/// The 20 standard amino acids, in the order used for reports and charts
pub const STANDARD_AA: [char; 20] = [
    'A', 'R', 'N', 'D', 'C', 'E', 'Q', 'G', 'H', 'I', 'L', 'K', 'M', 'F', 'P', 'S', 'T', 'W', 'Y',
    'V',
];

/// One of the 20 standard amino acid residues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    Ala,
    Arg,
    Asn,
    Asp,
    Cys,
    Glu,
    Gln,
    Gly,
    His,
    Ile,
    Leu,
    Lys,
    Met,
    Phe,
    Pro,
    Ser,
    Thr,
    Trp,
    Tyr,
    Val,
}

impl AminoAcid {
    /// All residues, index-aligned with [`STANDARD_AA`]
    pub const ALL: [AminoAcid; 20] = [
        AminoAcid::Ala,
        AminoAcid::Arg,
        AminoAcid::Asn,
        AminoAcid::Asp,
        AminoAcid::Cys,
        AminoAcid::Glu,
        AminoAcid::Gln,
        AminoAcid::Gly,
        AminoAcid::His,
        AminoAcid::Ile,
        AminoAcid::Leu,
        AminoAcid::Lys,
        AminoAcid::Met,
        AminoAcid::Phe,
        AminoAcid::Pro,
        AminoAcid::Ser,
        AminoAcid::Thr,
        AminoAcid::Trp,
        AminoAcid::Tyr,
        AminoAcid::Val,
    ];

    /// Look up a residue by its one-letter code. Only upper-case codes match.
    pub fn from_char(c: char) -> Option<Self> {
        let aa = match c {
            'A' => AminoAcid::Ala,
            'R' => AminoAcid::Arg,
            'N' => AminoAcid::Asn,
            'D' => AminoAcid::Asp,
            'C' => AminoAcid::Cys,
            'E' => AminoAcid::Glu,
            'Q' => AminoAcid::Gln,
            'G' => AminoAcid::Gly,
            'H' => AminoAcid::His,
            'I' => AminoAcid::Ile,
            'L' => AminoAcid::Leu,
            'K' => AminoAcid::Lys,
            'M' => AminoAcid::Met,
            'F' => AminoAcid::Phe,
            'P' => AminoAcid::Pro,
            'S' => AminoAcid::Ser,
            'T' => AminoAcid::Thr,
            'W' => AminoAcid::Trp,
            'Y' => AminoAcid::Tyr,
            'V' => AminoAcid::Val,
            _ => return None,
        };
        Some(aa)
    }

    /// Position of this residue in [`AminoAcid::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// One-letter code
    pub fn symbol(self) -> char {
        STANDARD_AA[self.index()]
    }

    /// Average residue weight in Daltons
    pub fn average_weight(self) -> f64 {
        match self {
            AminoAcid::Ala => 89.09,
            AminoAcid::Arg => 174.20,
            AminoAcid::Asn => 132.12,
            AminoAcid::Asp => 133.10,
            AminoAcid::Cys => 121.15,
            AminoAcid::Glu => 147.13,
            AminoAcid::Gln => 146.15,
            AminoAcid::Gly => 75.07,
            AminoAcid::His => 155.16,
            AminoAcid::Ile => 131.17,
            AminoAcid::Leu => 131.17,
            AminoAcid::Lys => 146.19,
            AminoAcid::Met => 149.21,
            AminoAcid::Phe => 165.19,
            AminoAcid::Pro => 115.13,
            AminoAcid::Ser => 105.09,
            AminoAcid::Thr => 119.12,
            AminoAcid::Trp => 204.23,
            AminoAcid::Tyr => 181.19,
            AminoAcid::Val => 117.15,
        }
    }

    /// Three-letter code, e.g. "Gly"
    pub fn three_letter_code(self) -> &'static str {
        match self {
            AminoAcid::Ala => "Ala",
            AminoAcid::Arg => "Arg",
            AminoAcid::Asn => "Asn",
            AminoAcid::Asp => "Asp",
            AminoAcid::Cys => "Cys",
            AminoAcid::Glu => "Glu",
            AminoAcid::Gln => "Gln",
            AminoAcid::Gly => "Gly",
            AminoAcid::His => "His",
            AminoAcid::Ile => "Ile",
            AminoAcid::Leu => "Leu",
            AminoAcid::Lys => "Lys",
            AminoAcid::Met => "Met",
            AminoAcid::Phe => "Phe",
            AminoAcid::Pro => "Pro",
            AminoAcid::Ser => "Ser",
            AminoAcid::Thr => "Thr",
            AminoAcid::Trp => "Trp",
            AminoAcid::Tyr => "Tyr",
            AminoAcid::Val => "Val",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            AminoAcid::Ala => "Alanine",
            AminoAcid::Arg => "Arginine",
            AminoAcid::Asn => "Asparagine",
            AminoAcid::Asp => "Aspartic acid",
            AminoAcid::Cys => "Cysteine",
            AminoAcid::Glu => "Glutamic acid",
            AminoAcid::Gln => "Glutamine",
            AminoAcid::Gly => "Glycine",
            AminoAcid::His => "Histidine",
            AminoAcid::Ile => "Isoleucine",
            AminoAcid::Leu => "Leucine",
            AminoAcid::Lys => "Lysine",
            AminoAcid::Met => "Methionine",
            AminoAcid::Phe => "Phenylalanine",
            AminoAcid::Pro => "Proline",
            AminoAcid::Ser => "Serine",
            AminoAcid::Thr => "Threonine",
            AminoAcid::Trp => "Tryptophan",
            AminoAcid::Tyr => "Tyrosine",
            AminoAcid::Val => "Valine",
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Outcome of checking a submitted sequence against the amino acid alphabet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The trimmed, upper-cased sequence
    Valid(String),
    /// Offending characters in order of appearance, duplicates kept
    Invalid(Vec<char>),
}

/// Normalizes a raw sequence (trim, then upper-case) and checks every character
/// against the 20 letter alphabet.
///
/// An empty input is `Valid("")`; rejecting it is up to the caller.
pub fn validate_sequence(raw: &str) -> Validation {
    let normalized = raw.trim().to_uppercase();

    let invalid: Vec<char> =
        normalized.chars().filter(|c| AminoAcid::from_char(*c).is_none()).collect();

    if invalid.is_empty() {
        Validation::Valid(normalized)
    } else {
        Validation::Invalid(invalid)
    }
}

/// Joins offending characters the way they are shown to users: "X, Z"
pub fn format_invalid_chars(chars: &[char]) -> String {
    chars.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
}
