use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A type-safe wrapper for stored protein identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProteinId(pub u64);

impl ProteinId {
    /// Get the raw value
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Big-endian bytes, so that byte order equals numeric order
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; 8] = bytes.try_into().ok()?;
        Some(ProteinId(u64::from_be_bytes(raw)))
    }
}

impl fmt::Display for ProteinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProteinId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ProteinId)
            .map_err(|_| format!("Invalid protein id: '{}'. Must be a non-negative integer", s))
    }
}

/// A type-safe wrapper for chart widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartWidth(pub usize);

impl ChartWidth {
    /// Create a new chart width with validation
    pub fn new(width: usize) -> Result<Self, String> {
        if width == 0 {
            Err("Chart width must be greater than 0".to_string())
        } else if width > 200 {
            Err(format!("Chart width too large: {} (max 200)", width))
        } else {
            Ok(ChartWidth(width))
        }
    }

    /// Get the raw value
    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for ChartWidth {
    fn default() -> Self {
        ChartWidth(40)
    }
}

impl fmt::Display for ChartWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
