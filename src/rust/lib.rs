//! Protein sequence statistics with a small persistent record store.
//!
//! A submitted sequence is validated against the 20 standard amino acids,
//! analyzed for length, average molecular weight and residue composition, and
//! stored in a RocksDB-backed table that can be searched, edited and pruned.

pub mod aminoacid;
pub mod composition;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod protein;
pub mod search;
pub mod store;
pub mod types;
pub mod view;

pub use crate::aminoacid::{validate_sequence, AminoAcid, Validation};
pub use crate::composition::{analyze, Composition, ResidueCounts};
pub use crate::config::AppConfig;
pub use crate::errors::{ProteinError, ProteinResult, StoreError};
pub use crate::handlers::ProteinService;
pub use crate::protein::{NewProtein, ProteinRecord};
pub use crate::search::SearchFilter;
pub use crate::store::{ProteinStore, RocksProteinStore};
pub use crate::types::ProteinId;

#[cfg(test)]
mod tests;
