//! Request handlers: form input in, views out.
//!
//! Every handler validates its input before touching the store, so a rejected
//! submission never costs a database round trip.

use crate::aminoacid::{validate_sequence, Validation};
use crate::config::{AppConfig, DisplayConfig};
use crate::errors::{ProteinError, ProteinResult};
use crate::protein::NewProtein;
use crate::search::{SearchFilter, SearchResult};
use crate::store::ProteinStore;
use crate::types::ProteinId;
use crate::view::{ProteinView, SearchView};

/// Fields of the submit and edit forms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProteinForm {
    pub name: String,
    pub sequence: String,
}

impl ProteinForm {
    pub fn new(name: &str, sequence: &str) -> Self {
        Self { name: name.to_string(), sequence: sequence.to_string() }
    }

    /// Trim, check presence, validate the alphabet and derive statistics
    pub fn validate(&self) -> ProteinResult<NewProtein> {
        let name = self.name.trim();
        if name.is_empty() {
            log::warn!("Rejected submission without a protein name");
            return Err(ProteinError::MissingInput { field: "name" });
        }

        let raw = self.sequence.trim();
        if raw.is_empty() {
            log::warn!("Rejected submission '{}' without a sequence", name);
            return Err(ProteinError::MissingInput { field: "sequence" });
        }

        match validate_sequence(raw) {
            Validation::Valid(sequence) => Ok(NewProtein::from_sequence(name, &sequence)),
            Validation::Invalid(characters) => {
                log::warn!("Rejected sequence for '{}': invalid characters {:?}", name, characters);
                Err(ProteinError::InvalidSequence { characters })
            }
        }
    }
}

/// Fields of the search form. Both are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub name: Option<String>,
    pub sequence: Option<String>,
}

impl SearchForm {
    /// The name query is trimmed; the sequence query is trimmed and upper-cased
    pub fn normalized(&self) -> (String, String) {
        let name = self.name.as_deref().unwrap_or_default().trim().to_string();
        let sequence = self.sequence.as_deref().unwrap_or_default().trim().to_uppercase();
        (name, sequence)
    }
}

/// Glue between the front end and a [`ProteinStore`]
pub struct ProteinService<S: ProteinStore> {
    store: S,
    display: DisplayConfig,
}

impl<S: ProteinStore> ProteinService<S> {
    pub fn new(store: S, config: &AppConfig) -> Self {
        Self { store, display: config.display.clone() }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Validate, analyze and persist a new protein
    pub fn analyze(&self, form: &ProteinForm) -> ProteinResult<ProteinView> {
        let protein = form.validate()?;
        let id = self.store.create(&protein)?;
        Ok(protein.with_id(id).into())
    }

    pub fn search(&self, form: &SearchForm) -> ProteinResult<SearchView> {
        let (name, sequence) = form.normalized();
        let filter = SearchFilter::new(Some(name.as_str()), Some(sequence.as_str()));
        let records = self.store.search(&filter)?;

        Ok(SearchView {
            query_name: filter.name().unwrap_or_default().to_string(),
            query_sequence: filter.sequence().unwrap_or_default().to_string(),
            results: records.iter().map(SearchResult::from).collect(),
        })
    }

    pub fn view(&self, id: ProteinId) -> ProteinResult<ProteinView> {
        Ok(self.store.get_by_id(id)?.into())
    }

    /// Replace name, sequence and every derived field of an existing protein
    pub fn edit(&self, id: ProteinId, form: &ProteinForm) -> ProteinResult<ProteinView> {
        let protein = form.validate()?;
        self.store.update(id, &protein)?;
        Ok(protein.with_id(id).into())
    }

    pub fn delete(&self, id: ProteinId) -> ProteinResult<()> {
        self.store.delete(id)?;
        Ok(())
    }
}
