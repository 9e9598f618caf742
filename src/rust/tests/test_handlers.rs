use super::test_fixtures::*;
use crate::errors::ProteinError;
use crate::handlers::{ProteinForm, ProteinService, SearchForm};
use crate::store::ProteinStore;
use crate::types::ProteinId;

#[test]
fn test_analyze_stores_normalized_record() {
    let (store, config, _dir) = temp_store();
    let service = ProteinService::new(store, &config);

    let view = service.analyze(&ProteinForm::new(INSULIN_NAME, INSULIN_RAW)).unwrap();

    assert_eq!(view.sequence, INSULIN_SEQUENCE);
    assert_eq!(view.length, 7);
    assert_eq!(view.molecular_weight, INSULIN_WEIGHT);
    assert_eq!(view.unique_count, 5);
    let nonzero: Vec<(char, u32)> =
        view.frequencies.iter().copied().filter(|(_, n)| *n > 0).collect();
    assert_eq!(nonzero, vec![('C', 2), ('Q', 1), ('G', 2), ('I', 1), ('V', 1)]);

    assert_eq!(service.view(view.id).unwrap(), view);
}

#[test]
fn test_analyze_rejects_before_touching_the_store() {
    let (store, config, _dir) = temp_store();
    let service = ProteinService::new(store, &config);

    let err = service.analyze(&ProteinForm::new("bad", TEST_PROTEIN_INVALID)).unwrap_err();
    assert!(matches!(err, ProteinError::InvalidSequence { ref characters } if characters == &['X']));
    assert_eq!(err.to_string(), "Sequence contains invalid characters: X");

    let err = service.analyze(&ProteinForm::new("", INSULIN_RAW)).unwrap_err();
    assert!(matches!(err, ProteinError::MissingInput { .. }));

    assert_eq!(service.store().metrics().creates, 0);
    assert_eq!(service.store().count().unwrap(), 0);
}

#[test]
fn test_search_normalizes_sequence_query() {
    let (store, config, _dir) = temp_store();
    let service = ProteinService::new(store, &config);
    let stored = service.analyze(&ProteinForm::new(INSULIN_NAME, INSULIN_RAW)).unwrap();

    let view = service
        .search(&SearchForm { name: None, sequence: Some(" vgq ".to_string()) })
        .unwrap();
    assert_eq!(view.query_sequence, "VGQ");
    assert_eq!(view.results.len(), 1);
    assert_eq!(view.results[0].id, stored.id.get());

    let view =
        service.search(&SearchForm { name: Some("Insulin".into()), sequence: None }).unwrap();
    assert_eq!(view.results.len(), 1);

    let view =
        service.search(&SearchForm { name: None, sequence: Some("ZZZZ".into()) }).unwrap();
    assert!(view.results.is_empty());

    let view = service.search(&SearchForm::default()).unwrap();
    assert_eq!(view.results.len(), 1);
}

#[test]
fn test_edit_recomputes_statistics() {
    let (store, config, _dir) = temp_store();
    let service = ProteinService::new(store, &config);
    let stored = service.analyze(&ProteinForm::new(INSULIN_NAME, INSULIN_RAW)).unwrap();

    let edited = service.edit(stored.id, &ProteinForm::new(" Insulin-B ", "fvnq")).unwrap();
    assert_eq!(edited.name, "Insulin-B");
    assert_eq!(edited.sequence, "FVNQ");
    assert_eq!(edited.length, 4);
    assert_eq!(edited.molecular_weight, 560.61);
    assert_eq!(service.view(stored.id).unwrap(), edited);
}

#[test]
fn test_edit_errors() {
    let (store, config, _dir) = temp_store();
    let service = ProteinService::new(store, &config);
    let stored = service.analyze(&ProteinForm::new(INSULIN_NAME, INSULIN_RAW)).unwrap();

    let err = service.edit(ProteinId(99), &ProteinForm::new("x", "AC")).unwrap_err();
    assert!(matches!(err, ProteinError::NotFound(ProteinId(99))));

    let err = service.edit(stored.id, &ProteinForm::new("x", "A1")).unwrap_err();
    assert!(matches!(err, ProteinError::InvalidSequence { .. }));
    assert_eq!(service.view(stored.id).unwrap(), stored);
}

#[test]
fn test_edit_validates_before_looking_up_the_id() {
    let (store, config, _dir) = temp_store();
    let service = ProteinService::new(store, &config);

    let err = service.edit(ProteinId(99), &ProteinForm::new("x", "A1")).unwrap_err();
    assert!(matches!(err, ProteinError::InvalidSequence { ref characters } if characters == &['1']));

    let err = service.edit(ProteinId(99), &ProteinForm::new("  ", "AC")).unwrap_err();
    assert!(matches!(err, ProteinError::MissingInput { field: "name" }));

    assert_eq!(service.store().metrics().updates, 0);
}

#[test]
fn test_delete_and_not_found() {
    let (store, config, _dir) = temp_store();
    let service = ProteinService::new(store, &config);
    let stored = service.analyze(&ProteinForm::new(INSULIN_NAME, INSULIN_RAW)).unwrap();

    assert!(matches!(service.delete(ProteinId(5)), Err(ProteinError::NotFound(_))));
    service.delete(stored.id).unwrap();

    let err = service.view(stored.id).unwrap_err();
    assert!(matches!(err, ProteinError::NotFound(_)));
    assert_eq!(err.to_string(), "Protein not found");
}
