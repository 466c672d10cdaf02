use formula_metadata::properties::{PRECISION, SPREADSHEET_ID, SPREADSHEET_NAME};
use formula_metadata::{
    InMemoryMetadataStore, MetadataStore, SpreadsheetId, SpreadsheetMetadata, StoreError,
};
use pretty_assertions::assert_eq;

fn named(name: &str) -> SpreadsheetMetadata {
    SpreadsheetMetadata::EMPTY
        .set(&SPREADSHEET_NAME, name.to_string())
        .unwrap()
}

#[test]
fn save_assigns_ids_and_load_returns_them() {
    let store = InMemoryMetadataStore::new();
    let saved = store.save(&named("Budget")).unwrap();
    let id = *saved.get(&SPREADSHEET_ID).unwrap();

    assert_eq!(store.load(id).unwrap(), Some(saved.clone()));
    assert_eq!(store.load(SpreadsheetId(999)).unwrap(), None);

    // Saving again keeps the id and replaces the stored metadata.
    let updated = saved.set(&PRECISION, 4).unwrap();
    let resaved = store.save(&updated).unwrap();
    assert_eq!(resaved.get(&SPREADSHEET_ID), Some(&id));
    assert_eq!(store.load(id).unwrap(), Some(updated));
    assert_eq!(store.len(), 1);
}

#[test]
fn delete_removes_or_reports_missing() {
    let store = InMemoryMetadataStore::new();
    let saved = store.save(&named("Budget")).unwrap();
    let id = *saved.get(&SPREADSHEET_ID).unwrap();

    store.delete(id).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.delete(id), Err(StoreError::NotFound(id)));
}

#[test]
fn find_by_name_is_case_insensitive_and_paged() {
    let store = InMemoryMetadataStore::new();
    for name in ["Budget 2023", "budget 2024", "Sales", "BUDGET draft"] {
        store.save(&named(name)).unwrap();
    }

    let found: Vec<String> = store
        .find_by_name("budget", 0, 10)
        .unwrap()
        .iter()
        .map(|m| m.get(&SPREADSHEET_NAME).unwrap().clone())
        .collect();
    assert_eq!(found, ["Budget 2023", "budget 2024", "BUDGET draft"]);

    let page = store.find_by_name("budget", 1, 1).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(
        page[0].get(&SPREADSHEET_NAME).map(String::as_str),
        Some("budget 2024")
    );
}

#[test]
fn clones_share_storage() {
    let store = InMemoryMetadataStore::new();
    let other = store.clone();
    store.save(&named("Shared")).unwrap();
    assert_eq!(other.len(), 1);
}
