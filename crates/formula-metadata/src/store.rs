use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::document::SpreadsheetId;
use crate::error::MetadataError;
use crate::metadata::SpreadsheetMetadata;
use crate::properties::{SPREADSHEET_ID, SPREADSHEET_NAME};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("spreadsheet not found: {0}")]
    NotFound(SpreadsheetId),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence for spreadsheet metadata, keyed by `spreadsheet-id`.
pub trait MetadataStore {
    fn load(&self, id: SpreadsheetId) -> Result<Option<SpreadsheetMetadata>>;

    /// Store `metadata`, assigning a `spreadsheet-id` if it has none. Returns what was stored.
    fn save(&self, metadata: &SpreadsheetMetadata) -> Result<SpreadsheetMetadata>;

    fn delete(&self, id: SpreadsheetId) -> Result<()>;

    /// Spreadsheets whose name contains `name` (ignoring case), ordered by id.
    fn find_by_name(
        &self,
        name: &str,
        offset: usize,
        count: usize,
    ) -> Result<Vec<SpreadsheetMetadata>>;
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    spreadsheets: BTreeMap<SpreadsheetId, SpreadsheetMetadata>,
}

/// [`MetadataStore`] held in process memory. Clones share the same spreadsheets.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMetadataStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        let state = self.state.lock().expect("metadata store mutex poisoned");
        state.spreadsheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn load(&self, id: SpreadsheetId) -> Result<Option<SpreadsheetMetadata>> {
        let state = self.state.lock().expect("metadata store mutex poisoned");
        Ok(state.spreadsheets.get(&id).cloned())
    }

    fn save(&self, metadata: &SpreadsheetMetadata) -> Result<SpreadsheetMetadata> {
        let mut state = self.state.lock().expect("metadata store mutex poisoned");
        let (id, saved) = match metadata.get(&SPREADSHEET_ID) {
            Some(&id) => (id, metadata.clone()),
            None => {
                let id = loop {
                    state.next_id += 1;
                    let candidate = SpreadsheetId(state.next_id);
                    if !state.spreadsheets.contains_key(&candidate) {
                        break candidate;
                    }
                };
                (id, metadata.set(&SPREADSHEET_ID, id)?)
            }
        };
        log::debug!("saving spreadsheet metadata {id}");
        state.spreadsheets.insert(id, saved.clone());
        Ok(saved)
    }

    fn delete(&self, id: SpreadsheetId) -> Result<()> {
        let mut state = self.state.lock().expect("metadata store mutex poisoned");
        if state.spreadsheets.remove(&id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        log::debug!("deleted spreadsheet metadata {id}");
        Ok(())
    }

    fn find_by_name(
        &self,
        name: &str,
        offset: usize,
        count: usize,
    ) -> Result<Vec<SpreadsheetMetadata>> {
        let needle = name.to_lowercase();
        let state = self.state.lock().expect("metadata store mutex poisoned");
        Ok(state
            .spreadsheets
            .values()
            .filter(|metadata| {
                metadata
                    .get(&SPREADSHEET_NAME)
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .skip(offset)
            .take(count)
            .cloned()
            .collect())
    }
}
