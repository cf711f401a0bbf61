//! JSON file movement source
//!
//! Reads a document of the form `{ "<accountId>": [ raw movement, ... ] }`.
//! The file is read on every fetch; nothing is cached between requests.
//! Records are decoded one by one, so a single mistyped record becomes an
//! unreadable placeholder instead of failing the fetch.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, warn};

use super::MovementSource;
use crate::error::{StatementError, StatementResult};
use crate::models::{AccountId, DateRange, RawMovement};

/// Movement source backed by a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> StatementResult<HashMap<String, Vec<Value>>> {
        let path = &self.path;

        if !path.exists() {
            return Err(StatementError::Source(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| {
            StatementError::Source(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            StatementError::Source(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

impl MovementSource for JsonFileSource {
    fn fetch_movements(
        &self,
        account: &AccountId,
        range: &DateRange,
    ) -> StatementResult<Vec<RawMovement>> {
        let mut document = self.read_document()?;
        let movements: Vec<RawMovement> = document
            .remove(account.as_str())
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, value)| decode_record(index, value))
            .collect();

        debug!(
            path = %self.path.display(),
            %account,
            %range,
            count = movements.len(),
            "fetched raw movements"
        );
        Ok(movements)
    }
}

fn decode_record(index: usize, value: Value) -> RawMovement {
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(index, error = %e, "undecodable movement record");
        RawMovement::unreadable(e.to_string())
    })
}
