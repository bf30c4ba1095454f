//! History and session persistence
//!
//! An append-only log of the last saved BMI results plus the last-entered
//! form values, both written whole to JSON files under the data directory.
//! The backing store is treated as opaque: every mutation is a full
//! overwrite, and a record disappears only when it falls off the end of
//! the capped log or the store is cleared.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};
use crate::models::{
    ActivityLevel, BmiResult, Gender, HeightUnit, HistoryRecord, RecordMetadata, WeightUnit,
};
use crate::units::round_display;

/// Maximum number of retained history records
pub const MAX_RECORDS: usize = 10;

const HISTORY_FILE: &str = "history.json";
const SESSION_FILE: &str = "session.json";

/// Last-entered form values, restored on the next session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSession {
    pub height: Option<rust_decimal::Decimal>,
    pub height_unit: Option<HeightUnit>,
    pub feet: Option<rust_decimal::Decimal>,
    pub inches: Option<rust_decimal::Decimal>,
    pub weight: Option<rust_decimal::Decimal>,
    pub weight_unit: Option<WeightUnit>,
    pub age: Option<u16>,
    pub gender: Option<Gender>,
    pub activity: Option<ActivityLevel>,
}

/// File-backed store for BMI history and session state
pub struct HistoryStore {
    data_dir: PathBuf,
}

impl HistoryStore {
    /// Open a store rooted at the given data directory, creating it if needed
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(HistoryStore {
            data_dir: data_dir.as_ref().to_path_buf(),
        })
    }

    fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE)
    }

    fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    /// Build a record from a computed result and save it
    ///
    /// Returns the updated list, most recent first.
    pub fn save_result(
        &self,
        result: &BmiResult,
        metadata: RecordMetadata,
    ) -> Result<Vec<HistoryRecord>> {
        let now = Utc::now();
        let record = HistoryRecord {
            bmi: round_display(result.bmi, 1),
            category: result.category,
            date: now.date_naive(),
            timestamp: now,
            metadata,
        };
        self.append(record)
    }

    /// Prepend a record, truncate to the cap, and persist the whole log
    pub fn append(&self, record: HistoryRecord) -> Result<Vec<HistoryRecord>> {
        let mut records = self.list()?;
        records.insert(0, record);
        records.truncate(MAX_RECORDS);
        self.write_history(&records)?;
        tracing::info!(count = records.len(), "history record saved");
        Ok(records)
    }

    /// All saved records, most recent first
    pub fn list(&self) -> Result<Vec<HistoryRecord>> {
        let path = self.history_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| {
            StorageError::Corrupted {
                path,
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Remove all saved records
    pub fn clear(&self) -> Result<()> {
        let path = self.history_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        tracing::info!("history cleared");
        Ok(())
    }

    fn write_history(&self, records: &[HistoryRecord]) -> Result<()> {
        let path = self.history_path();
        let json = serde_json::to_string_pretty(records).map_err(|e| StorageError::WriteFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&path, json)?;
        Ok(())
    }

    /// Persist the last-entered form values
    pub fn save_session(&self, session: &FormSession) -> Result<()> {
        let path = self.session_path();
        let json = serde_json::to_string_pretty(session).map_err(|e| StorageError::WriteFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&path, json)?;
        Ok(())
    }

    /// Restore the last-entered form values, if any
    ///
    /// A corrupt session file is treated as absent rather than an error;
    /// losing placeholder state is not worth failing the command over.
    pub fn load_session(&self) -> Option<FormSession> {
        let content = fs::read_to_string(self.session_path()).ok()?;
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session state");
                None
            }
        }
    }

    /// Remove saved session state
    pub fn clear_session(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BmiCategory;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn record(bmi: rust_decimal::Decimal) -> HistoryRecord {
        HistoryRecord {
            bmi,
            category: BmiCategory::from_bmi(bmi),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            timestamp: Utc::now(),
            metadata: RecordMetadata::default(),
        }
    }

    #[test]
    fn test_append_and_list() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::open(dir.path()).unwrap();

        assert!(store.list().unwrap().is_empty());

        store.append(record(dec!(22.0))).unwrap();
        store.append(record(dec!(23.0))).unwrap();

        let records = store.list().unwrap();
        assert_eq!(records.len(), 2);
        // Most recent first
        assert_eq!(records[0].bmi, dec!(23.0));
        assert_eq!(records[1].bmi, dec!(22.0));
    }

    #[test]
    fn test_cap_at_ten_records() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::open(dir.path()).unwrap();

        for i in 1..=11 {
            store.append(record(rust_decimal::Decimal::from(15 + i))).unwrap();
        }

        let records = store.list().unwrap();
        assert_eq!(records.len(), MAX_RECORDS);
        // The 11 appends leave records 11..=2, newest first
        assert_eq!(records[0].bmi, dec!(26));
        assert_eq!(records[9].bmi, dec!(17));
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::open(dir.path()).unwrap();

        store.append(record(dec!(22.0))).unwrap();
        store.clear().unwrap();
        assert!(store.list().unwrap().is_empty());
        // Clearing an empty store is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_save_result_rounds_bmi() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::open(dir.path()).unwrap();

        let result = crate::bmi::calculate(dec!(175.26), dec!(70)).unwrap();
        let records = store.save_result(&result, RecordMetadata::default()).unwrap();
        assert_eq!(records[0].bmi, dec!(22.8));
        assert_eq!(records[0].category, BmiCategory::NormalWeight);
    }

    #[test]
    fn test_corrupted_history_is_an_error() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::open(dir.path()).unwrap();
        fs::write(dir.path().join(HISTORY_FILE), "not json").unwrap();
        assert!(store.list().is_err());
    }

    #[test]
    fn test_session_round_trip() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::open(dir.path()).unwrap();

        assert!(store.load_session().is_none());

        let session = FormSession {
            height: Some(dec!(5.9)),
            height_unit: Some(HeightUnit::Ft),
            weight: Some(dec!(154)),
            weight_unit: Some(WeightUnit::Lbs),
            age: Some(30),
            gender: Some(Gender::Male),
            activity: Some(ActivityLevel::ModeratelyActive),
            ..Default::default()
        };
        store.save_session(&session).unwrap();
        assert_eq!(store.load_session(), Some(session));

        store.clear_session().unwrap();
        assert!(store.load_session().is_none());
    }

    #[test]
    fn test_corrupt_session_discarded() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::open(dir.path()).unwrap();
        fs::write(dir.path().join(SESSION_FILE), "{broken").unwrap();
        assert!(store.load_session().is_none());
    }
}
