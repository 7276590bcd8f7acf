//! Mock implementations of the core ports for testing
//!
//! Provides in-memory mocks for the record repository and the clock,
//! enabling deterministic unit tests without database dependencies.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rotaboard_core::{Clock, RotaRecordRepository};
use rotaboard_domain::{Result as DomainResult, RotaBoardError, RotaRecord};

/// In-memory mock for `RotaRecordRepository`.
///
/// Stores records behind a mutex and mirrors the repository contract,
/// including `NotFound` on updates and deletes of missing ids.
#[derive(Default, Clone)]
pub struct InMemoryRotaRepository {
    records: Arc<Mutex<Vec<RotaRecord>>>,
}

impl InMemoryRotaRepository {
    /// Create a new mock seeded with the provided records.
    pub fn new(records: Vec<RotaRecord>) -> Self {
        Self { records: Arc::new(Mutex::new(records)) }
    }

    /// Convenience helper for adding a single record to the mock.
    pub fn with_record(self, record: RotaRecord) -> Self {
        self.records.lock().unwrap().push(record);
        self
    }
}

#[async_trait]
impl RotaRecordRepository for InMemoryRotaRepository {
    async fn fetch_all(&self) -> DomainResult<Vec<RotaRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<RotaRecord>> {
        Ok(self.records.lock().unwrap().iter().find(|record| record.id == id).cloned())
    }

    async fn insert(&self, record: RotaRecord) -> DomainResult<()> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    async fn update(&self, record: RotaRecord) -> DomainResult<()> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RotaBoardError::NotFound(format!("rota record {}", record.id))),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let mut records = self.records.lock().unwrap();
        let initial_len = records.len();
        records.retain(|record| record.id != id);
        if records.len() == initial_len {
            return Err(RotaBoardError::NotFound(format!("rota record {id}")));
        }
        Ok(())
    }
}

/// Clock mock pinned to a fixed date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}
