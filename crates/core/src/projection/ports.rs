//! Port interfaces for the rota board
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use rotaboard_domain::{Result, RotaRecord};

/// Trait for persisting and querying rota records
///
/// `fetch_all` is the projection engine's snapshot read; the remaining
/// operations are the admin console's CRUD surface. The realistic scale is
/// tens to low hundreds of records, so the full collection is always read
/// into memory.
#[async_trait]
pub trait RotaRecordRepository: Send + Sync {
    /// Fetch the current snapshot of all rota records
    async fn fetch_all(&self) -> Result<Vec<RotaRecord>>;

    /// Look up a single record by id
    async fn find_by_id(&self, id: &str) -> Result<Option<RotaRecord>>;

    /// Insert a new record
    async fn insert(&self, record: RotaRecord) -> Result<()>;

    /// Replace an existing record
    async fn update(&self, record: RotaRecord) -> Result<()>;

    /// Delete a record by id
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Trait for resolving the current calendar date
///
/// The single impure boundary of the projection path; substitute a fixed
/// date in tests instead of mocking the wall clock.
pub trait Clock: Send + Sync {
    /// The current local calendar date
    fn today(&self) -> NaiveDate;
}
