//! Board service - core business logic

use std::sync::Arc;

use chrono::NaiveDate;
use rotaboard_domain::utils::french_calendar;
use rotaboard_domain::{NewRotaRecord, Occurrence, Result, RotaBoardError, RotaRecord};
use serde::Serialize;
use uuid::Uuid;

use super::engine::project_window;
use super::filters::{political_for_iso_week, technical_for_day};
use super::ports::{Clock, RotaRecordRepository};

/// Everything the display widget needs for one refresh cycle.
///
/// Recomputed from scratch on each tick; subscribers always replace their
/// previous copy wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    /// Reference date the projection was computed against.
    pub generated_on: NaiveDate,
    /// Full 7-day feed, sorted ascending by date.
    pub occurrences: Vec<Occurrence>,
    /// Technical entries narrowed to the reference date.
    pub today_technical: Vec<Occurrence>,
    /// Political entries narrowed to the reference date's ISO week.
    pub week_political: Vec<Occurrence>,
}

/// Rota board service
///
/// Composes the record store and the clock into the fetch-project-filter
/// use cases, and fronts the admin write path with validation.
pub struct BoardService {
    repository: Arc<dyn RotaRecordRepository>,
    clock: Arc<dyn Clock>,
}

impl BoardService {
    /// Create a new board service
    pub fn new(repository: Arc<dyn RotaRecordRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Project the full 7-day feed against the clock's current date.
    pub async fn project_board(&self) -> Result<Vec<Occurrence>> {
        let records = self.repository.fetch_all().await?;
        Ok(project_window(&records, self.clock.today()))
    }

    /// Technical entries for today only.
    pub async fn today_technical(&self) -> Result<Vec<Occurrence>> {
        let today = self.clock.today();
        let feed = self.project_board().await?;
        Ok(technical_for_day(&feed, today))
    }

    /// Political entries for the current ISO week.
    pub async fn week_political(&self) -> Result<Vec<Occurrence>> {
        let today = self.clock.today();
        let feed = self.project_board().await?;
        Ok(political_for_iso_week(&feed, today))
    }

    /// Compute a full board snapshot with one record fetch.
    pub async fn snapshot(&self) -> Result<BoardSnapshot> {
        let today = self.clock.today();
        let records = self.repository.fetch_all().await?;
        let occurrences = project_window(&records, today);
        let today_technical = technical_for_day(&occurrences, today);
        let week_political = political_for_iso_week(&occurrences, today);

        Ok(BoardSnapshot { generated_on: today, occurrences, today_technical, week_political })
    }

    /// Create a rota record, assigning it a fresh id.
    pub async fn add_record(&self, draft: NewRotaRecord) -> Result<RotaRecord> {
        let record = draft.into_record(Uuid::new_v4().to_string());
        validate_for_write(&record)?;
        self.repository.insert(record.clone()).await?;
        Ok(record)
    }

    /// Replace an existing rota record.
    pub async fn update_record(&self, record: RotaRecord) -> Result<()> {
        validate_for_write(&record)?;
        self.repository.update(record).await
    }

    /// Delete a rota record by id.
    pub async fn remove_record(&self, id: &str) -> Result<()> {
        self.repository.delete(id).await
    }
}

/// Write-path validation: well-formed day keys and a month name projection
/// can actually match. Read-path tolerance for bad rows stays in the engine.
fn validate_for_write(record: &RotaRecord) -> Result<()> {
    record.validate()?;

    if french_calendar::month_number(&record.month).is_none() {
        return Err(RotaBoardError::InvalidInput(format!(
            "unknown month name: {:?}",
            record.month
        )));
    }

    Ok(())
}
