//! Persistence gateway for dev events and their speakers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{DevEvent, DevEventSpeaker};
use crate::utils::error::AppError;

pub mod memory;
pub mod postgres;

pub use memory::MemoryDevEventStore;
pub use postgres::PgDevEventStore;

#[async_trait]
pub trait DevEventStore: Send + Sync {
    /// Events not flagged as deleted, without speakers.
    async fn list_active_events(&self) -> Result<Vec<DevEvent>, AppError>;

    /// Looks an event up by id whether or not it was soft deleted.
    async fn get_event_with_speakers(
        &self,
        id: Uuid,
    ) -> Result<(DevEvent, Vec<DevEventSpeaker>), AppError>;

    /// Persists `event`, assigning an id when it carries the nil UUID.
    async fn create_event(&self, event: DevEvent) -> Result<DevEvent, AppError>;

    async fn update_event(
        &self,
        id: Uuid,
        title: String,
        description: String,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<(), AppError>;

    async fn soft_delete_event(&self, id: Uuid) -> Result<(), AppError>;

    async fn event_exists(&self, id: Uuid) -> Result<bool, AppError>;

    /// Links `speaker` to `event_id` and stores it. Nothing is written when
    /// the event does not exist.
    async fn create_speaker(
        &self,
        speaker: DevEventSpeaker,
        event_id: Uuid,
    ) -> Result<(), AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn event_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Dev event with id '{}' was not found", id))
}
