use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{event_not_found, DevEventStore};
use crate::models::{DevEvent, DevEventSpeaker};
use crate::utils::error::AppError;

const EVENT_COLUMNS: &str = "id, title, description, start_date, end_date, is_deleted";
const SPEAKER_COLUMNS: &str =
    "id, name, talk_title, talk_description, linked_in_profile, dev_event_id";

pub struct PgDevEventStore {
    pool: PgPool,
}

impl PgDevEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DevEventStore for PgDevEventStore {
    async fn list_active_events(&self) -> Result<Vec<DevEvent>, AppError> {
        let sql = format!(
            "SELECT {} FROM dev_events WHERE is_deleted = FALSE",
            EVENT_COLUMNS
        );
        let events = sqlx::query_as::<_, DevEvent>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = events.len(), "Listed active dev events");
        Ok(events)
    }

    async fn get_event_with_speakers(
        &self,
        id: Uuid,
    ) -> Result<(DevEvent, Vec<DevEventSpeaker>), AppError> {
        let sql = format!("SELECT {} FROM dev_events WHERE id = $1", EVENT_COLUMNS);
        let event = sqlx::query_as::<_, DevEvent>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| event_not_found(id))?;

        let sql = format!(
            "SELECT {} FROM dev_event_speakers WHERE dev_event_id = $1 ORDER BY created_at, id",
            SPEAKER_COLUMNS
        );
        let speakers = sqlx::query_as::<_, DevEventSpeaker>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok((event, speakers))
    }

    async fn create_event(&self, mut event: DevEvent) -> Result<DevEvent, AppError> {
        if event.id.is_nil() {
            event.id = Uuid::new_v4();
        }

        let sql = format!(
            "INSERT INTO dev_events ({}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            EVENT_COLUMNS, EVENT_COLUMNS
        );
        let stored = sqlx::query_as::<_, DevEvent>(&sql)
            .bind(event.id)
            .bind(&event.title)
            .bind(&event.description)
            .bind(event.start_date)
            .bind(event.end_date)
            .bind(event.is_deleted)
            .fetch_one(&self.pool)
            .await?;

        Ok(stored)
    }

    async fn update_event(
        &self,
        id: Uuid,
        title: String,
        description: String,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE dev_events SET title = $2, description = $3, start_date = $4, end_date = $5 WHERE id = $1",
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(start_date)
        .bind(end_date)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(event_not_found(id));
        }
        Ok(())
    }

    async fn soft_delete_event(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE dev_events SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(event_not_found(id));
        }
        Ok(())
    }

    async fn event_exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM dev_events WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn create_speaker(
        &self,
        mut speaker: DevEventSpeaker,
        event_id: Uuid,
    ) -> Result<(), AppError> {
        if !self.event_exists(event_id).await? {
            return Err(event_not_found(event_id));
        }

        speaker.dev_event_id = event_id;
        let sql = format!(
            "INSERT INTO dev_event_speakers ({}) VALUES ($1, $2, $3, $4, $5, $6)",
            SPEAKER_COLUMNS
        );
        sqlx::query(&sql)
            .bind(speaker.id)
            .bind(&speaker.name)
            .bind(&speaker.talk_title)
            .bind(&speaker.talk_description)
            .bind(&speaker.linked_in_profile)
            .bind(speaker.dev_event_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
