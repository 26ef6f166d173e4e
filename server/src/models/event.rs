use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::speaker::{DevEventSpeaker, DevEventSpeakerView};

/// Stored row of the `dev_events` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DevEvent {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_deleted: bool,
}

impl DevEvent {
    /// Builds a fresh, not yet persisted event from client input.
    pub fn from_input(input: DevEventInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            is_deleted: false,
        }
    }

    pub fn update(
        &mut self,
        title: String,
        description: String,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) {
        self.title = title;
        self.description = description;
        self.start_date = start_date;
        self.end_date = end_date;
    }

    pub fn delete(&mut self) {
        self.is_deleted = true;
    }
}

/// Request body for creating or replacing an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevEventInput {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub end_date: DateTime<Utc>,
}

/// Parses an RFC 3339 timestamp. Values without an offset, including bare
/// dates, are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }

    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
}

/// Event as returned to clients. `speakers` is left out of list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevEventView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speakers: Option<Vec<DevEventSpeakerView>>,
}

impl DevEventView {
    pub fn summary(event: DevEvent) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            start_date: event.start_date,
            end_date: event.end_date,
            speakers: None,
        }
    }

    pub fn with_speakers(event: DevEvent, speakers: Vec<DevEventSpeaker>) -> Self {
        Self {
            speakers: Some(speakers.into_iter().map(DevEventSpeakerView::from).collect()),
            ..Self::summary(event)
        }
    }
}
