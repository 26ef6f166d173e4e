use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{event_not_found, DevEventStore};
use crate::models::{DevEvent, DevEventSpeaker};
use crate::utils::error::AppError;

#[derive(Default)]
struct Tables {
    events: Vec<DevEvent>,
    speakers: Vec<DevEventSpeaker>,
}

/// Process-local store. Rows keep insertion order and vanish on restart.
#[derive(Default)]
pub struct MemoryDevEventStore {
    tables: RwLock<Tables>,
}

impl MemoryDevEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DevEventStore for MemoryDevEventStore {
    async fn list_active_events(&self) -> Result<Vec<DevEvent>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .events
            .iter()
            .filter(|event| !event.is_deleted)
            .cloned()
            .collect())
    }

    async fn get_event_with_speakers(
        &self,
        id: Uuid,
    ) -> Result<(DevEvent, Vec<DevEventSpeaker>), AppError> {
        let tables = self.tables.read().await;
        let event = tables
            .events
            .iter()
            .find(|event| event.id == id)
            .cloned()
            .ok_or_else(|| event_not_found(id))?;
        let speakers = tables
            .speakers
            .iter()
            .filter(|speaker| speaker.dev_event_id == id)
            .cloned()
            .collect();

        Ok((event, speakers))
    }

    async fn create_event(&self, mut event: DevEvent) -> Result<DevEvent, AppError> {
        if event.id.is_nil() {
            event.id = Uuid::new_v4();
        }

        let mut tables = self.tables.write().await;
        if tables.events.iter().any(|existing| existing.id == event.id) {
            return Err(AppError::InternalServerError(format!(
                "Duplicate dev event id '{}'",
                event.id
            )));
        }
        tables.events.push(event.clone());

        Ok(event)
    }

    async fn update_event(
        &self,
        id: Uuid,
        title: String,
        description: String,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let event = tables
            .events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| event_not_found(id))?;

        event.update(title, description, start_date, end_date);
        Ok(())
    }

    async fn soft_delete_event(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let event = tables
            .events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| event_not_found(id))?;

        event.delete();
        Ok(())
    }

    async fn event_exists(&self, id: Uuid) -> Result<bool, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.events.iter().any(|event| event.id == id))
    }

    async fn create_speaker(
        &self,
        mut speaker: DevEventSpeaker,
        event_id: Uuid,
    ) -> Result<(), AppError> {
        // Existence check and insert share one write guard.
        let mut tables = self.tables.write().await;
        if !tables.events.iter().any(|event| event.id == event_id) {
            return Err(event_not_found(event_id));
        }

        speaker.dev_event_id = event_id;
        tables.speakers.push(speaker);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(title: &str) -> DevEvent {
        DevEvent {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: "d".to_string(),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            is_deleted: false,
        }
    }

    fn speaker(name: &str) -> DevEventSpeaker {
        DevEventSpeaker {
            id: Uuid::new_v4(),
            name: name.to_string(),
            talk_title: "T".to_string(),
            talk_description: "D".to_string(),
            linked_in_profile: "url".to_string(),
            dev_event_id: Uuid::nil(),
        }
    }

    #[tokio::test]
    async fn test_get_after_create_returns_same_fields() {
        let store = MemoryDevEventStore::new();
        let created = store.create_event(event("Conf")).await.unwrap();

        let (fetched, speakers) = store.get_event_with_speakers(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert!(speakers.is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_id_when_nil() {
        let store = MemoryDevEventStore::new();
        let mut draft = event("Conf");
        draft.id = Uuid::nil();

        let created = store.create_event(draft).await.unwrap();
        assert!(!created.id.is_nil());
        assert!(store.event_exists(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_soft_deleted_event_leaves_list_but_stays_fetchable() {
        let store = MemoryDevEventStore::new();
        let kept = store.create_event(event("Kept")).await.unwrap();
        let gone = store.create_event(event("Gone")).await.unwrap();

        store.soft_delete_event(gone.id).await.unwrap();

        let listed = store.list_active_events().await.unwrap();
        assert_eq!(listed, vec![kept]);

        let (fetched, _) = store.get_event_with_speakers(gone.id).await.unwrap();
        assert!(fetched.is_deleted);
        assert!(store.event_exists(gone.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_unknown_id_changes_nothing() {
        let store = MemoryDevEventStore::new();
        let existing = store.create_event(event("Conf")).await.unwrap();

        let result = store
            .update_event(
                Uuid::new_v4(),
                "Other".into(),
                "x".into(),
                existing.start_date,
                existing.end_date,
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        assert_eq!(store.list_active_events().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn test_update_overwrites_mutable_fields_only() {
        let store = MemoryDevEventStore::new();
        let existing = store.create_event(event("Conf")).await.unwrap();
        store.soft_delete_event(existing.id).await.unwrap();

        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 3, 0, 0, 0).unwrap();
        store
            .update_event(existing.id, "Renamed".into(), "new".into(), start, end)
            .await
            .unwrap();

        let (fetched, _) = store.get_event_with_speakers(existing.id).await.unwrap();
        assert_eq!(fetched.title, "Renamed");
        assert_eq!(fetched.description, "new");
        assert_eq!(fetched.start_date, start);
        assert_eq!(fetched.end_date, end);
        assert!(fetched.is_deleted);
    }

    #[tokio::test]
    async fn test_soft_delete_unknown_id_is_not_found() {
        let store = MemoryDevEventStore::new();
        let result = store.soft_delete_event(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_speaker_for_unknown_event_is_not_persisted() {
        let store = MemoryDevEventStore::new();
        let missing = Uuid::new_v4();

        let result = store.create_speaker(speaker("Alice"), missing).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(store.tables.read().await.speakers.is_empty());
    }

    #[tokio::test]
    async fn test_speakers_are_linked_and_kept_in_order() {
        let store = MemoryDevEventStore::new();
        let conf = store.create_event(event("Conf")).await.unwrap();
        let other = store.create_event(event("Other")).await.unwrap();

        store.create_speaker(speaker("Alice"), conf.id).await.unwrap();
        store.create_speaker(speaker("Bob"), other.id).await.unwrap();
        store.create_speaker(speaker("Carol"), conf.id).await.unwrap();

        let (_, speakers) = store.get_event_with_speakers(conf.id).await.unwrap();
        let names: Vec<&str> = speakers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Carol"]);
        assert!(speakers.iter().all(|s| s.dev_event_id == conf.id));
    }
}
