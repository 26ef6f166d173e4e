use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Stored row of the `dev_event_speakers` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DevEventSpeaker {
    pub id: Uuid,
    pub name: String,
    pub talk_title: String,
    pub talk_description: String,
    pub linked_in_profile: String,
    pub dev_event_id: Uuid,
}

impl DevEventSpeaker {
    /// The event link is always taken from the route, never from the body.
    pub fn from_input(input: DevEventSpeakerInput, dev_event_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            talk_title: input.talk_title,
            talk_description: input.talk_description,
            linked_in_profile: input.linked_in_profile,
            dev_event_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevEventSpeakerInput {
    pub name: String,
    pub talk_title: String,
    pub talk_description: String,
    pub linked_in_profile: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevEventSpeakerView {
    pub id: Uuid,
    pub name: String,
    pub talk_title: String,
    pub talk_description: String,
    pub linked_in_profile: String,
    pub dev_event_id: Uuid,
}

impl From<DevEventSpeaker> for DevEventSpeakerView {
    fn from(speaker: DevEventSpeaker) -> Self {
        Self {
            id: speaker.id,
            name: speaker.name,
            talk_title: speaker.talk_title,
            talk_description: speaker.talk_description,
            linked_in_profile: speaker.linked_in_profile,
            dev_event_id: speaker.dev_event_id,
        }
    }
}
