pub mod event;
pub mod speaker;

pub use event::{DevEvent, DevEventInput, DevEventView};
pub use speaker::{DevEventSpeaker, DevEventSpeakerInput, DevEventSpeakerView};
