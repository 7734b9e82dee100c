use serde::{Deserialize, Serialize};

/// Media buttons exposed in the window, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    PlayPause,
    NextTrack,
    PreviousTrack,
    VolumeUp,
    VolumeDown,
    FastForward,
    Rewind,
}

impl KeyAction {
    pub const ALL: [KeyAction; 7] = [
        KeyAction::PlayPause,
        KeyAction::NextTrack,
        KeyAction::PreviousTrack,
        KeyAction::VolumeUp,
        KeyAction::VolumeDown,
        KeyAction::FastForward,
        KeyAction::Rewind,
    ];

    pub fn id(self) -> &'static str {
        match self {
            KeyAction::PlayPause => "play_pause",
            KeyAction::NextTrack => "next_track",
            KeyAction::PreviousTrack => "previous_track",
            KeyAction::VolumeUp => "volume_up",
            KeyAction::VolumeDown => "volume_down",
            KeyAction::FastForward => "fast_forward",
            KeyAction::Rewind => "rewind",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeyAction::PlayPause => "Play/Pause",
            KeyAction::NextTrack => "Next Track",
            KeyAction::PreviousTrack => "Previous Track",
            KeyAction::VolumeUp => "Volume Up",
            KeyAction::VolumeDown => "Volume Down",
            KeyAction::FastForward => "Fast Forward",
            KeyAction::Rewind => "Rewind",
        }
    }

    pub fn keycode(self) -> &'static str {
        match self {
            KeyAction::PlayPause => "KEYCODE_MEDIA_PLAY_PAUSE",
            KeyAction::NextTrack => "KEYCODE_MEDIA_NEXT",
            KeyAction::PreviousTrack => "KEYCODE_MEDIA_PREVIOUS",
            KeyAction::VolumeUp => "KEYCODE_VOLUME_UP",
            KeyAction::VolumeDown => "KEYCODE_VOLUME_DOWN",
            KeyAction::FastForward => "KEYCODE_MEDIA_FAST_FORWARD",
            KeyAction::Rewind => "KEYCODE_MEDIA_REWIND",
        }
    }

    pub fn from_id(id: &str) -> Option<KeyAction> {
        let id = id.trim();
        Self::ALL.into_iter().find(|action| action.id() == id)
    }
}

pub fn keyevent_args(keycode: &str) -> Vec<String> {
    vec![
        "shell".to_string(),
        "input".to_string(),
        "keyevent".to_string(),
        keycode.to_string(),
    ]
}

pub fn dump_media_session_args() -> Vec<String> {
    vec![
        "shell".to_string(),
        "dumpsys".to_string(),
        "media_session".to_string(),
    ]
}

pub fn tcpip_args(port: u32) -> Vec<String> {
    vec!["tcpip".to_string(), port.to_string()]
}

pub fn connect_args(address: &str) -> Vec<String> {
    vec!["connect".to_string(), address.to_string()]
}
