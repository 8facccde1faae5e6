use crate::constants::*;

/// Layout class chosen once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Compact,
    Wide,
}

impl DeviceClass {
    #[inline]
    pub fn from_compact(compact: bool) -> Self {
        if compact {
            DeviceClass::Compact
        } else {
            DeviceClass::Wide
        }
    }

    #[inline]
    pub fn is_compact(self) -> bool {
        self == DeviceClass::Compact
    }

    pub fn camera_start_x(self) -> f32 {
        match self {
            DeviceClass::Compact => CAMERA_X_COMPACT,
            DeviceClass::Wide => CAMERA_X_WIDE,
        }
    }

    pub fn load_scale(self) -> f32 {
        match self {
            DeviceClass::Compact => LOAD_SCALE_COMPACT,
            DeviceClass::Wide => LOAD_SCALE_WIDE,
        }
    }

    pub fn reveal_scale(self) -> f32 {
        match self {
            DeviceClass::Compact => REVEAL_SCALE_COMPACT,
            DeviceClass::Wide => REVEAL_SCALE_WIDE,
        }
    }

    /// Title `(left%, top%)` once the intro snaps it into place.
    pub fn title_position(self) -> [f32; 2] {
        match self {
            DeviceClass::Compact => TITLE_POS_COMPACT,
            DeviceClass::Wide => TITLE_POS_WIDE,
        }
    }
}

const COMPACT_UA_MARKERS: &[&str] = &[
    "iphone",
    "ipod",
    "ipad",
    "windows phone",
    "blackberry",
    "opera mini",
    "iemobile",
];

/// Guess a compact layout from a user-agent string.
pub fn is_compact_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    if COMPACT_UA_MARKERS.iter().any(|m| ua.contains(m)) {
        return true;
    }
    ua.contains("android") && ua.contains("mobile")
}
