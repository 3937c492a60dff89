use serde::Serialize;

use crate::geolocation::GeolocationError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Geolocation,
}

/// Transient, user-visible message. Shown once, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn geolocation(err: GeolocationError) -> Self {
        let text = match err {
            GeolocationError::Unsupported => "Geolocation is not supported by your browser.",
            GeolocationError::PermissionDenied | GeolocationError::Unavailable => {
                "Unable to get your current location."
            }
        };
        Self {
            kind: NoticeKind::Geolocation,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct NoticeBoard {
    pending: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.pending.push(notice);
    }

    /// Hands pending notices to the presenter; each is delivered exactly once.
    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
