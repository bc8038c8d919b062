use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Error,
    Warning,
    Success,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Success => write!(f, "success"),
        }
    }
}

/// What the notification modal currently shows.
///
/// `suppressed` mirrors the process-wide single-flight latch: while it is
/// set, new permission or session notifications are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationState {
    pub visible: bool,
    pub kind: NotificationKind,
    pub message: String,
    pub suppressed: bool,
}

impl NotificationState {
    pub fn shown(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            visible: true,
            kind,
            message: message.into(),
            suppressed: false,
        }
    }

    pub fn hidden() -> Self {
        Self::default()
    }
}
