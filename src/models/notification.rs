/// Kind of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A notification as rendered by the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Success and error notification slots.
///
/// Each slot holds at most one message. Setting a slot overwrites whatever
/// was there; the other slot is left alone, so both can be visible at once.
/// Nothing expires on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifications {
    success: Option<String>,
    error: Option<String>,
}

impl Notifications {
    pub fn new() -> Self {
        Notifications::default()
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn dismiss_success(&mut self) {
        self.success = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn dismiss_all(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.error.is_none()
    }

    /// Active notifications, success first (display order only)
    pub fn active(&self) -> Vec<Notification> {
        let mut active = Vec::new();
        if let Some(message) = &self.success {
            active.push(Notification {
                kind: NotificationKind::Success,
                message: message.clone(),
            });
        }
        if let Some(message) = &self.error {
            active.push(Notification {
                kind: NotificationKind::Error,
                message: message.clone(),
            });
        }
        active
    }
}
