use std::fmt;
use std::time::Duration;

/// How long ordinary toasts stay visible.
const DEFAULT_TTL: Duration = Duration::from_secs(4);

/// Errors stay up longer so they are not missed.
const ERROR_TTL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl Level {
    fn ttl(self) -> Duration {
        match self {
            Self::Error => ERROR_TTL,
            _ => DEFAULT_TTL,
        }
    }

    fn marker(self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Error => "✖",
            Self::Warning => "!",
            Self::Info => "i",
        }
    }
}

/// One notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: Level,
    pub title: String,
    /// Optional second line.
    pub description: Option<String>,
    pub ttl: Duration,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.marker(), self.title)?;
        if let Some(description) = &self.description {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

/// Pending toasts in arrival order.
///
/// Expiry is left to whoever renders the queue; ids are never reused.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a toast and returns its id.
    pub fn push(&mut self, level: Level, title: impl Into<String>, description: Option<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            level,
            title: title.into(),
            description,
            ttl: level.ttl(),
        });
        id
    }

    pub fn success(&mut self, title: impl Into<String>) -> u64 {
        self.push(Level::Success, title, None)
    }

    pub fn error(&mut self, title: impl Into<String>) -> u64 {
        self.push(Level::Error, title, None)
    }

    pub fn warning(&mut self, title: impl Into<String>) -> u64 {
        self.push(Level::Warning, title, None)
    }

    pub fn info(&mut self, title: impl Into<String>) -> u64 {
        self.push(Level::Info, title, None)
    }

    pub fn success_with(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.push(Level::Success, title, Some(description.into()))
    }

    pub fn error_with(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.push(Level::Error, title, Some(description.into()))
    }

    pub fn warning_with(&mut self, title: impl Into<String>, description: impl Into<String>) -> u64 {
        self.push(Level::Warning, title, Some(description.into()))
    }

    /// Dismisses a toast. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn get(&self, id: u64) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Removes and returns every pending toast, oldest first.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}
