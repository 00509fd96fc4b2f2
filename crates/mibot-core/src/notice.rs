//! Transient operator notices (the toast analog).

use std::time::{Duration, Instant};

/// Severity of a notice, mapped to a color by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single transient notice shown in the notice bar.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub created_at: Instant,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            created_at: Instant::now(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, text)
    }

    /// Whether the notice has outlived its display window.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_constructors_set_level() {
        assert_eq!(Notice::info("a").level, NoticeLevel::Info);
        assert_eq!(Notice::success("b").level, NoticeLevel::Success);
        assert_eq!(Notice::warning("c").level, NoticeLevel::Warning);
        assert_eq!(Notice::error("d").level, NoticeLevel::Error);
    }

    #[test]
    fn test_fresh_notice_not_expired() {
        let notice = Notice::info("hello");
        assert!(!notice.is_expired(Duration::from_secs(3)));
        assert!(notice.is_expired(Duration::ZERO));
    }
}
