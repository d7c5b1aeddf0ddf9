//! Dismissible notices shown at the top of the page

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::constants::{animation, markup};
use crate::view::ElementHandle;

/// Bootstrap alert flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeKind {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Danger => "danger",
        }
    }
}

pub type NoticeId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
    /// Message markup, inserted as-is
    pub message: String,
}

impl Notice {
    pub fn markup(&self) -> String {
        format!(
            r#"<div class="alert alert-{} alert-dismissible fade show">{}{}</div>"#,
            self.kind.as_str(),
            self.message,
            markup::CLOSE_BUTTON
        )
    }
}

/// Area holding the currently displayed notices, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeArea {
    notices: Vec<Notice>,
    next_id: NoticeId,
}

impl NoticeArea {
    pub fn push(&mut self, message: impl Into<String>, kind: NoticeKind) -> NoticeId {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.insert(
            0,
            Notice {
                id,
                kind,
                message: message.into(),
            },
        );
        id
    }

    /// Remove a notice; returns false when it was already gone
    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn markup(&self) -> String {
        self.notices.iter().map(Notice::markup).collect()
    }
}

/// Show a notice that dismisses itself after the default lifetime
pub fn show_alert(
    area: &ElementHandle<NoticeArea>,
    message: impl Into<String>,
    kind: NoticeKind,
) -> NoticeId {
    show_alert_for(area, message, kind, animation::NOTICE_LIFETIME)
}

/// Show a notice that dismisses itself after `lifetime`
pub fn show_alert_for(
    area: &ElementHandle<NoticeArea>,
    message: impl Into<String>,
    kind: NoticeKind,
    lifetime: Duration,
) -> NoticeId {
    let id = area.write(|a| a.push(message, kind));

    let area = area.clone();
    tokio::spawn(async move {
        sleep(lifetime).await;
        if area.write(|a| a.dismiss(id)) {
            debug!("Notice {} expired", id);
        }
    });

    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_markup() {
        let notice = Notice {
            id: 0,
            kind: NoticeKind::Success,
            message: "Saved <b>Inception</b>".to_string(),
        };
        assert_eq!(
            notice.markup(),
            r#"<div class="alert alert-success alert-dismissible fade show">Saved <b>Inception</b><button type="button" class="btn-close" data-bs-dismiss="alert"></button></div>"#
        );
    }

    #[test]
    fn test_newest_notice_first() {
        let mut area = NoticeArea::default();
        let first = area.push("one", NoticeKind::Info);
        let second = area.push("two", NoticeKind::Warning);
        assert_ne!(first, second);
        let ids: Vec<_> = area.notices().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn test_dismiss() {
        let mut area = NoticeArea::default();
        let id = area.push("bye", NoticeKind::Danger);
        assert!(area.dismiss(id));
        assert!(!area.dismiss(id));
        assert_eq!(area.markup(), "");
    }

    #[tokio::test]
    async fn test_notice_expires() {
        let area = ElementHandle::new(NoticeArea::default());
        let id = show_alert_for(&area, "temporary", NoticeKind::Info, Duration::from_millis(50));
        assert_eq!(area.read(|a| a.notices().len()), 1);

        sleep(Duration::from_millis(200)).await;
        assert!(area.read(|a| a.notices().iter().all(|n| n.id != id)));
    }

    #[tokio::test]
    async fn test_manual_dismiss_before_expiry() {
        let area = ElementHandle::new(NoticeArea::default());
        let id = show_alert(&area, "closable", NoticeKind::default());
        assert!(area.write(|a| a.dismiss(id)));
        assert!(area.read(|a| a.notices().is_empty()));
    }
}
