//! Dismissible toasts. Each one closes itself after its level's timeout.

use std::time::Duration;

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    pub fn timeout(self) -> Duration {
        match self {
            NoticeLevel::Success => Duration::from_secs(3),
            NoticeLevel::Error => Duration::from_secs(5),
        }
    }

    fn class(self) -> &'static str {
        match self {
            NoticeLevel::Success => "toast success",
            NoticeLevel::Error => "toast error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Notifications {
    pub notices: Vec<Notice>,
    next_id: u64,
}

impl Notifications {
    pub fn push(&mut self, level: NoticeLevel, title: &str, description: Option<&str>) -> u64 {
        self.next_id += 1;
        self.notices.push(Notice {
            id: self.next_id,
            level,
            title: title.to_string(),
            description: description.map(str::to_string),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }
}

pub fn use_notifications() -> Signal<Notifications> {
    use_context::<Signal<Notifications>>()
}

/// Show a toast and schedule its removal.
pub fn notify(
    notifications: &mut Signal<Notifications>,
    level: NoticeLevel,
    title: &str,
    description: Option<&str>,
) {
    let id = notifications.write().push(level, title, description);
    let mut notifications = *notifications;
    spawn(async move {
        sleep(level.timeout()).await;
        notifications.write().dismiss(id);
    });
}

async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

#[component]
pub fn NotificationProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(Notifications::default()));

    rsx! {
        {children}
        NotificationStack {}
    }
}

#[component]
fn NotificationStack() -> Element {
    let mut notifications = use_notifications();
    let notices = notifications().notices.clone();

    rsx! {
        div {
            class: "toast-stack",
            for notice in notices {
                div {
                    key: "{notice.id}",
                    class: notice.level.class(),
                    role: "status",
                    div {
                        class: "toast-body",
                        strong { "{notice.title}" }
                        if let Some(description) = &notice.description {
                            p { "{description}" }
                        }
                    }
                    button {
                        class: "toast-close",
                        aria_label: "Close",
                        onclick: move |_| notifications.write().dismiss(notice.id),
                        crate::Icon { width: 12, height: 12, icon: crate::icons::FaXmark }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_removes_only_that_notice() {
        let mut notes = Notifications::default();
        let first = notes.push(NoticeLevel::Success, "Item deleted", None);
        let second = notes.push(NoticeLevel::Error, "Error", Some("Failed to delete cost"));
        assert_ne!(first, second);

        notes.dismiss(first);
        assert_eq!(notes.notices.len(), 1);
        assert_eq!(notes.notices[0].description.as_deref(), Some("Failed to delete cost"));
        assert_eq!(notes.notices[0].level.timeout(), Duration::from_secs(5));
    }
}
