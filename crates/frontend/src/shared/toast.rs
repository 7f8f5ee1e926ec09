use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastIntent {
    Success,
    Error,
    Info,
}

impl ToastIntent {
    fn modifier(self) -> &'static str {
        match self {
            ToastIntent::Success => "toast--success",
            ToastIntent::Error => "toast--error",
            ToastIntent::Info => "toast--info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub intent: ToastIntent,
    pub message: String,
}

/// Стек видимых уведомлений, старые первыми
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, intent: ToastIntent, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            intent,
            message: message.into(),
        });
        id
    }

    /// Неизвестный id ничего не меняет.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Неблокирующие уведомления пользователя
#[derive(Clone, Copy)]
pub struct ToastService {
    queue: RwSignal<ToastQueue>,
    timeout_ms: u32,
}

impl ToastService {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
            timeout_ms,
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastIntent::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastIntent::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(ToastIntent::Info, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }

    fn show(&self, intent: ToastIntent, message: String) {
        let mut id = 0;
        self.queue.update(|q| id = q.push(intent, message));

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(this.timeout_ms).await;
            this.dismiss(id);
        });
    }
}

pub fn use_toast() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided in context")
}

/// Выводит стек уведомлений. Монтируется один раз у корня.
#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = use_toast();

    view! {
        <div class="toaster" role="status" aria-live="polite">
            <For
                each=move || toasts.queue.with(|q| q.iter().cloned().collect::<Vec<_>>())
                key=|t| t.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=format!("toast {}", toast.intent.modifier())>
                            <span class="toast__message">{toast.message}</span>
                            <button
                                class="button button--icon toast__close"
                                on:click=move |_| toasts.dismiss(id)
                                title="Dismiss"
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastIntent::Error, "Failed to load customers");
        let second = queue.push(ToastIntent::Success, "Deleted");
        assert!(second > first);
        let messages: Vec<_> = queue.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["Failed to load customers", "Deleted"]);
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastIntent::Info, "a");
        queue.push(ToastIntent::Info, "b");
        queue.dismiss(first);
        assert_eq!(queue.len(), 1);
        queue.dismiss(999);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().map(|t| t.message.as_str()), Some("b"));
    }

    #[test]
    fn test_ids_are_not_reused_after_dismiss() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastIntent::Info, "a");
        queue.dismiss(first);
        assert!(queue.is_empty());
        assert_ne!(queue.push(ToastIntent::Info, "b"), first);
    }
}
