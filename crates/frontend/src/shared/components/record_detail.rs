//! Модальное окно просмотра записи, открывается из действий таблицы
//!
//! # Примеры
//!
//! ```rust,ignore
//! let detail = DetailState::<Customer>::new();
//!
//! <DataTable
//!     on_view=Callback::new(move |row: Customer| {
//!         detail.open(row, |id| async move { fetch_customer(&id).await });
//!     })
//!     ...
//! />
//! <Show when=move || detail.is_open()>
//!     <RecordDetail
//!         title="Customer"
//!         fields=Signal::derive(move || detail.record.with(|r| ...))
//!         loading=detail.loading
//!         on_close=Callback::new(move |_| detail.close())
//!     />
//! </Show>
//! ```

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use std::future::Future;

use crate::shared::api_utils::ApiError;
use crate::shared::icons::icon;
use crate::shared::list_utils::{CellValue, TableRow};
use crate::shared::toast::{use_toast, ToastService};

const PLACEHOLDER: &str = "-";

/// Пары `(label, path)` в виде `(label, текст для показа)`
pub fn row_fields<R: TableRow>(row: &R, fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(label, path)| (label.to_string(), display_or_placeholder(&row.cell(path))))
        .collect()
}

/// Все скалярные листья JSON-объекта с путём через точку.
/// Массивы скаляров склеиваются через запятую, массивы объектов считаются.
pub fn json_fields(value: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    collect_leaves("", value, &mut out);
    out
}

fn collect_leaves(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_leaves(&path, child, out);
            }
        }
        Value::Array(items) if items.iter().any(|v| v.is_object()) => {
            out.push((prefix.to_string(), format!("{} items", items.len())));
        }
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(|v| CellValue::from(v).display())
                .collect::<Vec<_>>()
                .join(", ");
            out.push((prefix.to_string(), or_placeholder(joined)));
        }
        scalar => out.push((prefix.to_string(), display_or_placeholder(&CellValue::from(scalar)))),
    }
}

fn display_or_placeholder(value: &CellValue) -> String {
    or_placeholder(value.display())
}

fn or_placeholder(text: String) -> String {
    if text.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        text
    }
}

/// Запись в модальном окне, при открытии обновляется с сервера
pub struct DetailState<R: TableRow> {
    pub record: RwSignal<Option<R>>,
    pub loading: RwSignal<bool>,
    toast: ToastService,
}

impl<R: TableRow> Clone for DetailState<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: TableRow> Copy for DetailState<R> {}

impl<R: TableRow> DetailState<R> {
    pub fn new() -> Self {
        Self {
            record: RwSignal::new(None),
            loading: RwSignal::new(false),
            toast: use_toast(),
        }
    }

    /// Сразу показывает снимок из таблицы, затем подменяет его загруженной
    /// записью. При ошибке снимок остаётся.
    pub fn open<F, Fut>(&self, row: R, fetch: F)
    where
        F: FnOnce(String) -> Fut + 'static,
        Fut: Future<Output = Result<R, ApiError>> + 'static,
    {
        let id = row.row_id();
        self.record.set(Some(row));
        self.loading.set(true);

        let this = *self;
        spawn_local(async move {
            let result = fetch(id.clone()).await;
            // Ответ для записи, которая уже не показана, игнорируется
            if !this.is_showing(&id) {
                return;
            }
            match result {
                Ok(fresh) => this.record.set(Some(fresh)),
                Err(e) => {
                    log::error!("failed to load record {}: {}", id, e);
                    this.toast.error(format!("Could not refresh details: {}", e));
                }
            }
            this.loading.set(false);
        });
    }

    pub fn close(&self) {
        self.record.set(None);
        self.loading.set(false);
    }

    pub fn is_open(&self) -> bool {
        self.record.with(Option::is_some)
    }

    /// Заменяет показанную запись без повторной загрузки
    pub fn replace(&self, row: R) {
        if self.is_showing(&row.row_id()) {
            self.record.set(Some(row));
        }
    }

    fn is_showing(&self, id: &str) -> bool {
        self.record
            .with_untracked(|r| r.as_ref().is_some_and(|r| r.row_id() == id))
    }
}

#[component]
pub fn RecordDetail(
    #[prop(into)]
    title: Signal<String>,
    #[prop(into)]
    fields: Signal<Vec<(String, String)>>,
    #[prop(optional, into)]
    loading: Signal<bool>,
    on_close: Callback<()>,
    /// Дополнительные кнопки в подвале
    #[prop(optional, into)]
    actions: Option<ViewFn>,
) -> impl IntoView {
    let escape = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || escape.remove());

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal modal--detail" role="dialog" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    <Show when=move || loading.get()>
                        <div class="modal-body__loading">"Loading..."</div>
                    </Show>
                    <dl class="detail-list">
                        {move || {
                            fields
                                .get()
                                .into_iter()
                                .map(|(label, value)| view! {
                                    <div class="detail-list__row">
                                        <dt>{label}</dt>
                                        <dd>{value}</dd>
                                    </div>
                                })
                                .collect_view()
                        }}
                    </dl>
                </div>
                <div class="modal-footer">
                    {actions.map(|actions| actions.run())}
                    <button class="button button--secondary" on:click=move |_| on_close.run(())>
                        "Close"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::JsonRow;
    use serde_json::json;

    #[test]
    fn test_row_fields_use_placeholder_for_missing_values() {
        let row = JsonRow::new(json!({ "id": "e1", "amount": 2500, "customer": { "name": "Asha" } }));
        let fields = row_fields(&row, &[("Customer", "customer.name"), ("Due", "dueDate")]);
        assert_eq!(
            fields,
            vec![
                ("Customer".to_string(), "Asha".to_string()),
                ("Due".to_string(), "-".to_string()),
            ]
        );
    }

    #[test]
    fn test_json_fields_flattens_nested_objects() {
        let value = json!({
            "id": "e1",
            "paid": true,
            "customer": { "name": "Asha", "city": null },
            "tags": ["late", "partial"],
            "payments": [{ "amount": 1 }, { "amount": 2 }]
        });
        let fields = json_fields(&value);
        let lookup = |key: &str| {
            fields
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(lookup("customer.name"), Some("Asha"));
        assert_eq!(lookup("customer.city"), Some("-"));
        assert_eq!(lookup("paid"), Some("Yes"));
        assert_eq!(lookup("tags"), Some("late, partial"));
        assert_eq!(lookup("payments"), Some("2 items"));
    }
}
