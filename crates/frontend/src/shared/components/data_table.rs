//! Универсальная таблица списка по описаниям колонок
//!
//! В клиентском режиме сама фильтрует, сортирует и режет `data` на страницы.
//! С `preserve_order` строки выводятся ровно в том виде, в каком пришли,
//! для страниц с сортировкой и пагинацией на сервере.
//!
//! # Примеры
//!
//! ```rust,ignore
//! <DataTable
//!     title="Customers"
//!     data=rows
//!     columns=vec![Column::new("name", "Name"), Column::new("city", "City")]
//!     search_by="name"
//!     is_delete=Signal::derive(move || perms.can(MENU).delete)
//!     on_delete=Callback::new(move |(row, ticket): (Customer, ConfirmTicket)| { ... })
//! />
//! ```

use leptos::prelude::*;
use std::sync::Arc;
use thaw::{
    Button, ButtonAppearance, Table, TableBody, TableCell, TableCellLayout, TableHeader,
    TableHeaderCell, TableRow,
};

use super::confirm_dialog::{ConfirmDialog, ConfirmHandle, ConfirmTicket};
use super::pagination_controls::PaginationControls;
use super::search_input::SearchInput;
use super::table::{Align, SortableHeaderCell};
use super::table_checkbox::{TableCellCheckbox, TableHeaderCheckbox};
use crate::config::use_app_config;
use crate::shared::icons::icon;
use crate::shared::list_utils::{self, CellValue, TableRow as _};
use crate::shared::table_state::{build_view, keyed_rows, TableState, ViewOptions};

pub type CellRenderer<R> = Arc<dyn Fn(&CellValue, &R) -> AnyView + Send + Sync>;

/// Одна колонка таблицы
#[derive(Clone)]
pub struct Column<R> {
    /// Путь к полю строки, через точку для вложенных полей
    pub id: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub align: Align,
    pub render: Option<CellRenderer<R>>,
}

impl<R> Column<R> {
    pub fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            sortable: true,
            align: Align::Left,
            render: None,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellValue, &R) -> AnyView + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    fn cell_view(&self, row: &R) -> AnyView
    where
        R: list_utils::TableRow,
    {
        let value = row.cell(self.id);
        match &self.render {
            Some(render) => render(&value, row),
            None => value.display().into_any(),
        }
    }
}

/// Какие иконки действий показывать в строке
///
/// Действие доступно только если есть и право, и обработчик.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowActions {
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
}

impl RowActions {
    pub fn resolve(
        is_view: bool,
        has_view: bool,
        is_edit: bool,
        has_edit: bool,
        is_delete: bool,
        has_delete: bool,
    ) -> Self {
        Self {
            view: is_view && has_view,
            edit: is_edit && has_edit,
            delete: is_delete && has_delete,
        }
    }

    /// Нужна ли колонка действий
    pub fn any(self) -> bool {
        self.view || self.edit || self.delete
    }
}

/// Строка, которую нужно удалить после подтверждения. `None` означает,
/// что удалять нечего и диалог нужно просто закрыть.
fn delete_target<R>(pending: Option<R>, has_handler: bool) -> Option<R> {
    pending.filter(|_| has_handler)
}

#[component]
pub fn DataTable<R>(
    #[prop(into)]
    title: String,
    #[prop(into)]
    data: Signal<Vec<R>>,
    columns: Vec<Column<R>>,
    /// Поле, по которому ищет строка поиска
    #[prop(optional, into)]
    search_by: String,
    #[prop(optional, into)]
    is_view: Signal<bool>,
    #[prop(optional, into)]
    is_edit: Signal<bool>,
    #[prop(optional, into)]
    is_delete: Signal<bool>,
    #[prop(optional)]
    on_view: Option<Callback<R>>,
    #[prop(optional)]
    on_edit: Option<Callback<R>>,
    /// Вызывается после подтверждения. По завершении запроса обязан вызвать
    /// `close()` или `release()` у тикета.
    #[prop(optional)]
    on_delete: Option<Callback<(R, ConfirmTicket)>>,
    /// Поиск выполняет вызывающая страница
    #[prop(optional)]
    disable_search: bool,
    /// Пагинацию выполняет вызывающая страница
    #[prop(optional)]
    disable_pagination: bool,
    /// Выводить `data` как есть, без сортировки, фильтра и среза
    #[prop(optional)]
    preserve_order: bool,
    #[prop(optional, into)]
    loading: Signal<bool>,
) -> impl IntoView
where
    R: list_utils::TableRow,
{
    let config = use_app_config();
    let initial_order_by = columns
        .iter()
        .find(|c| c.sortable)
        .map(|c| c.id)
        .unwrap_or_default();
    let state = RwSignal::new(TableState::new(
        initial_order_by,
        config.table.default_rows_per_page,
    ));

    let view_state = Memo::new(move |_| {
        let st = state.get();
        let options = ViewOptions {
            search_by: &search_by,
            preserve_order,
            disable_search,
            disable_pagination,
        };
        data.with(|rows| build_view(rows, &st, &options))
    });

    // Растёт при каждой новой порции данных, входит в ключи строк
    let revision = Memo::new(move |prev: Option<&u64>| {
        data.track();
        prev.map_or(0, |n| n + 1)
    });

    // Выбор остаётся внутри отфильтрованных строк, страница в допустимых пределах
    Effect::new(move |_| {
        let view = view_state.get();
        let needs_update = state.with_untracked(|s| {
            let stale_selection = s.selected.iter().any(|id| !view.filtered_ids.contains(id));
            let page_out_of_range =
                !disable_pagination && s.page > 0 && s.page * s.rows_per_page >= view.total;
            stale_selection || page_out_of_range
        });
        if needs_update {
            state.update(|s| {
                s.retain_selection(&view.filtered_ids);
                if !disable_pagination {
                    s.clamp_page(view.total);
                }
            });
        }
    });

    let actions = Signal::derive(move || {
        RowActions::resolve(
            is_view.get(),
            on_view.is_some(),
            is_edit.get(),
            on_edit.is_some(),
            is_delete.get(),
            on_delete.is_some(),
        )
    });
    let has_actions = move || actions.get().any();

    let column_count = columns.len();
    let col_span = move || (column_count + 1 + usize::from(has_actions())).to_string();

    let pending_delete: RwSignal<Option<R>> = RwSignal::new(None);
    let confirm = ConfirmHandle::new();
    let entity = title.to_lowercase();

    let request_delete = move |row: R| {
        pending_delete.set(Some(row));
        confirm.open();
    };

    let handle_confirm = Callback::new(move |ticket: ConfirmTicket| {
        match (delete_target(pending_delete.get_untracked(), on_delete.is_some()), on_delete) {
            (Some(row), Some(on_delete)) => {
                log::debug!("delete confirmed for {}", row.row_id());
                on_delete.run((row, ticket));
            }
            _ => ticket.close(),
        }
    });

    let on_sort = Callback::new(move |column: String| state.update(|s| s.on_sort(&column)));
    let sort_field = Signal::derive(move || state.with(|s| s.order_by.clone()));
    let sort_order = Signal::derive(move || state.with(|s| s.order));

    let header_cells = columns
        .iter()
        .map(|column| {
            if column.sortable && !preserve_order {
                view! {
                    <SortableHeaderCell
                        label=column.label
                        column_id=column.id
                        current_sort_field=sort_field
                        sort_order=sort_order
                        on_sort=on_sort
                        align=column.align
                    />
                }
                .into_any()
            } else {
                let label = column.label;
                view! {
                    <TableHeaderCell
                        resizable=false
                        class=format!("table__header-cell {}", column.align.class())
                    >
                        {label}
                    </TableHeaderCell>
                }
                .into_any()
            }
        })
        .collect_view();

    let columns = StoredValue::new(columns);
    let query = Signal::derive(move || state.with(|s| s.filter_name.clone()));

    view! {
        <div class="data-table">
            <div class="data-table__toolbar">
                <h2 class="data-table__title">{title.clone()}</h2>
                {(!disable_search).then(|| view! {
                    <SearchInput
                        value=query
                        on_change=Callback::new(move |text: String| state.update(|s| s.on_filter(text)))
                        placeholder=format!("Search {}...", title.to_lowercase())
                    />
                })}
            </div>

            <div class="table-wrapper">
                <Table class="table" attr:aria-busy=move || loading.get().to_string()>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCheckbox
                                selected_count=Signal::derive(move || state.with(|s| s.selected.len()))
                                total=Signal::derive(move || view_state.with(|v| v.filtered_ids.len()))
                                on_change=Callback::new(move |checked: bool| {
                                    let ids = view_state.with_untracked(|v| v.filtered_ids.clone());
                                    state.update(|s| s.on_select_all_rows(checked, &ids));
                                })
                            />
                            {header_cells}
                            <Show when=has_actions>
                                <TableHeaderCell resizable=false class="table__header-cell text-right">
                                    "Actions"
                                </TableHeaderCell>
                            </Show>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            if view_state.with(|v| v.is_not_found) {
                                view! {
                                    <TableRow class="table__row table__row--message">
                                        <TableCell attr:colspan=col_span>
                                            <strong>"Not found"</strong>
                                            <p>{format!("No results found for \"{}\".", query.get().trim())}</p>
                                        </TableCell>
                                    </TableRow>
                                }
                                .into_any()
                            } else if view_state.with(|v| v.rows.is_empty()) {
                                view! {
                                    <TableRow class="table__row table__row--message">
                                        <TableCell attr:colspan=col_span>
                                            {move || if loading.get() { "Loading..." } else { "No data" }}
                                        </TableCell>
                                    </TableRow>
                                }
                                .into_any()
                            } else {
                                ().into_any()
                            }
                        }}
                        <For
                            each=move || {
                                let revision = revision.get();
                                view_state.with(|v| keyed_rows(&v.rows, revision))
                            }
                            key=|(key, _): &(String, R)| key.clone()
                            children=move |(_, row): (String, R)| {
                                let id = row.row_id();
                                let id_for_checked = id.clone();
                                let cells = columns.with_value(|cols| {
                                    cols.iter()
                                        .map(|column| {
                                            let cell = column.cell_view(&row);
                                            view! {
                                                <TableCell class=format!("table__cell {}", column.align.class())>
                                                    <TableCellLayout truncate=true>
                                                        {cell}
                                                    </TableCellLayout>
                                                </TableCell>
                                            }
                                        })
                                        .collect_view()
                                });
                                let row = StoredValue::new(row);

                                view! {
                                    <TableRow class="table__row">
                                        <TableCellCheckbox
                                            checked=Signal::derive(move || state.with(|s| s.is_selected(&id_for_checked)))
                                            on_toggle=Callback::new(move |_| state.update(|s| s.on_select_row(&id)))
                                        />
                                        {cells}
                                        <Show when=has_actions>
                                            <TableCell class="table__cell table__cell--actions text-right">
                                                <Show when=move || actions.get().view>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| {
                                                            if let Some(cb) = on_view {
                                                                cb.run(row.get_value());
                                                            }
                                                        }
                                                        attr:title="View"
                                                    >
                                                        {icon("eye")}
                                                    </Button>
                                                </Show>
                                                <Show when=move || actions.get().edit>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| {
                                                            if let Some(cb) = on_edit {
                                                                cb.run(row.get_value());
                                                            }
                                                        }
                                                        attr:title="Edit"
                                                    >
                                                        {icon("edit")}
                                                    </Button>
                                                </Show>
                                                <Show when=move || actions.get().delete>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        class="button--danger"
                                                        on_click=move |_| request_delete(row.get_value())
                                                        attr:title="Delete"
                                                    >
                                                        {icon("trash")}
                                                    </Button>
                                                </Show>
                                            </TableCell>
                                        </Show>
                                    </TableRow>
                                }
                            }
                        />
                        {move || {
                            let filler = view_state.with(|v| v.empty_rows);
                            (0..filler)
                                .map(|_| view! {
                                    <TableRow class="table__row table__row--filler" attr:aria-hidden="true">
                                        <TableCell attr:colspan=col_span></TableCell>
                                    </TableRow>
                                })
                                .collect_view()
                        }}
                    </TableBody>
                </Table>
            </div>

            {(!disable_pagination && !preserve_order).then(|| view! {
                <PaginationControls
                    current_page=Signal::derive(move || state.with(|s| s.page))
                    total_count=Signal::derive(move || view_state.with(|v| v.total))
                    page_size=Signal::derive(move || state.with(|s| s.rows_per_page))
                    on_page_change=Callback::new(move |page| state.update(|s| s.on_change_page(page)))
                    on_page_size_change=Callback::new(move |size| state.update(|s| s.on_change_rows_per_page(size)))
                    page_size_options=config.table.rows_per_page_options.clone()
                />
            })}

            <ConfirmDialog
                handle=confirm
                title=format!("Delete {}", entity)
                content=Signal::derive(move || {
                    let name = pending_delete.with(|row| {
                        row.as_ref()
                            .map(|r| r.cell(&first_column_id(&columns)).display())
                            .unwrap_or_default()
                    });
                    if name.is_empty() {
                        "Are you sure you want to delete this record?".to_string()
                    } else {
                        format!("Are you sure you want to delete \"{}\"?", name)
                    }
                })
                on_confirm=handle_confirm
            />
        </div>
    }
}

/// Id первой колонки, по нему строка называется в запросе на удаление
fn first_column_id<R: list_utils::TableRow>(columns: &StoredValue<Vec<Column<R>>>) -> String {
    columns.with_value(|cols| cols.first().map(|c| c.id.to_string()).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::components::confirm_dialog::ConfirmGate;

    #[test]
    fn test_action_needs_flag_and_handler() {
        for is_flag in [false, true] {
            for has_handler in [false, true] {
                let expected = is_flag && has_handler;
                let view = RowActions::resolve(is_flag, has_handler, false, false, false, false);
                let edit = RowActions::resolve(false, false, is_flag, has_handler, false, false);
                let delete = RowActions::resolve(false, false, false, false, is_flag, has_handler);
                assert_eq!(view.view, expected);
                assert_eq!(edit.edit, expected);
                assert_eq!(delete.delete, expected);
                assert_eq!(view.any(), expected);
            }
        }
    }

    #[test]
    fn test_actions_resolved_independently() {
        let actions = RowActions::resolve(true, true, true, false, false, true);
        assert_eq!(
            actions,
            RowActions {
                view: true,
                edit: false,
                delete: false,
            }
        );
        assert!(!RowActions::default().any());
    }

    #[test]
    fn test_delete_runs_only_after_confirmation() {
        let gate = ConfirmGate::default().open();

        // Первый клик подтверждает и запускает удаление
        let (gate, fired) = gate.confirm();
        assert!(fired.is_some());
        assert_eq!(delete_target(Some("c1"), true), Some("c1"));

        // Повторный клик, пока запрос идёт, ничего не запускает
        let (_, fired) = gate.confirm();
        assert!(fired.is_none());

        // Отменённый диалог не подтверждается
        let (_, fired) = ConfirmGate::default().open().dismiss().confirm();
        assert!(fired.is_none());
    }

    #[test]
    fn test_confirm_without_target_only_closes() {
        assert_eq!(delete_target::<&str>(None, true), None);
        assert_eq!(delete_target(Some("c1"), false), None);
    }
}
