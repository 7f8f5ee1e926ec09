//! Компонент сортируемой ячейки заголовка таблицы
//!
//! # Примеры
//!
//! ```rust,ignore
//! // Базовое использование
//! <SortableHeaderCell
//!     label="Name"
//!     column_id="name"
//!     current_sort_field=Signal::derive(move || state.with(|s| s.order_by.clone()))
//!     sort_order=Signal::derive(move || state.with(|s| s.order))
//!     on_sort=Callback::new(move |field| state.update(|s| s.on_sort(&field)))
//! />
//!
//! // Числовая колонка
//! <SortableHeaderCell
//!     label="Amount"
//!     column_id="amount"
//!     align=Align::Right
//!     ...
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator, SortOrder};
use leptos::prelude::*;
use thaw::TableHeaderCell;

use super::Align;

/// Значение `aria-sort` для колонки
fn aria_sort(current_field: &str, column_id: &str, order: SortOrder) -> &'static str {
    if current_field != column_id {
        "none"
    } else {
        match order {
            SortOrder::Asc => "ascending",
            SortOrder::Desc => "descending",
        }
    }
}

/// Ячейка заголовка с индикатором сортировки (▲▼⇅)
///
/// Клик по заголовку передаёт `column_id` в `on_sort`.
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Колонка, по которой сортирует заголовок
    #[prop(into)]
    column_id: String,

    /// Текущее поле сортировки из state
    #[prop(into)]
    current_sort_field: Signal<String>,

    /// Направление сортировки из state
    #[prop(into)]
    sort_order: Signal<SortOrder>,

    on_sort: Callback<String>,

    #[prop(optional)]
    align: Align,
) -> impl IntoView {
    let column_for_click = column_id.clone();
    let column_for_indicator = column_id.clone();
    let column_for_aria = column_id.clone();

    let header_style = if align == Align::Right {
        "justify-content: flex-end; width: 100%;"
    } else {
        ""
    };

    view! {
        <TableHeaderCell
            resizable=false
            class=format!("table__header-cell {}", align.class())
            attr:aria-sort=move || aria_sort(&current_sort_field.get(), &column_for_aria, sort_order.get())
        >
            <div
                class="table__sortable-header"
                style=header_style
                on:click=move |_| on_sort.run(column_for_click.clone())
            >
                {label}
                <span class=move || get_sort_class(&current_sort_field.get(), &column_id)>
                    {move || {
                        get_sort_indicator(
                            &current_sort_field.get(),
                            &column_for_indicator,
                            sort_order.get(),
                        )
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aria_sort() {
        assert_eq!(aria_sort("name", "name", SortOrder::Asc), "ascending");
        assert_eq!(aria_sort("name", "name", SortOrder::Desc), "descending");
        assert_eq!(aria_sort("amount", "name", SortOrder::Asc), "none");
    }
}
