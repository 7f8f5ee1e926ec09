//! Чекбоксы выбора строк для заголовка и тела таблицы
//!
//! # Примеры
//!
//! ```rust,ignore
//! <TableHeaderCheckbox
//!     selected_count=Signal::derive(move || state.with(|s| s.selected.len()))
//!     total=Signal::derive(move || view.with(|v| v.filtered_ids.len()))
//!     on_change=Callback::new(move |check_all: bool| select_all(check_all))
//! />
//!
//! <TableCellCheckbox
//!     checked=Signal::derive(move || state.with(|s| s.is_selected(&id)))
//!     on_toggle=Callback::new(move |_| toggle(&id))
//! />
//! ```

use leptos::prelude::*;
use thaw::{TableCell, TableHeaderCell};
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

fn checkbox_state(selected_count: usize, total: usize) -> CheckboxState {
    if total == 0 || selected_count == 0 {
        CheckboxState::Unchecked
    } else if selected_count >= total {
        CheckboxState::Checked
    } else {
        CheckboxState::Indeterminate
    }
}

/// Чекбокс в заголовке, переключает весь отфильтрованный набор
///
/// Три состояния: unchecked, checked, indeterminate.
#[component]
pub fn TableHeaderCheckbox(
    /// Сколько отфильтрованных строк выбрано
    #[prop(into)]
    selected_count: Signal<usize>,
    /// Количество отфильтрованных строк
    #[prop(into)]
    total: Signal<usize>,
    /// true = выбрать все, false = снять все
    on_change: Callback<bool>,
) -> impl IntoView {
    let state = Signal::derive(move || checkbox_state(selected_count.get(), total.get()));
    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate есть только у DOM-свойства, атрибута нет
    Effect::new(move |_| {
        let indeterminate = matches!(state.get(), CheckboxState::Indeterminate);
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell resizable=false class="table__header-cell table__cell--checkbox">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                aria-label="Select all rows"
                prop:checked=move || matches!(state.get(), CheckboxState::Checked)
                disabled=move || total.get() == 0
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}

/// Чекбокс строки. Клик не доходит до строки.
#[component]
pub fn TableCellCheckbox(
    #[prop(into)]
    checked: Signal<bool>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    view! {
        <TableCell
            class="table__cell table__cell--checkbox"
            on:click=|e| e.stop_propagation()
        >
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                on:change=move |_| on_toggle.run(())
            />
        </TableCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_state() {
        assert_eq!(checkbox_state(0, 0), CheckboxState::Unchecked);
        assert_eq!(checkbox_state(0, 5), CheckboxState::Unchecked);
        assert_eq!(checkbox_state(2, 5), CheckboxState::Indeterminate);
        assert_eq!(checkbox_state(5, 5), CheckboxState::Checked);
    }
}
