use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::shared::icons::icon;

const DEBOUNCE_MS: i32 = 300;

/// Поле поиска с debounce и кнопкой очистки
///
/// # Примеры
///
/// ```rust,ignore
/// <SearchInput
///     value=search
///     on_change=Callback::new(move |text: String| search.set(text))
///     placeholder="Search projects..."
/// />
/// ```
#[component]
pub fn SearchInput(
    /// Применённое значение фильтра
    #[prop(into)]
    value: Signal<String>,
    /// Получает новый фильтр после задержки debounce
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    // Введённый текст до срабатывания debounce
    let (input_value, set_input_value) = signal(value.get_untracked());
    let debounce_timeout = StoredValue::new(None::<i32>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };
        if let Some(timeout_id) = debounce_timeout.get_value() {
            window.clear_timeout_with_handle(timeout_id);
        }

        let closure = Closure::once_into_js(move || on_change.run(new_value));
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.unchecked_ref::<js_sys::Function>(),
            DEBOUNCE_MS,
        ) {
            Ok(timeout_id) => debounce_timeout.set_value(Some(timeout_id)),
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        if let (Some(window), Some(timeout_id)) = (web_sys::window(), debounce_timeout.get_value()) {
            window.clear_timeout_with_handle(timeout_id);
        }
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class=move || {
            if is_filter_active() { "search-input search-input--active" } else { "search-input" }
        }>
            <span class="search-input__icon">{icon("search")}</span>
            <input
                type="text"
                class="search-input__field"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button
                    class="search-input__clear"
                    on:click=clear_filter
                    title="Clear"
                >
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}
