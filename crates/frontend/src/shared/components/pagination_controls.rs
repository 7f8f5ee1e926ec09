use crate::shared::icons::icon;
use crate::shared::table_state::page_count;
use leptos::prelude::*;

/// Панель пагинации. Страницы нумеруются с 0.
///
/// # Примеры
///
/// ```rust,ignore
/// <PaginationControls
///     current_page=page
///     total_count=total
///     page_size=page_size
///     on_page_change=Callback::new(move |p| page.set(p))
///     on_page_size_change=Callback::new(move |size| page_size.set(size))
///     page_size_options=vec![5, 10, 25]
/// />
/// ```
#[component]
pub fn PaginationControls(
    /// Текущая страница (с 0)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Общее количество строк по всем страницам
    #[prop(into)]
    total_count: Signal<usize>,

    /// Текущий размер страницы
    #[prop(into)]
    page_size: Signal<usize>,

    /// Callback при смене страницы
    on_page_change: Callback<usize>,

    /// Callback при смене размера страницы
    on_page_size_change: Callback<usize>,

    /// Доступные размеры страницы
    page_size_options: Vec<usize>,
) -> impl IntoView {
    let total_pages = Signal::derive(move || page_count(total_count.get(), page_size.get()));
    let fallback_size = page_size_options.first().copied().unwrap_or(10);

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=move || current_page.get() == 0
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 0 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || current_page.get() == 0
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    let size = page_size.get();
                    let count = total_count.get();
                    let start = (current_page.get() * size).min(count);
                    let end = (start + size).min(count);
                    let first = if count == 0 { 0 } else { start + 1 };
                    format!("{}–{} of {}", first, end, count)
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page + 1 < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=move || current_page.get() + 1 >= total_pages.get()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get() - 1)
                disabled=move || current_page.get() + 1 >= total_pages.get()
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <label class="pagination-size">
                "Rows per page"
                <select
                    class="page-size-select"
                    on:change=move |ev| {
                        let val = event_target_value(&ev).parse().unwrap_or(fallback_size);
                        on_page_size_change.run(val);
                    }
                    prop:value=move || page_size.get().to_string()
                >
                    {page_size_options.iter().map(|&size| {
                        view! {
                            <option value={size.to_string()} selected=move || page_size.get() == size>
                                {size.to_string()}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </label>
        </div>
    }
}
