//! Боковая панель с пунктом для каждой страницы, доступной на чтение

use crate::layout::global_context::{use_global_context, Page};
use crate::shared::icons::icon;
use crate::system::permissions::use_permissions;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_global_context();
    let permissions = use_permissions();

    let readable = move || {
        Page::ALL
            .into_iter()
            .filter(|page| permissions.can(page.menu()).read)
            .collect::<Vec<_>>()
    };

    view! {
        <nav class="app-sidebar" class:hidden=move || !ctx.left_open.get()>
            <Show
                when=move || !readable().is_empty()
                fallback=|| view! {
                    <div class="app-sidebar__empty">"No menus available"</div>
                }
            >
                <For
                    each=readable
                    key=|page| page.key()
                    children=move |page: Page| {
                        view! {
                            <div
                                class="app-sidebar__item"
                                class:app-sidebar__item--active=move || ctx.active.get() == Some(page)
                                on:click=move |_| ctx.activate(page)
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(page.icon())}
                                    <span>{page.label()}</span>
                                </div>
                            </div>
                        }
                    }
                />
            </Show>
        </nav>
    }
}
