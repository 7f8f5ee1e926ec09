//! Верхняя панель приложения

use crate::layout::global_context::use_global_context;
use crate::shared::icons::icon;
use crate::shared::storage;
use crate::shared::toast::use_toast;
use crate::system::permissions::use_permissions;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let permissions = use_permissions();
    let toast = use_toast();

    let reload_permissions = move |_| {
        permissions.reload();
        toast.info("Permissions reloaded");
    };

    let sign_out = move |_| {
        storage::clear_session();
        permissions.reload();
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                log::error!("reload after sign-out failed: {:?}", e);
            }
        }
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Lending Admin"</span>
            </div>

            <div class="top-header__actions">
                <Show when=move || permissions.is_admin()>
                    <span class="badge badge--admin">"Admin"</span>
                </Show>
                <button
                    class="top-header__icon-btn"
                    on:click=reload_permissions
                    title="Reload permissions"
                >
                    {icon("refresh")}
                </button>
                <button class="top-header__icon-btn" on:click=sign_out title="Sign out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
