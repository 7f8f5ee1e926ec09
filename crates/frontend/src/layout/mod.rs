pub mod global_context;
pub mod sidebar;
pub mod top_header;

use leptos::prelude::*;

use crate::domain::customers::ui::list::CustomerList;
use crate::domain::emis::ui::list::EmiList;
use crate::domain::projects::ui::list::ProjectList;
use crate::domain::roles::ui::list::RoleList;
use crate::system::permissions::use_permissions;
use global_context::{first_readable, use_global_context, Page};
use sidebar::Sidebar;
use top_header::TopHeader;

/// Главная оболочка приложения
///
/// ```text
/// +------------------------------+
/// |          TopHeader           |
/// +------------------------------+
/// |  Sidebar  |     Content      |
/// +------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_global_context();
    let permissions = use_permissions();

    // Если активной страницы нет или она недоступна, открыть первую доступную
    Effect::new(move |_| {
        let active_readable = ctx
            .active
            .get()
            .is_some_and(|page| permissions.can(page.menu()).read);
        if !active_readable {
            if let Some(page) = first_readable(|menu| permissions.can(menu).read) {
                ctx.activate(page);
            }
        }
    });

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <Sidebar />
                <main class="app-main">
                    {move || match ctx.active.get() {
                        Some(page) if permissions.can(page.menu()).read => page_view(page),
                        _ => view! { <NoAccess /> }.into_any(),
                    }}
                </main>
            </div>
        </div>
    }
}

fn page_view(page: Page) -> AnyView {
    match page {
        Page::Customers => view! { <CustomerList /> }.into_any(),
        Page::Projects => view! { <ProjectList /> }.into_any(),
        Page::Emis => view! { <EmiList /> }.into_any(),
        Page::Roles => view! { <RoleList /> }.into_any(),
    }
}

#[component]
fn NoAccess() -> impl IntoView {
    view! {
        <div class="notice notice--warning">
            <h2>"No access"</h2>
            <p>"Your role does not grant access to any section. Contact an administrator."</p>
        </div>
    }
}
