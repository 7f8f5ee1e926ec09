//! Проекты ищет и разбивает на страницы сервер. Таблица выводит только
//! полученную страницу (`preserve_order`), а поиск и пагинация живут на
//! самой странице.

use contracts::domain::project::Project;
use contracts::shared::api::ListQuery;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Badge, BadgeAppearance, BadgeColor};

use crate::config::use_app_config;
use crate::domain::projects::api::{
    delete_project, fetch_project, fetch_projects, settled_page, total_rows,
};
use crate::shared::components::confirm_dialog::ConfirmTicket;
use crate::shared::components::data_table::{Column, DataTable};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::record_detail::{row_fields, DetailState, RecordDetail};
use crate::shared::components::search_input::SearchInput;
use crate::shared::components::table::number_format::format_number_int;
use crate::shared::components::table::Align;
use crate::shared::date_utils::format_date;
use crate::shared::list_utils::CellValue;
use crate::shared::toast::use_toast;
use crate::system::permissions::use_permissions;

const MENU: &str = "Project";

const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("Name", "name"),
    ("Location", "location"),
    ("Total units", "totalUnits"),
    ("Launch date", "launchDate"),
    ("Status", "status"),
];

fn status_color(status: &str) -> BadgeColor {
    match status.to_ascii_lowercase().as_str() {
        "active" | "ongoing" => BadgeColor::Success,
        "completed" => BadgeColor::Informative,
        "on hold" | "paused" => BadgeColor::Warning,
        _ => BadgeColor::Subtle,
    }
}

#[component]
pub fn ProjectList() -> impl IntoView {
    let config = use_app_config();
    let permissions = use_permissions();
    let toast = use_toast();

    let rows = RwSignal::new(Vec::<Project>::new());
    let total = RwSignal::new(0usize);
    let loading = RwSignal::new(false);
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(config.table.default_rows_per_page);
    let search = RwSignal::new(String::new());
    let request_seq = StoredValue::new(0u64);
    let detail = DetailState::<Project>::new();

    let load = move || {
        let query = ListQuery::from_view(
            page.get_untracked(),
            page_size.get_untracked(),
            &search.get_untracked(),
        );
        request_seq.update_value(|n| *n += 1);
        let seq = request_seq.get_value();
        loading.set(true);

        spawn_local(async move {
            let result = fetch_projects(&query).await;
            // С тех пор ушёл более новый запрос
            if request_seq.get_value() != seq {
                return;
            }
            match result {
                Ok(list) => {
                    let requested = page.get_untracked();
                    let settled = settled_page(&list, requested, page_size.get_untracked());
                    if settled != requested {
                        // Сервер отдал другую страницу, эффект перезапросит её
                        log::debug!("projects page {} settled on {}", requested, settled);
                        page.set(settled);
                    } else {
                        total.set(total_rows(&list));
                        rows.set(list.rows);
                    }
                }
                Err(e) => {
                    log::error!("failed to load projects: {}", e);
                    toast.error(format!("Failed to load projects: {}", e));
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        page.track();
        page_size.track();
        search.track();
        load();
    });

    let on_search = Callback::new(move |text: String| {
        if search.get_untracked().trim() != text.trim() {
            page.set(0);
        }
        search.set(text);
    });

    let open_detail = Callback::new(move |row: Project| {
        detail.open(row, |id| async move { fetch_project(&id).await });
    });

    let on_delete = Callback::new(move |(row, confirm): (Project, ConfirmTicket)| {
        spawn_local(async move {
            match delete_project(&row.id).await {
                Ok(()) => {
                    toast.success(format!("Project \"{}\" deleted", row.name));
                    load();
                }
                Err(e) => {
                    log::error!("failed to delete project {}: {}", row.id, e);
                    toast.error(format!("Failed to delete project: {}", e));
                }
            }
            confirm.close();
        });
    });

    let columns = vec![
        Column::new("name", "Project"),
        Column::new("location", "Location"),
        Column::new("totalUnits", "Units")
            .align(Align::Right)
            .render(|value, _| match value {
                CellValue::Int(n) => format_number_int(*n as f64).into_any(),
                other => other.display().into_any(),
            }),
        Column::new("launchDate", "Launch").render(|value, _| format_date(&value.display()).into_any()),
        Column::new("status", "Status").render(|value, _| {
            let status = value.display();
            if status.is_empty() {
                ().into_any()
            } else {
                view! {
                    <Badge appearance=BadgeAppearance::Tint color=status_color(&status)>
                        {status}
                    </Badge>
                }
                .into_any()
            }
        }),
    ];

    view! {
        <div class="page">
            <div class="page__toolbar">
                <SearchInput
                    value=search
                    on_change=on_search
                    placeholder="Search projects..."
                />
            </div>
            <DataTable
                title="Projects"
                data=rows
                columns=columns
                loading=loading
                preserve_order=true
                disable_search=true
                disable_pagination=true
                is_view=Signal::derive(move || permissions.can(MENU).read)
                is_edit=Signal::derive(move || permissions.can(MENU).update)
                is_delete=Signal::derive(move || permissions.can(MENU).delete)
                on_view=open_detail
                on_edit=open_detail
                on_delete=on_delete
            />
            <PaginationControls
                current_page=page
                total_count=total
                page_size=page_size
                on_page_change=Callback::new(move |p| page.set(p))
                on_page_size_change=Callback::new(move |size: usize| {
                    if size > 0 {
                        page_size.set(size);
                        page.set(0);
                    }
                })
                page_size_options=config.table.rows_per_page_options.clone()
            />
            <Show when=move || detail.is_open()>
                <RecordDetail
                    title="Project"
                    fields=Signal::derive(move || {
                        detail.record.with(|r| r.as_ref().map(|p| row_fields(p, DETAIL_FIELDS)).unwrap_or_default())
                    })
                    loading=detail.loading
                    on_close=Callback::new(move |_| detail.close())
                />
            </Show>
        </div>
    }
}
