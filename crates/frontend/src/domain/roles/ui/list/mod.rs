use contracts::domain::role::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Badge, BadgeAppearance, BadgeColor};

use crate::domain::roles::api::{delete_role, fetch_role, fetch_roles, set_role_active};
use crate::domain::roles::menu_summary;
use crate::shared::components::confirm_dialog::ConfirmTicket;
use crate::shared::components::data_table::{Column, DataTable};
use crate::shared::components::record_detail::{row_fields, DetailState, RecordDetail};
use crate::shared::components::table::Align;
use crate::shared::list_utils::CellValue;
use crate::shared::toast::use_toast;
use crate::system::permissions::use_permissions;

const MENU: &str = "Role";

const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("Name", "name"),
    ("Description", "description"),
    ("Active", "isActive"),
];

#[component]
pub fn RoleList() -> impl IntoView {
    let permissions = use_permissions();
    let toast = use_toast();
    let rows = RwSignal::new(Vec::<Role>::new());
    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let detail = DetailState::<Role>::new();

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match fetch_roles().await {
                Ok(list) => rows.set(list),
                Err(e) => {
                    log::error!("failed to load roles: {}", e);
                    toast.error(format!("Failed to load roles: {}", e));
                }
            }
            loading.set(false);
        });
    };
    load();

    let open_detail = Callback::new(move |row: Role| {
        detail.open(row, |id| async move { fetch_role(&id).await });
    });

    let toggle_active = move |_| {
        let Some(role) = detail.record.get_untracked() else {
            return;
        };
        saving.set(true);
        spawn_local(async move {
            match set_role_active(&role.id, !role.is_active).await {
                Ok(updated) => {
                    let state = if updated.is_active { "activated" } else { "deactivated" };
                    toast.success(format!("Role \"{}\" {}", updated.name, state));
                    detail.replace(updated);
                    load();
                }
                Err(e) => {
                    log::error!("failed to update role {}: {}", role.id, e);
                    toast.error(format!("Failed to update role: {}", e));
                }
            }
            saving.set(false);
        });
    };

    // При ошибке удаления диалог остаётся открытым для повторной попытки
    let on_delete = Callback::new(move |(row, confirm): (Role, ConfirmTicket)| {
        spawn_local(async move {
            match delete_role(&row.id).await {
                Ok(()) => {
                    confirm.close();
                    toast.success(format!("Role \"{}\" deleted", row.name));
                    load();
                }
                Err(e) => {
                    log::error!("failed to delete role {}: {}", row.id, e);
                    toast.error(format!("Failed to delete role: {}", e));
                    confirm.release();
                }
            }
        });
    });

    let columns = vec![
        Column::new("name", "Role"),
        Column::new("description", "Description").unsortable(),
        Column::new("menuCount", "Menus").align(Align::Right),
        Column::new("isActive", "Status")
            .align(Align::Center)
            .render(|value, _| {
                let active = matches!(value, CellValue::Bool(true));
                let (label, color) = if active {
                    ("Active", BadgeColor::Success)
                } else {
                    ("Inactive", BadgeColor::Subtle)
                };
                view! { <Badge appearance=BadgeAppearance::Tint color=color>{label}</Badge> }.into_any()
            }),
    ];

    let can_update = move || permissions.can(MENU).update;

    view! {
        <div class="page">
            <DataTable
                title="Roles"
                data=rows
                columns=columns
                search_by="name"
                loading=loading
                is_view=Signal::derive(move || permissions.can(MENU).read)
                is_edit=Signal::derive(can_update)
                is_delete=Signal::derive(move || permissions.can(MENU).delete)
                on_view=open_detail
                on_edit=open_detail
                on_delete=on_delete
            />
            <Show when=move || detail.is_open()>
                <RecordDetail
                    title="Role"
                    fields=Signal::derive(move || {
                        detail.record.with(|r| {
                            r.as_ref()
                                .map(|role| {
                                    let mut fields = row_fields(role, DETAIL_FIELDS);
                                    fields.extend(menu_summary(role));
                                    fields
                                })
                                .unwrap_or_default()
                        })
                    })
                    loading=detail.loading
                    on_close=Callback::new(move |_| detail.close())
                    actions=move || {
                        view! {
                            <Show when=can_update>
                                <button
                                    class="button button--primary"
                                    disabled=move || saving.get() || detail.loading.get()
                                    on:click=toggle_active
                                >
                                    {move || {
                                        let active = detail.record.with(|r| r.as_ref().is_some_and(|r| r.is_active));
                                        if active { "Deactivate" } else { "Activate" }
                                    }}
                                </button>
                            </Show>
                        }
                    }
                />
            </Show>
        </div>
    }
}
