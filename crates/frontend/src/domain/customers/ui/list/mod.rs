use contracts::domain::customer::Customer;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::customers::api::{delete_customer, fetch_customer, fetch_customers};
use crate::shared::components::confirm_dialog::ConfirmTicket;
use crate::shared::components::data_table::{Column, DataTable};
use crate::shared::components::record_detail::{row_fields, DetailState, RecordDetail};
use crate::shared::date_utils::format_date;
use crate::shared::toast::use_toast;
use crate::system::permissions::use_permissions;

const MENU: &str = "Customer";

const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("Name", "name"),
    ("Email", "email"),
    ("Phone", "phone"),
    ("City", "city"),
    ("Created", "createdAt"),
];

#[component]
pub fn CustomerList() -> impl IntoView {
    let permissions = use_permissions();
    let toast = use_toast();
    let rows = RwSignal::new(Vec::<Customer>::new());
    let loading = RwSignal::new(false);
    let detail = DetailState::<Customer>::new();

    // При ошибке запроса остаются прежние строки
    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match fetch_customers().await {
                Ok(list) => rows.set(list),
                Err(e) => {
                    log::error!("failed to load customers: {}", e);
                    toast.error(format!("Failed to load customers: {}", e));
                }
            }
            loading.set(false);
        });
    };
    load();

    let open_detail = Callback::new(move |row: Customer| {
        detail.open(row, |id| async move { fetch_customer(&id).await });
    });

    let on_delete = Callback::new(move |(row, confirm): (Customer, ConfirmTicket)| {
        spawn_local(async move {
            match delete_customer(&row.id).await {
                Ok(()) => {
                    toast.success(format!("Customer \"{}\" deleted", row.name));
                    load();
                }
                Err(e) => {
                    log::error!("failed to delete customer {}: {}", row.id, e);
                    toast.error(format!("Failed to delete customer: {}", e));
                }
            }
            confirm.close();
        });
    });

    let columns = vec![
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("phone", "Phone").unsortable(),
        Column::new("city", "City"),
        Column::new("createdAt", "Created").render(|value, _| format_date(&value.display()).into_any()),
    ];

    view! {
        <div class="page">
            <DataTable
                title="Customers"
                data=rows
                columns=columns
                search_by="name"
                loading=loading
                is_view=Signal::derive(move || permissions.can(MENU).read)
                is_edit=Signal::derive(move || permissions.can(MENU).update)
                is_delete=Signal::derive(move || permissions.can(MENU).delete)
                on_view=open_detail
                on_edit=open_detail
                on_delete=on_delete
            />
            <Show when=move || detail.is_open()>
                <RecordDetail
                    title="Customer"
                    fields=Signal::derive(move || {
                        detail.record.with(|r| r.as_ref().map(|c| row_fields(c, DETAIL_FIELDS)).unwrap_or_default())
                    })
                    loading=detail.loading
                    on_close=Callback::new(move |_| detail.close())
                />
            </Show>
        </div>
    }
}
