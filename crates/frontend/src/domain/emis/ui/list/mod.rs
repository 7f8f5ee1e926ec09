use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Badge, BadgeAppearance, BadgeColor};

use crate::domain::emis::api::{fetch_emi, fetch_emis};
use crate::shared::components::data_table::{Column, DataTable};
use crate::shared::components::record_detail::{json_fields, DetailState, RecordDetail};
use crate::shared::components::table::number_format::format_money;
use crate::shared::components::table::Align;
use crate::shared::date_utils::format_date;
use crate::shared::list_utils::{CellValue, JsonRow};
use crate::shared::toast::use_toast;
use crate::system::permissions::use_permissions;

const MENU: &str = "EMI";

fn money_cell(value: &CellValue) -> String {
    match value {
        CellValue::Int(n) => format_money(*n as f64),
        CellValue::Float(f) => format_money(*f),
        other => other.display(),
    }
}

fn paid_badge(value: &CellValue) -> AnyView {
    let (label, color) = match value {
        CellValue::Bool(true) => ("Paid", BadgeColor::Success),
        CellValue::Bool(false) => ("Due", BadgeColor::Warning),
        _ => ("Unknown", BadgeColor::Subtle),
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{label}</Badge> }.into_any()
}

#[component]
pub fn EmiList() -> impl IntoView {
    let permissions = use_permissions();
    let toast = use_toast();
    let rows = RwSignal::new(Vec::<JsonRow>::new());
    let loading = RwSignal::new(false);
    let detail = DetailState::<JsonRow>::new();

    loading.set(true);
    spawn_local(async move {
        match fetch_emis().await {
            Ok(list) => rows.set(list),
            Err(e) => {
                log::error!("failed to load EMIs: {}", e);
                toast.error(format!("Failed to load EMIs: {}", e));
            }
        }
        loading.set(false);
    });

    let columns = vec![
        Column::new("customer.name", "Customer"),
        Column::new("project.name", "Project"),
        Column::new("installmentNo", "No.").align(Align::Right),
        Column::new("amount", "Amount")
            .align(Align::Right)
            .render(|value, _| money_cell(value).into_any()),
        Column::new("dueDate", "Due date").render(|value, _| format_date(&value.display()).into_any()),
        Column::new("paid", "Status")
            .align(Align::Center)
            .render(|value, _| paid_badge(value)),
    ];

    view! {
        <div class="page">
            <DataTable
                title="EMIs"
                data=rows
                columns=columns
                search_by="customer.name"
                loading=loading
                is_view=Signal::derive(move || permissions.can(MENU).read)
                on_view=Callback::new(move |row: JsonRow| {
                    detail.open(row, |id| async move { fetch_emi(&id).await });
                })
            />
            <Show when=move || detail.is_open()>
                <RecordDetail
                    title="EMI"
                    fields=Signal::derive(move || {
                        detail.record.with(|r| r.as_ref().map(|row| json_fields(&row.value)).unwrap_or_default())
                    })
                    loading=detail.loading
                    on_close=Callback::new(move |_| detail.close())
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_cell_formats_numbers_only() {
        assert_eq!(money_cell(&CellValue::Int(125000)), "₹1,25,000.00");
        assert_eq!(money_cell(&CellValue::Float(2500.5)), "₹2,500.50");
        assert_eq!(money_cell(&CellValue::Text("n/a".into())), "n/a");
        assert_eq!(money_cell(&CellValue::Null), "");
    }
}
