pub mod api;
pub mod ui;

use contracts::domain::role::Role;

use crate::shared::list_utils::{CellValue, TableRow};
use crate::system::permissions::Capabilities;

impl TableRow for Role {
    fn row_id(&self) -> String {
        self.id.clone()
    }

    fn field(&self, path: &str) -> Option<CellValue> {
        let value = match path {
            "id" => CellValue::from(&self.id),
            "name" => CellValue::from(&self.name),
            "description" => CellValue::from(self.description.as_deref()),
            "isActive" => CellValue::from(self.is_active),
            "menuCount" => CellValue::Int(self.menus.len() as i64),
            _ => return None,
        };
        Some(value)
    }
}

/// Одна строка `(меню, выданные права)` на каждое именованное меню роли
pub fn menu_summary(role: &Role) -> Vec<(String, String)> {
    role.menus
        .iter()
        .filter_map(|menu| {
            let name = menu.menu_name()?;
            let granted = Capabilities::from(menu).granted();
            let text = if granted.is_empty() {
                "no access".to_string()
            } else {
                granted.join(", ")
            };
            Some((name.to_string(), text))
        })
        .collect()
}
