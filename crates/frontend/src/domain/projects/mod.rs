pub mod api;
pub mod ui;

use contracts::domain::project::Project;

use crate::shared::list_utils::{CellValue, TableRow};

impl TableRow for Project {
    fn row_id(&self) -> String {
        self.id.clone()
    }

    fn field(&self, path: &str) -> Option<CellValue> {
        let value = match path {
            "id" => CellValue::from(&self.id),
            "name" => CellValue::from(&self.name),
            "location" => CellValue::from(self.location.as_deref()),
            "totalUnits" => CellValue::from(self.total_units),
            "launchDate" => CellValue::from(self.launch_date.map(|d| d.to_string())),
            "status" => CellValue::from(self.status.as_deref()),
            _ => return None,
        };
        Some(value)
    }
}
