pub mod api;
pub mod ui;

use contracts::domain::customer::Customer;

use crate::shared::list_utils::{CellValue, TableRow};

impl TableRow for Customer {
    fn row_id(&self) -> String {
        self.id.clone()
    }

    fn field(&self, path: &str) -> Option<CellValue> {
        let value = match path {
            "id" => CellValue::from(&self.id),
            "name" => CellValue::from(&self.name),
            "email" => CellValue::from(self.email.as_deref()),
            "phone" => CellValue::from(self.phone.as_deref()),
            "city" => CellValue::from(self.city.as_deref()),
            "createdAt" => CellValue::from(self.created_at.as_deref()),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str, name: &str, city: Option<&str>) -> Customer {
        Customer {
            id: id.into(),
            name: name.into(),
            email: None,
            phone: None,
            city: city.map(Into::into),
            created_at: None,
        }
    }

    #[test]
    fn test_customer_fields() {
        let c = customer("c1", "Asha", Some("Pune"));
        assert_eq!(c.row_id(), "c1");
        assert_eq!(c.cell("name"), CellValue::Text("Asha".into()));
        assert_eq!(c.cell("city"), CellValue::Text("Pune".into()));
        assert_eq!(c.cell("email"), CellValue::Null);
        assert_eq!(c.field("unknown"), None);
    }
}
