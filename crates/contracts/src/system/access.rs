//! Права доступа, сохранённые под ключом `userAccess`
//!
//! Флаги прав хранятся как сырые JSON-значения. В булевы их переводит
//! резолвер прав на фронтенде, и всё, кроме `true`, считается запретом.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserAccess {
    #[serde(default)]
    pub role: Value,
    #[serde(default)]
    pub menus: Vec<MenuAccess>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuAccess {
    #[serde(default)]
    pub menu_id: Option<MenuRef>,
    #[serde(default)]
    pub read: Value,
    #[serde(default)]
    pub create: Value,
    #[serde(default)]
    pub update: Value,
    #[serde(default)]
    pub delete: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuRef {
    #[serde(default)]
    pub name: Option<String>,
}

impl MenuAccess {
    pub fn menu_name(&self) -> Option<&str> {
        self.menu_id.as_ref()?.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_null() {
        let raw = r#"{"menus":[{"menuId":{"name":"Role"},"read":true}]}"#;
        let access: UserAccess = serde_json::from_str(raw).unwrap();
        assert_eq!(access.menus.len(), 1);
        let menu = &access.menus[0];
        assert_eq!(menu.menu_name(), Some("Role"));
        assert_eq!(menu.read, Value::Bool(true));
        assert_eq!(menu.delete, Value::Null);
        assert_eq!(access.role, Value::Null);
    }

    #[test]
    fn test_menu_without_id_has_no_name() {
        let raw = r#"{"menus":[{"read":true}]}"#;
        let access: UserAccess = serde_json::from_str(raw).unwrap();
        assert_eq!(access.menus[0].menu_name(), None);
    }
}
