use serde::{Deserialize, Serialize};

use crate::system::access::MenuAccess;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub menus: Vec<MenuAccess>,
}

/// Тело `PUT /api/roles/:id` при включении и выключении роли
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleStatus {
    pub is_active: bool,
}
