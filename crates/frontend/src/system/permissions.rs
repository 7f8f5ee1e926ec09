//! Права на меню из сохранённого `userAccess`
//!
//! Карта строится один раз при создании контекста сессии и меняется только
//! при явном [`PermissionsContext::reload`]. Изменение прав на сервере
//! подхватывается после reload или повторного входа.

use contracts::system::access::{MenuAccess, UserAccess};
use leptos::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

use crate::shared::storage;

#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("userAccess is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("userAccess has an unexpected shape: {0}")]
    Shape(&'static str),
}

/// Набор прав одного меню
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub read: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities {
        read: false,
        create: false,
        update: false,
        delete: false,
    };

    pub const ALL: Capabilities = Capabilities {
        read: true,
        create: true,
        update: true,
        delete: true,
    };

    /// Имена выданных прав в порядке `read, create, update, delete`
    pub fn granted(&self) -> Vec<&'static str> {
        [
            (self.read, "read"),
            (self.create, "create"),
            (self.update, "update"),
            (self.delete, "delete"),
        ]
        .into_iter()
        .filter_map(|(granted, name)| granted.then_some(name))
        .collect()
    }
}

impl From<&MenuAccess> for Capabilities {
    fn from(menu: &MenuAccess) -> Self {
        Capabilities {
            read: coerce_flag(&menu.read),
            create: coerce_flag(&menu.create),
            update: coerce_flag(&menu.update),
            delete: coerce_flag(&menu.delete),
        }
    }
}

pub type PermissionMap = HashMap<String, Capabilities>;

/// Отсутствие значения или любое не-булево значение означает `false`.
pub fn coerce_flag(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

/// Разбирает JSON `userAccess` в карту по имени меню
///
/// Записи без имени меню пропускаются. При повторе имени побеждает
/// последняя запись.
pub fn resolve_permissions(raw: &str) -> Result<PermissionMap, PermissionError> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(PermissionError::Shape("expected an object"));
    }
    let access: UserAccess = serde_json::from_value(value)?;

    let map = access
        .menus
        .iter()
        .filter_map(|menu| {
            let name = menu.menu_name()?;
            Some((name.to_string(), Capabilities::from(menu)))
        })
        .collect();
    Ok(map)
}

/// Закрытый по умолчанию вариант: нет данных или они битые, карта пуста.
pub fn resolve_or_deny(raw: Option<&str>) -> PermissionMap {
    let Some(raw) = raw else {
        log::warn!("userAccess not found in storage, all menus denied");
        return PermissionMap::new();
    };
    match resolve_permissions(raw) {
        Ok(map) => map,
        Err(e) => {
            log::error!("{}", e);
            PermissionMap::new()
        }
    }
}

/// Права на всю сессию, предоставляются один раз из `App`
#[derive(Clone, Copy)]
pub struct PermissionsContext {
    menus: RwSignal<PermissionMap>,
    is_admin: RwSignal<bool>,
}

impl PermissionsContext {
    /// Читает хранилище один раз. Последующие записи в хранилище не видны
    /// до [`reload`](Self::reload).
    pub fn from_storage() -> Self {
        let this = Self {
            menus: RwSignal::new(PermissionMap::new()),
            is_admin: RwSignal::new(false),
        };
        this.reload();
        this
    }

    pub fn reload(&self) {
        let menus = resolve_or_deny(storage::get_user_access().as_deref());
        let is_admin = storage::get_is_admin();
        log::debug!("permissions loaded: {} menus, admin={}", menus.len(), is_admin);
        self.menus.set(menus);
        self.is_admin.set(is_admin);
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin.get()
    }

    /// У администратора есть все права, у неизвестного меню нет никаких.
    pub fn can(&self, menu: &str) -> Capabilities {
        if self.is_admin.get() {
            return Capabilities::ALL;
        }
        self.menus
            .with(|menus| menus.get(menu).copied())
            .unwrap_or(Capabilities::NONE)
    }
}

pub fn use_permissions() -> PermissionsContext {
    use_context::<PermissionsContext>().expect("PermissionsContext not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_capabilities_by_menu_name() {
        let raw = r#"{"menus":[{"menuId":{"name":"Role"},"read":true,"create":false,"update":true,"delete":false}]}"#;
        let map = resolve_permissions(raw).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map["Role"],
            Capabilities {
                read: true,
                create: false,
                update: true,
                delete: false,
            }
        );
    }

    #[test]
    fn test_non_boolean_and_missing_flags_are_denied() {
        let raw = r#"{"role":"agent","menus":[{"menuId":{"name":"EMI"},"read":"true","create":1,"update":null}]}"#;
        let map = resolve_permissions(raw).unwrap();
        assert_eq!(map["EMI"], Capabilities::NONE);
    }

    #[test]
    fn test_entries_without_name_are_skipped() {
        let raw = r#"{"menus":[{"menuId":{},"read":true},{"read":true},{"menuId":{"name":"Customer"},"read":true}]}"#;
        let map = resolve_permissions(raw).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map["Customer"].read);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let raw = r#"{"menus":[{"menuId":{"name":"Project"},"read":true},{"menuId":{"name":"Project"},"read":false}]}"#;
        let map = resolve_permissions(raw).unwrap();
        assert!(!map["Project"].read);
    }

    #[test]
    fn test_malformed_json_fails_closed() {
        assert!(matches!(
            resolve_permissions("{not json"),
            Err(PermissionError::Json(_))
        ));
        assert!(resolve_or_deny(Some("{not json")).is_empty());
        assert!(resolve_or_deny(None).is_empty());
    }

    #[test]
    fn test_wrong_shape_fails_closed() {
        assert!(matches!(
            resolve_permissions("[1,2]"),
            Err(PermissionError::Shape(_))
        ));
        assert!(resolve_or_deny(Some(r#"{"menus":"all"}"#)).is_empty());
        assert!(resolve_or_deny(Some(r#"{"menus":[{"menuId":"Role"}]}"#)).is_empty());
    }

    #[test]
    fn test_coerce_flag() {
        assert!(coerce_flag(&Value::Bool(true)));
        assert!(!coerce_flag(&Value::Bool(false)));
        assert!(!coerce_flag(&Value::Null));
        assert!(!coerce_flag(&serde_json::json!("true")));
    }

    #[test]
    fn test_granted_lists_capabilities_in_order() {
        let caps = Capabilities {
            read: true,
            create: false,
            update: true,
            delete: false,
        };
        assert_eq!(caps.granted(), vec!["read", "update"]);
        assert!(Capabilities::NONE.granted().is_empty());
        assert_eq!(Capabilities::ALL.granted().len(), 4);
    }
}
