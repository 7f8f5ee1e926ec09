//! Значения сессии, которые вход сохраняет в `localStorage`

use web_sys::window;

use crate::config::{STORAGE_AUTH_TOKEN, STORAGE_IS_ADMIN, STORAGE_USER_ACCESS};

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn get_item(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

/// Bearer-токен для авторизованных запросов
pub fn get_auth_token() -> Option<String> {
    get_item(STORAGE_AUTH_TOKEN).filter(|token| !token.is_empty())
}

/// Исходный JSON `userAccess`
pub fn get_user_access() -> Option<String> {
    get_item(STORAGE_USER_ACCESS)
}

pub fn get_is_admin() -> bool {
    parse_is_admin(get_item(STORAGE_IS_ADMIN).as_deref())
}

/// Признаком администратора считается только `"true"` после обрезки
/// пробелов по краям. Регистр учитывается: `"TRUE"` не подходит.
pub fn parse_is_admin(raw: Option<&str>) -> bool {
    raw.map(str::trim) == Some("true")
}

/// Очистить все значения сессии
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(STORAGE_AUTH_TOKEN);
        let _ = storage.remove_item(STORAGE_USER_ACCESS);
        let _ = storage.remove_item(STORAGE_IS_ADMIN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_admin() {
        assert!(parse_is_admin(Some("true")));
        assert!(parse_is_admin(Some(" true ")));
        assert!(!parse_is_admin(Some("false")));
        assert!(!parse_is_admin(Some("TRUE")));
        assert!(!parse_is_admin(Some("1")));
        assert!(!parse_is_admin(None));
    }
}
