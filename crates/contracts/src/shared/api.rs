//! Обёртка ответа и запрос списка, общие для всех REST-коллекций
//!
//! В API страницы нумеруются с 1. Фронтенд хранит страницу с 0 и
//! переводит её только через [`ListQuery::from_view`] и [`Pagination::page_index`].

use serde::{Deserialize, Serialize};

/// `{ status, data: { data, pagination? }, message? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: u16,
    pub data: ApiData<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiData<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Тело ответа эндпоинтов, которые упали до формирования `data`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// С 1
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
}

impl Pagination {
    /// Страница с 0 для локального состояния таблицы
    pub fn page_index(&self) -> usize {
        self.page.saturating_sub(1) as usize
    }
}

/// Строка запроса для `GET` списков
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListQuery {
    /// Запрос всей коллекции
    pub fn all() -> Self {
        Self::default()
    }

    /// Строит запрос из состояния таблицы (страница с 0)
    pub fn from_view(page_index: usize, limit: usize, search: &str) -> Self {
        let search = search.trim();
        Self {
            page: Some(page_index as u32 + 1),
            limit: Some(limit as u32),
            search: if search.is_empty() {
                None
            } else {
                Some(search.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_envelope_with_pagination() {
        let raw = r#"{
            "status": 200,
            "data": {
                "data": [1, 2, 3],
                "pagination": {
                    "page": 2, "limit": 3, "total": 9, "totalPages": 3,
                    "hasNextPage": true, "hasPreviousPage": true
                }
            }
        }"#;
        let env: ApiEnvelope<Vec<i32>> = serde_json::from_str(raw).unwrap();
        assert_eq!(env.status, 200);
        assert_eq!(env.data.data, vec![1, 2, 3]);
        let pagination = env.data.pagination.unwrap();
        assert_eq!(pagination.total_pages, 3);
        assert_eq!(pagination.page_index(), 1);
        assert!(env.message.is_none());
    }

    #[test]
    fn test_parse_single_envelope_without_pagination() {
        let raw = r#"{"status": 200, "data": {"data": "x"}, "message": "ok"}"#;
        let env: ApiEnvelope<String> = serde_json::from_str(raw).unwrap();
        assert_eq!(env.data.data, "x");
        assert!(env.data.pagination.is_none());
        assert_eq!(env.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_list_query_converts_to_one_indexed_page() {
        let query = ListQuery::from_view(0, 25, "  ");
        assert_eq!(query.page, Some(1));
        assert_eq!(query.limit, Some(25));
        assert_eq!(query.search, None);

        let query = ListQuery::from_view(3, 10, " acme ");
        assert_eq!(query.page, Some(4));
        assert_eq!(query.search.as_deref(), Some("acme"));
    }

    #[test]
    fn test_page_index_never_underflows() {
        let pagination = Pagination {
            page: 0,
            limit: 10,
            total: 0,
            total_pages: 0,
            has_next_page: false,
            has_previous_page: false,
        };
        assert_eq!(pagination.page_index(), 0);
    }
}
