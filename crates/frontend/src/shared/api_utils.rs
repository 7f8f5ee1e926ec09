//! Утилиты для обращения к API
//!
//! Все коллекции устроены одинаково: `GET path` (список), `GET path/:id`,
//! `PUT path/:id`, `DELETE path/:id`. Ответы обёрнуты в [`ApiEnvelope`].

use contracts::shared::api::{ApiEnvelope, ApiMessage, ListQuery, Pagination};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::shared::storage;

static API_CONFIG: OnceLock<ApiConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("not signed in")]
    Unauthenticated,
}

/// Строки одного ответа со списком
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    pub pagination: Option<Pagination>,
}

/// Задаёт конфигурацию API. Действует только первый вызов.
pub fn init(config: ApiConfig) {
    if API_CONFIG.set(config).is_err() {
        log::warn!("api config already initialised");
    }
}

/// Получить базовый URL для API запросов
///
/// Берёт `base_url` из конфигурации, если он задан. Иначе строит его из
/// текущего адреса окна и порта из конфигурации.
pub fn api_base() -> String {
    let config = API_CONFIG.get_or_init(ApiConfig::default);
    if let Some(base) = &config.base_url {
        return base.trim_end_matches('/').to_string();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, config.port)
}

/// Построить полный URL API из пути
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn item_url(path: &str, id: &str) -> String {
    format!("{}/{}", api_url(path), urlencoding::encode(id))
}

fn query_suffix(query: &ListQuery) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(if qs.is_empty() {
        String::new()
    } else {
        format!("?{}", qs)
    })
}

fn with_auth(builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
    let token = storage::get_auth_token().ok_or(ApiError::Unauthenticated)?;
    Ok(builder.header("Authorization", &format!("Bearer {}", token)))
}

async fn send(request: Request) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        let status = response.status();
        let message = response
            .json::<ApiMessage>()
            .await
            .ok()
            .and_then(|body| body.message);
        log::error!("{} {} -> {}", status_class(status), response.url(), status);
        return Err(ApiError::Status { status, message });
    }
    Ok(response)
}

fn status_class(status: u16) -> &'static str {
    if status >= 500 {
        "server error"
    } else {
        "client error"
    }
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiEnvelope<T>, ApiError> {
    response
        .json::<ApiEnvelope<T>>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// `GET path?page&limit&search`
pub async fn fetch_list<T: DeserializeOwned>(
    path: &str,
    query: &ListQuery,
) -> Result<ListPage<T>, ApiError> {
    let url = format!("{}{}", api_url(path), query_suffix(query)?);
    let request = with_auth(Request::get(&url))?
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let envelope = read_envelope::<Vec<T>>(send(request).await?).await?;
    Ok(ListPage {
        rows: envelope.data.data,
        pagination: envelope.data.pagination,
    })
}

/// `GET path/:id`
pub async fn fetch_one<T: DeserializeOwned>(path: &str, id: &str) -> Result<T, ApiError> {
    let request = with_auth(Request::get(&item_url(path, id)))?
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;

    Ok(read_envelope::<T>(send(request).await?).await?.data.data)
}

/// `PUT path/:id`
pub async fn update<B, T>(path: &str, id: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = with_auth(Request::put(&item_url(path, id)))?
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    Ok(read_envelope::<T>(send(request).await?).await?.data.data)
}

/// `DELETE path/:id`. Тело ответа не разбирается.
pub async fn delete(path: &str, id: &str) -> Result<(), ApiError> {
    let request = with_auth(Request::delete(&item_url(path, id)))?
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;

    send(request).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_suffix() {
        assert_eq!(query_suffix(&ListQuery::all()).unwrap(), "");
        assert_eq!(
            query_suffix(&ListQuery::from_view(1, 10, " park ")).unwrap(),
            "?page=2&limit=10&search=park"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            status: 404,
            message: Some("Customer not found".into()),
        };
        assert_eq!(err.to_string(), "server returned 404: Customer not found");
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "server returned 500: no message");
    }
}
