use contracts::domain::customer::Customer;
use contracts::shared::api::ListQuery;

use crate::shared::api_utils::{self, ApiError};

const PATH: &str = "/api/customers";

/// Весь список клиентов. Фильтр и пагинацию делает таблица.
pub async fn fetch_customers() -> Result<Vec<Customer>, ApiError> {
    Ok(api_utils::fetch_list(PATH, &ListQuery::all()).await?.rows)
}

pub async fn fetch_customer(id: &str) -> Result<Customer, ApiError> {
    api_utils::fetch_one(PATH, id).await
}

pub async fn delete_customer(id: &str) -> Result<(), ApiError> {
    api_utils::delete(PATH, id).await
}
