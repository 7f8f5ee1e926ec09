use contracts::shared::api::ListQuery;
use serde_json::Value;

use crate::shared::api_utils::{self, ApiError};
use crate::shared::list_utils::JsonRow;

const PATH: &str = "/api/emis";

pub async fn fetch_emis() -> Result<Vec<JsonRow>, ApiError> {
    let page = api_utils::fetch_list::<Value>(PATH, &ListQuery::all()).await?;
    Ok(JsonRow::from_values(page.rows))
}

pub async fn fetch_emi(id: &str) -> Result<JsonRow, ApiError> {
    api_utils::fetch_one::<Value>(PATH, id).await.map(JsonRow::new)
}
