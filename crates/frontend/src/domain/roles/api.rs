use contracts::domain::role::{Role, UpdateRoleStatus};
use contracts::shared::api::ListQuery;

use crate::shared::api_utils::{self, ApiError};

const PATH: &str = "/api/roles";

pub async fn fetch_roles() -> Result<Vec<Role>, ApiError> {
    Ok(api_utils::fetch_list(PATH, &ListQuery::all()).await?.rows)
}

pub async fn fetch_role(id: &str) -> Result<Role, ApiError> {
    api_utils::fetch_one(PATH, id).await
}

pub async fn set_role_active(id: &str, is_active: bool) -> Result<Role, ApiError> {
    api_utils::update(PATH, id, &UpdateRoleStatus { is_active }).await
}

pub async fn delete_role(id: &str) -> Result<(), ApiError> {
    api_utils::delete(PATH, id).await
}
