use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BranchQueryParams {
    /// Required for super admins; ignored for everyone else.
    #[serde(default, deserialize_with = "autoshop_core::serde::deserialize_optional_uuid")]
    pub organization_id: Option<Uuid>,
}
