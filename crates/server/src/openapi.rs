use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetInputDoc {
    pub name: String,
    pub serial_no: String,
    /// `YYYY-MM-DD` or RFC 3339 date-time
    pub assign_date: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetDoc {
    pub asset_id: String,
    pub name: String,
    pub serial_no: String,
    pub assign_date: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConfirmationDoc {
    pub asset_id: String,
    pub process: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::assets::create_asset,
        crate::routes::assets::list_assets,
        crate::routes::assets::get_asset,
        crate::routes::assets::update_asset,
        crate::routes::assets::delete_asset,
    ),
    components(
        schemas(
            HealthResponse,
            AssetInputDoc,
            AssetDoc,
            DeleteConfirmationDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "assets")
    )
)]
pub struct ApiDoc;
