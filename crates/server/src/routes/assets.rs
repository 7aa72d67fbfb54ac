use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::Asset;
use service::asset::DeleteConfirmation;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

// Bodies are taken as raw bytes so that parsing, and the distinction between
// malformed and invalid input, stays with the asset manager.

#[utoipa::path(
    post, path = "/assets", tag = "assets",
    request_body(content = crate::openapi::AssetInputDoc, content_type = "application/json"),
    responses(
        (status = 201, description = "Created", body = crate::openapi::AssetDoc),
        (status = 400, description = "Malformed body or validation errors")
    )
)]
pub async fn create_asset(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Asset>), JsonApiError> {
    let asset = state.assets.create(&body[..]).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

#[utoipa::path(
    get, path = "/assets", tag = "assets",
    responses((status = 200, description = "All assets, unordered", body = [crate::openapi::AssetDoc]))
)]
pub async fn list_assets(State(state): State<ServerState>) -> Result<Json<Vec<Asset>>, JsonApiError> {
    Ok(Json(state.assets.list().await?))
}

#[utoipa::path(
    get, path = "/assets/{id}", tag = "assets",
    params(("id" = String, Path, description = "Asset id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AssetDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_asset(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Asset>, JsonApiError> {
    Ok(Json(state.assets.get(&id).await?))
}

#[utoipa::path(
    put, path = "/assets/{id}", tag = "assets",
    params(("id" = String, Path, description = "Asset id")),
    request_body(content = crate::openapi::AssetInputDoc, content_type = "application/json"),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AssetDoc),
        (status = 400, description = "Malformed body or validation errors"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_asset(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Asset>, JsonApiError> {
    Ok(Json(state.assets.update(&id, &body[..]).await?))
}

#[utoipa::path(
    delete, path = "/assets/{id}", tag = "assets",
    params(("id" = String, Path, description = "Asset id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DeleteConfirmationDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_asset(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteConfirmation>, JsonApiError> {
    Ok(Json(state.assets.delete(&id).await?))
}
