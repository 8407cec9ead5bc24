use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::{parse_id, AppJson};
use crate::features::denuncias::dtos::{
    CreateDenunciaDto, DenunciaResponseDto, UpdateStatusByBodyDto,
    UpdateStatusDto,
};
use crate::features::denuncias::models::DenunciaFilter;
use crate::features::denuncias::services::DenunciaService;
use crate::shared::types::{ApiResponse, Meta};

/// Submit a new report
#[utoipa::path(
    post,
    path = "/api/denuncia",
    request_body = CreateDenunciaDto,
    responses(
        (status = 201, description = "Report stored", body = ApiResponse<DenunciaResponseDto>),
        (status = 400, description = "Malformed JSON"),
        (status = 413, description = "Body larger than MAX_REQUEST_BODY_SIZE"),
        (status = 422, description = "Validation failed")
    ),
    tag = "denuncias"
)]
pub async fn create_denuncia(
    State(service): State<Arc<DenunciaService>>,
    AppJson(dto): AppJson<CreateDenunciaDto>,
) -> Result<(StatusCode, Json<ApiResponse<DenunciaResponseDto>>)> {
    let denuncia = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(denuncia.into()),
            Some("Report submitted".to_string()),
            None,
        )),
    ))
}

/// Filter pairs from an optional JSON object body; anything else contributes nothing
fn body_filter_pairs(body: &[u8]) -> Vec<(String, String)> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Vec::new();
    }

    match serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(body) {
        Ok(object) => object
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) => Some((key, s)),
                serde_json::Value::Number(n) => Some((key, n.to_string())),
                serde_json::Value::Bool(b) => Some((key, b.to_string())),
                _ => None,
            })
            .collect(),
        Err(e) => {
            tracing::debug!("Ignoring non-object filter body: {}", e);
            Vec::new()
        }
    }
}

/// List reports, newest first
///
/// Filters on `tipo`, `descricao`, `endereco`, `latitude` and `longitude` come from
/// the query string and/or a JSON object body; the body wins when both set a field.
#[utoipa::path(
    get,
    path = "/api/denuncia",
    params(
        ("tipo" = Option<String>, Query, description = "Exact category"),
        ("descricao" = Option<String>, Query, description = "Case-insensitive substring of the description"),
        ("endereco" = Option<String>, Query, description = "Case-insensitive substring of the address"),
        ("latitude" = Option<String>, Query, description = "Exact latitude"),
        ("longitude" = Option<String>, Query, description = "Exact longitude")
    ),
    request_body(content = Option<Object>, description = "Optional JSON object with the same filters", content_type = "application/json"),
    responses(
        (status = 200, description = "Matching reports", body = ApiResponse<Vec<DenunciaResponseDto>>)
    ),
    tag = "denuncias"
)]
pub async fn list_denuncias(
    State(service): State<Arc<DenunciaService>>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Json<ApiResponse<Vec<DenunciaResponseDto>>>> {
    let pairs = query.into_iter().chain(body_filter_pairs(&body));
    let filter = DenunciaFilter::from_pairs(pairs);

    let denuncias: Vec<DenunciaResponseDto> = service
        .list(&filter)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let meta = Meta::from_len(denuncias.len());

    Ok(Json(ApiResponse::success(Some(denuncias), None, Some(meta))))
}

/// Get one report
#[utoipa::path(
    get,
    path = "/api/denuncia/{id}",
    params(("id" = String, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<DenunciaResponseDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Report not found")
    ),
    tag = "denuncias"
)]
pub async fn get_denuncia(
    State(service): State<Arc<DenunciaService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DenunciaResponseDto>>> {
    let denuncia = service.get_by_id(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::success(Some(denuncia.into()), None, None)))
}

/// Get a report with its current status and audit log
#[utoipa::path(
    get,
    path = "/api/denuncia/{id}/status",
    params(("id" = String, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report with its current status", body = ApiResponse<DenunciaResponseDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Report not found")
    ),
    tag = "denuncias"
)]
pub async fn get_denuncia_status(
    State(service): State<Arc<DenunciaService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DenunciaResponseDto>>> {
    let denuncia = service.get_by_id(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::success(Some(denuncia.into()), None, None)))
}

/// Change a report's status
#[utoipa::path(
    patch,
    path = "/api/denuncia/{id}/status",
    params(("id" = String, Path, description = "Report ID")),
    request_body = UpdateStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<DenunciaResponseDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Report not found"),
        (status = 422, description = "Unknown status")
    ),
    tag = "denuncias"
)]
pub async fn update_denuncia_status(
    State(service): State<Arc<DenunciaService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateStatusDto>,
) -> Result<Json<ApiResponse<DenunciaResponseDto>>> {
    let updated = service.update_status(parse_id(&id)?, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(updated.into()),
        Some("Status updated".to_string()),
        None,
    )))
}

/// Change a report's status, id carried in the body
#[utoipa::path(
    patch,
    path = "/api/denuncia/status",
    request_body = UpdateStatusByBodyDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<DenunciaResponseDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Report not found"),
        (status = 422, description = "Unknown status")
    ),
    tag = "denuncias"
)]
pub async fn update_denuncia_status_by_body(
    State(service): State<Arc<DenunciaService>>,
    AppJson(dto): AppJson<UpdateStatusByBodyDto>,
) -> Result<Json<ApiResponse<DenunciaResponseDto>>> {
    let id = parse_id(&dto.id)?;
    let updated = service.update_status(id, dto.update).await?;
    Ok(Json(ApiResponse::success(
        Some(updated.into()),
        Some("Status updated".to_string()),
        None,
    )))
}
