// src/presentation/http/openapi.rs
use crate::application::dto::{Page, StoreDto};
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::BufWriter, path::{Path, PathBuf}};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoreListResponse {
    pub items: Vec<StoreDto>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub pages: u64,
}

impl From<Page<StoreDto>> for StoreListResponse {
    fn from(page: Page<StoreDto>) -> Self {
        Self {
            items: page.items,
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            pages: page.pages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HeartedStoresResponse {
    pub hearts: Vec<i64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::stores::list_stores,
        crate::presentation::http::controllers::stores::create_store,
        crate::presentation::http::controllers::stores::get_store_by_slug,
        crate::presentation::http::controllers::stores::get_store,
        crate::presentation::http::controllers::stores::update_store,
        crate::presentation::http::controllers::stores::add_review,
        crate::presentation::http::controllers::stores::toggle_heart,
        crate::presentation::http::controllers::stores::list_hearts,
        crate::presentation::http::controllers::stores::list_tags,
        crate::presentation::http::controllers::stores::top_stores,
        crate::presentation::http::controllers::stores::search_stores,
        crate::presentation::http::controllers::stores::stores_near,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            StoreListResponse,
            HeartedStoresResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::stores::CreateStoreRequest,
            crate::presentation::http::controllers::stores::UpdateStoreRequest,
            crate::presentation::http::controllers::stores::LocationRequest,
            crate::presentation::http::controllers::stores::ReviewRequest,
            crate::application::dto::StoreDto,
            crate::application::dto::LocationDto,
            crate::application::dto::ReviewDto,
            crate::application::dto::TagCountDto,
            crate::application::dto::TopStoreDto,
            crate::application::dto::NearbyStoreDto,
            crate::application::dto::HeartStateDto
        )
    ),
    tags(
        (name = "Stores", description = "Store listing, editing and rankings"),
        (name = "Reviews", description = "Store reviews"),
        (name = "Hearts", description = "Per-user favourite stores"),
        (name = "System", description = "System level endpoints")
    ),
    info(
        title = "Store Locator API",
        description = "Stores, tags, reviews and rankings",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

pub fn docs_router() -> Router {
    let swagger = SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi());
    Router::new()
        .merge(swagger)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Where the snapshot goes: `OPENAPI_SNAPSHOT_PATH`, or `docs/openapi.json`.
pub fn snapshot_path() -> PathBuf {
    env::var("OPENAPI_SNAPSHOT_PATH")
        .map_or_else(|_| PathBuf::from("docs/openapi.json"), PathBuf::from)
}

pub fn write_openapi_snapshot(path: &Path) -> std::io::Result<()> {
    let doc = ApiDoc::openapi();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}
