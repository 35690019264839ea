// src/presentation/http/controllers/stores.rs
use crate::application::{
    commands::stores::{
        AddReviewCommand, CreateStoreCommand, LocationInput, ToggleHeartCommand,
        UpdateStoreCommand,
    },
    dto::{HeartStateDto, NearbyStoreDto, ReviewDto, StoreDto, TagCountDto, TopStoreDto},
    queries::stores::{
        GetStoreByIdQuery, GetStoreBySlugQuery, ListStoresQuery, SearchStoresQuery,
        StoresNearQuery,
    },
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{ApiJson, ApiPath, ApiQuery, Authenticated};
use crate::presentation::http::openapi::{HeartedStoresResponse, StoreListResponse};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StoreListParams {
    /// Join each store's reviews into the response.
    #[serde(default)]
    pub include_reviews: bool,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IncludeReviewsParams {
    #[serde(default)]
    pub include_reviews: bool,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearParams {
    pub lng: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LocationRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// `[longitude, latitude]`
    pub coordinates: Vec<f64>,
    #[serde(default)]
    pub address: String,
}

impl From<LocationRequest> for LocationInput {
    fn from(value: LocationRequest) -> Self {
        Self {
            kind: value.kind,
            coordinates: value.coordinates,
            address: value.address,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStoreRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: LocationRequest,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStoreRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub location: Option<LocationRequest>,
    pub photo: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewRequest {
    #[serde(default)]
    pub text: String,
    pub rating: i64,
}

#[utoipa::path(
    get,
    path = "/api/v1/stores",
    params(StoreListParams),
    responses(
        (status = 200, description = "Newest stores first, one page at a time.", body = StoreListResponse),
        (status = 500, description = "Unexpected server error.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Stores"
)]
pub async fn list_stores(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<StoreListParams>,
) -> HttpResult<Json<StoreListResponse>> {
    let query = ListStoresQuery {
        include_reviews: params.include_reviews,
        tag: params.tag,
        page: params.page.unwrap_or(1),
        per_page: params.per_page.unwrap_or(0),
    };

    state
        .services
        .store_queries
        .find_stores(query)
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/stores",
    request_body = CreateStoreRequest,
    responses(
        (status = 201, description = "Store created with a unique slug.", body = StoreDto),
        (status = 400, description = "Validation failed.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Missing or invalid x-user-id header.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug taken by a concurrent write.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Stores"
)]
pub async fn create_store(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ApiJson(payload): ApiJson<CreateStoreRequest>,
) -> HttpResult<(StatusCode, Json<StoreDto>)> {
    let command = CreateStoreCommand {
        name: payload.name,
        description: payload.description,
        tags: payload.tags,
        location: payload.location.into(),
        photo: payload.photo,
    };

    state
        .services
        .store_commands
        .create_store(&actor, command)
        .await
        .into_http()
        .map(|store| (StatusCode::CREATED, Json(store)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stores/by-slug/{slug}",
    params(
        ("slug" = String, Path, description = "Store slug"),
        IncludeReviewsParams
    ),
    responses(
        (status = 200, description = "Store found.", body = StoreDto),
        (status = 404, description = "No store with that slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Stores"
)]
pub async fn get_store_by_slug(
    Extension(state): Extension<HttpState>,
    ApiPath(slug): ApiPath<String>,
    ApiQuery(params): ApiQuery<IncludeReviewsParams>,
) -> HttpResult<Json<StoreDto>> {
    state
        .services
        .store_queries
        .get_store_by_slug(GetStoreBySlugQuery {
            slug,
            include_reviews: params.include_reviews,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/stores/{id}",
    params(
        ("id" = i64, Path, description = "Store id"),
        IncludeReviewsParams
    ),
    responses(
        (status = 200, description = "Store found.", body = StoreDto),
        (status = 404, description = "No store with that id.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Stores"
)]
pub async fn get_store(
    Extension(state): Extension<HttpState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<IncludeReviewsParams>,
) -> HttpResult<Json<StoreDto>> {
    state
        .services
        .store_queries
        .get_store_by_id(GetStoreByIdQuery {
            id,
            include_reviews: params.include_reviews,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/stores/{id}",
    params(("id" = i64, Path, description = "Store id")),
    request_body = UpdateStoreRequest,
    responses(
        (status = 200, description = "Store updated.", body = StoreDto),
        (status = 400, description = "Validation failed.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Missing or invalid x-user-id header.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Only the author may edit a store.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No store with that id.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Stores"
)]
pub async fn update_store(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateStoreRequest>,
) -> HttpResult<Json<StoreDto>> {
    let command = UpdateStoreCommand {
        id,
        name: payload.name,
        description: payload.description,
        tags: payload.tags,
        location: payload.location.map(Into::into),
        photo: payload.photo,
    };

    state
        .services
        .store_commands
        .update_store(&actor, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/stores/{id}/reviews",
    params(("id" = i64, Path, description = "Store id")),
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review added.", body = ReviewDto),
        (status = 400, description = "Validation failed.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Missing or invalid x-user-id header.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No store with that id.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Reviews"
)]
pub async fn add_review(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<ReviewRequest>,
) -> HttpResult<(StatusCode, Json<ReviewDto>)> {
    let command = AddReviewCommand {
        store_id: id,
        text: payload.text,
        rating: payload.rating,
    };

    state
        .services
        .store_commands
        .add_review(&actor, command)
        .await
        .into_http()
        .map(|review| (StatusCode::CREATED, Json(review)))
}

#[utoipa::path(
    post,
    path = "/api/v1/stores/{id}/heart",
    params(("id" = i64, Path, description = "Store id")),
    responses(
        (status = 200, description = "Heart toggled.", body = HeartStateDto),
        (status = 401, description = "Missing or invalid x-user-id header.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No store with that id.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Hearts"
)]
pub async fn toggle_heart(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    ApiPath(id): ApiPath<i64>,
) -> HttpResult<Json<HeartStateDto>> {
    state
        .services
        .store_commands
        .toggle_heart(&actor, ToggleHeartCommand { store_id: id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/hearts",
    responses(
        (status = 200, description = "Ids of the stores the caller has hearted.", body = HeartedStoresResponse),
        (status = 401, description = "Missing or invalid x-user-id header.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Hearts"
)]
pub async fn list_hearts(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
) -> HttpResult<Json<HeartedStoresResponse>> {
    state
        .services
        .store_queries
        .hearted_stores(&actor)
        .await
        .into_http()
        .map(|hearts| Json(HeartedStoresResponse { hearts }))
}

#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses(
        (status = 200, description = "Tag usage, most used first.", body = [TagCountDto])
    ),
    tag = "Stores"
)]
pub async fn list_tags(Extension(state): Extension<HttpState>) -> HttpResult<Json<Vec<TagCountDto>>> {
    state
        .services
        .store_queries
        .get_tags_list()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/top",
    responses(
        (status = 200, description = "Up to ten stores with at least two reviews, best rated first.", body = [TopStoreDto])
    ),
    tag = "Stores"
)]
pub async fn top_stores(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<TopStoreDto>>> {
    state
        .services
        .store_queries
        .get_top_stores()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Stores matching the text query.", body = [StoreDto])
    ),
    tag = "Stores"
)]
pub async fn search_stores(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> HttpResult<Json<Vec<StoreDto>>> {
    state
        .services
        .store_queries
        .search_stores(SearchStoresQuery { q: params.q })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/stores/near",
    params(NearParams),
    responses(
        (status = 200, description = "Stores near a point, closest first.", body = [NearbyStoreDto]),
        (status = 400, description = "Coordinates out of range.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Stores"
)]
pub async fn stores_near(
    Extension(state): Extension<HttpState>,
    ApiQuery(params): ApiQuery<NearParams>,
) -> HttpResult<Json<Vec<NearbyStoreDto>>> {
    state
        .services
        .store_queries
        .stores_near(StoresNearQuery {
            lng: params.lng,
            lat: params.lat,
        })
        .await
        .into_http()
        .map(Json)
}
