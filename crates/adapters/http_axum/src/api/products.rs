//! JSON handlers for products.

use std::collections::BTreeSet;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use catalog_app::ports::ProductRepository;
use catalog_domain::catalog_number::CatalogNumber;
use catalog_domain::error::ValidationError;
use catalog_domain::product::Product;
use catalog_domain::statistics::ProductsStatistics;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or replacing a product.
///
/// Everything but the catalog number defaults when omitted; a catalog number
/// in the path wins over one in the body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(default)]
    pub catalog_number: Option<i32>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
}

impl ProductRequest {
    fn into_product(self, from_path: Option<CatalogNumber>) -> Result<Product, ApiError> {
        let catalog_number = from_path
            .or(self.catalog_number.map(CatalogNumber::new))
            .unwrap_or_default();

        let mut builder = Product::builder()
            .catalog_number(catalog_number)
            .price(self.price)
            .quantity(self.quantity)
            .name(self.name);
        if let Some(category) = self.category {
            builder = builder.category(category);
        }
        if let Some(vendor) = self.vendor {
            builder = builder.vendor(vendor);
        }
        Ok(builder.build()?)
    }
}

/// Query string for `GET /products?ids=1,2,3`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub ids: Option<String>,
}

/// Query string for `DELETE /products?catalogNumber=7`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    pub catalog_number: Option<String>,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Product>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the statistics endpoint.
pub enum StatisticsResponse {
    Ok(Json<ProductsStatistics>),
}

impl IntoResponse for StatisticsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoints.
pub enum CreateResponse {
    Created,
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created => StatusCode::CREATED.into_response(),
        }
    }
}

/// Possible responses from the update and delete endpoints.
pub enum MutateResponse {
    NoContent,
}

impl IntoResponse for MutateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_catalog_number(text: &str) -> Result<CatalogNumber, ValidationError> {
    text.parse()
        .map_err(|_| ValidationError::InvalidCatalogNumber(text.to_string()))
}

/// Parse a comma-separated list of catalog numbers. Blank segments are ignored.
fn parse_ids(text: &str) -> Result<BTreeSet<CatalogNumber>, ValidationError> {
    text.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_catalog_number)
        .collect()
}

/// `GET /products/stats`
pub async fn statistics<R>(
    State(state): State<AppState<R>>,
) -> Result<StatisticsResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let stats = state.product_service.statistics().await?;
    Ok(StatisticsResponse::Ok(Json(stats)))
}

/// `GET /products`
pub async fn list<R>(
    State(state): State<AppState<R>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let ids = match query.ids.as_deref() {
        Some(text) => parse_ids(text)?,
        None => BTreeSet::new(),
    };
    let products = state.product_service.list_products(&ids).await?;
    Ok(ListResponse::Ok(Json(products)))
}

/// `GET /products/{ids}`
pub async fn list_by_path<R>(
    State(state): State<AppState<R>>,
    Path(ids): Path<String>,
) -> Result<ListResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let ids = parse_ids(&ids)?;
    let products = state.product_service.list_products(&ids).await?;
    Ok(ListResponse::Ok(Json(products)))
}

/// `POST /products`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    let product = req.into_product(None)?;
    state.product_service.create_product(product).await?;
    Ok(CreateResponse::Created)
}

/// `POST /products/{catalog_number}`
pub async fn create_at<R>(
    State(state): State<AppState<R>>,
    Path(catalog_number): Path<String>,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let catalog_number = parse_catalog_number(&catalog_number)?;
    let Json(req) = body?;
    let product = req.into_product(Some(catalog_number))?;
    state.product_service.create_product(product).await?;
    Ok(CreateResponse::Created)
}

/// `PUT /products`
pub async fn update<R>(
    State(state): State<AppState<R>>,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<MutateResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    let product = req.into_product(None)?;
    state.product_service.update_product(product).await?;
    Ok(MutateResponse::NoContent)
}

/// `PUT /products/{catalog_number}`
pub async fn update_at<R>(
    State(state): State<AppState<R>>,
    Path(catalog_number): Path<String>,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<MutateResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let catalog_number = parse_catalog_number(&catalog_number)?;
    let Json(req) = body?;
    let product = req.into_product(Some(catalog_number))?;
    state.product_service.update_product(product).await?;
    Ok(MutateResponse::NoContent)
}

/// `DELETE /products?catalogNumber=N`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    Query(query): Query<DeleteQuery>,
) -> Result<MutateResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let catalog_number = query
        .catalog_number
        .as_deref()
        .map(parse_catalog_number)
        .transpose()?
        .ok_or(ValidationError::MissingCatalogNumber)?;
    delete_checked(&state, catalog_number).await
}

/// `DELETE /products/{catalog_number}`
pub async fn delete_at<R>(
    State(state): State<AppState<R>>,
    Path(catalog_number): Path<String>,
) -> Result<MutateResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let catalog_number = parse_catalog_number(&catalog_number)?;
    delete_checked(&state, catalog_number).await
}

async fn delete_checked<R>(
    state: &AppState<R>,
    catalog_number: CatalogNumber,
) -> Result<MutateResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    if !catalog_number.is_assigned() {
        return Err(ValidationError::MissingCatalogNumber.into());
    }
    state.product_service.delete_product(catalog_number).await?;
    Ok(MutateResponse::NoContent)
}
