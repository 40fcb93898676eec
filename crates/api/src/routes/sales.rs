//! Sale creation, listing and status update endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use domain::{CreateSale, ListSales, Sale, SalesService, TransitionSale};
use projections::SalesReport;
use sale_store::SaleStore;
use serde::Deserialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: SaleStore> {
    pub sales: SalesService<S>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateSaleRequest {
    #[serde(alias = "user_id")]
    pub owner_id: String,
    pub amount: f64,
}

#[derive(Deserialize)]
pub struct ListSalesParams {
    #[serde(default, alias = "user_id")]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSaleRequest {
    #[serde(default)]
    pub status: Option<String>,
    /// Version the client last saw; enables a conditional update.
    #[serde(default)]
    pub version: Option<u64>,
}

// -- Handlers --

/// POST /sales: record a new sale for an existing owner.
#[tracing::instrument(skip(state, payload))]
pub async fn create<S: SaleStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateSaleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Sale>), ApiError> {
    let Json(req) = payload?;
    if req.owner_id.is_empty() {
        return Err(ApiError::BadRequest("owner_id is required".to_string()));
    }

    let sale = state
        .sales
        .create_sale(CreateSale::new(req.owner_id, req.amount))
        .await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

/// GET /sales?owner_id=&status=: list an owner's sales with a summary.
#[tracing::instrument(skip(state, params))]
pub async fn list<S: SaleStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    params: Result<Query<ListSalesParams>, QueryRejection>,
) -> Result<Json<SalesReport>, ApiError> {
    let Query(params) = params?;
    let owner_id = params
        .owner_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("owner_id is required".to_string()))?;

    let mut query = ListSales::for_owner(owner_id);
    query.status = params.status;

    let sales = state.sales.list_sales(query).await?;
    Ok(Json(SalesReport::new(sales)))
}

/// PATCH /sales/:id: move a pending sale to approved or rejected.
#[tracing::instrument(skip(state, payload))]
pub async fn update<S: SaleStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSaleRequest>, JsonRejection>,
) -> Result<Json<Sale>, ApiError> {
    let Json(req) = payload?;
    let status = req
        .status
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("status is required".to_string()))?;

    let mut cmd = TransitionSale::new(id, status);
    cmd.expected_version = req.version;

    let sale = state.sales.transition_sale(cmd).await?;
    Ok(Json(sale))
}

/// PATCH /sales/: an update without a sale ID in the path.
pub async fn update_without_id() -> ApiError {
    ApiError::BadRequest("id is required".to_string())
}
