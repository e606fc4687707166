//! Store handlers: inventory lookup and orders.

use crate::error::AppError;
use crate::model::{Order, OrderInput, OrderStatus};
use crate::response::{self, MessageBody};
use crate::service::{OrderService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;

#[utoipa::path(
    get,
    path = "/store/inventory",
    params(("status" = OrderStatus, Query, description = "Order status to match")),
    responses(
        (status = 200, description = "Last order with the status", body = Order),
        (status = 404, description = "No order has the status"),
        (status = 422, description = "Missing or unknown status"),
    ),
    tag = "store",
)]
pub async fn inventory(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let status: OrderStatus = RequestValidator::parse_required(query.get("status"), "status")?;
    let order = OrderService::find_last_by_status(&state.gateway, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no order with status {}", status)))?;
    Ok(response::ok(order))
}

#[utoipa::path(
    get,
    path = "/store/order/{orderId}",
    params(("orderId" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 404, description = "Order not found"),
    ),
    tag = "store",
)]
pub async fn get_order(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let order_id = RequestValidator::parse_id(&raw_id, "orderId")?;
    let order = OrderService::find_by_id(&state.gateway, order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {}", order_id)))?;
    Ok(response::ok(order))
}

#[utoipa::path(
    post,
    path = "/store/order",
    request_body = OrderInput,
    responses(
        (status = 200, description = "Stored order", body = Order),
        (status = 404, description = "Pet not found"),
    ),
    tag = "store",
)]
pub async fn place_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let order = OrderService::place(&state.gateway, &input).await?;
    Ok(response::ok(order))
}

#[utoipa::path(
    delete,
    path = "/store/order/{orderId}",
    params(("orderId" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted", body = MessageBody),
        (status = 404, description = "Order not found"),
    ),
    tag = "store",
)]
pub async fn delete_order(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<impl IntoResponse, AppError> {
    let order_id = RequestValidator::parse_id(&raw_id, "orderId")?;
    OrderService::delete(&state.gateway, order_id).await?;
    Ok(response::message(format!(
        "Order with ID {} has been deleted successfully.",
        order_id
    )))
}
