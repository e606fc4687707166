//! Store orders.

use crate::error::AppError;
use crate::model::{Order, OrderInput, OrderStatus};
use crate::service::assembler::{last_match, order_from_row};
use crate::service::gateway::{self, Gateway};
use crate::service::rows::{IdRow, OrderRow};
use crate::sql::queries;

pub struct OrderService;

impl OrderService {
    pub async fn list(gw: &Gateway) -> Result<Vec<Order>, AppError> {
        let mut conn = gw.acquire().await?;
        let rows: Vec<OrderRow> = gateway::fetch_all(&mut *conn, queries::SELECT_ORDERS, &[]).await?;
        rows.into_iter().map(order_from_row).collect()
    }

    /// First order with `id` in the full order list.
    pub async fn find_by_id(gw: &Gateway, id: i64) -> Result<Option<Order>, AppError> {
        Ok(Self::list(gw).await?.into_iter().find(|o| o.id == id))
    }

    /// Inventory lookup: the last order (highest id) with `status`.
    pub async fn find_last_by_status(gw: &Gateway, status: OrderStatus) -> Result<Option<Order>, AppError> {
        Ok(last_match(Self::list(gw).await?, |o| o.status == status))
    }

    /// Place an order for an existing pet. The submitted id is ignored; storage assigns one.
    pub async fn place(gw: &Gateway, input: &OrderInput) -> Result<Order, AppError> {
        let mut tx = gw.begin().await?;
        let pet: Option<IdRow> =
            gateway::fetch_optional(&mut tx, queries::SELECT_PET_ID_FOR_UPDATE, &[input.pet_id.into()]).await?;
        if pet.is_none() {
            return Err(AppError::NotFound(format!("pet {}", input.pet_id)));
        }
        let order_id = gateway::insert(
            &mut tx,
            queries::INSERT_ORDER,
            &[
                input.pet_id.into(),
                input.quantity.into(),
                input.ship_date.into(),
                input.status.as_str().into(),
                input.complete.into(),
            ],
        )
        .await?
        .inserted_id
        .ok_or_else(|| AppError::Internal("order insert returned no id".into()))?;
        let row: OrderRow = gateway::fetch_optional(&mut tx, queries::SELECT_ORDER_BY_ID, &[order_id.into()])
            .await?
            .ok_or_else(|| AppError::NotFound(format!("order {}", order_id)))?;
        let order = order_from_row(row)?;
        tx.commit().await?;
        tracing::info!(order_id, pet_id = input.pet_id, "order placed");
        Ok(order)
    }

    pub async fn delete(gw: &Gateway, id: i64) -> Result<(), AppError> {
        let mut conn = gw.acquire().await?;
        let outcome = gateway::execute(&mut *conn, queries::DELETE_ORDER, &[id.into()]).await?;
        if outcome.rows_affected == 0 {
            return Err(AppError::NotFound(format!("order {}", id)));
        }
        tracing::info!(order_id = id, "order deleted");
        Ok(())
    }
}
