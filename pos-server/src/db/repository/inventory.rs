//! Inventory Repository
//!
//! Quantity math happens in SQL so concurrent adjustments never lose
//! updates. Stock status is never written here: it is derived from
//! quantity at read time by the caller.

use super::{RepoError, RepoResult};
use shared::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, quantity, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<InventoryItem>> {
    let item = sqlx::query_as::<_, InventoryItem>(&format!(
        "SELECT {COLUMNS} FROM inventory_item WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<InventoryItem>> {
    let item = sqlx::query_as::<_, InventoryItem>(&format!(
        "SELECT {COLUMNS} FROM inventory_item WHERE name = ?"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<InventoryItem>> {
    let items = sqlx::query_as::<_, InventoryItem>(&format!(
        "SELECT {COLUMNS} FROM inventory_item ORDER BY name ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn create(pool: &SqlitePool, data: InventoryItemCreate) -> RepoResult<InventoryItem> {
    if data.quantity < 0 {
        return Err(RepoError::Validation(format!(
            "Quantity cannot be negative: {}",
            data.quantity
        )));
    }
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Inventory item '{}' already exists",
            data.name
        )));
    }

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let item = sqlx::query_as::<_, InventoryItem>(&format!(
        "INSERT INTO inventory_item (id, name, quantity, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4) RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(data.name)
    .bind(data.quantity)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(item)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: InventoryItemUpdate,
) -> RepoResult<InventoryItem> {
    if let Some(q) = data.quantity
        && q < 0
    {
        return Err(RepoError::Validation(format!(
            "Quantity cannot be negative: {q}"
        )));
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory_item SET name = COALESCE(?1, name), quantity = COALESCE(?2, quantity), updated_at = ?3 WHERE id = ?4",
    )
    .bind(data.name)
    .bind(data.quantity)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Inventory item {id} not found"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
}

/// Apply a signed delta to the on-hand quantity, clamped at zero.
///
/// The clamp lives in SQL (MAX) so a concurrent usage burst cannot drive
/// the quantity negative through interleaved read-modify-write.
pub async fn adjust(pool: &SqlitePool, id: i64, delta: i64) -> RepoResult<InventoryItem> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory_item SET quantity = MAX(quantity + ?1, 0), updated_at = ?2 WHERE id = ?3",
    )
    .bind(delta)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Inventory item {id} not found"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM inventory_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
