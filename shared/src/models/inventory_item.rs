//! Inventory Item Model

use serde::{Deserialize, Serialize};

/// Stock status derived from quantity.
///
/// Never persisted: every read path reclassifies from the current
/// quantity, so a stale cached status can never be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    RunningLow,
    Low,
    InStock,
}

impl StockStatus {
    /// Classify a raw quantity (inclusive thresholds):
    /// `<= 10` running low, `<= 50` low, otherwise in stock.
    ///
    /// Total over all integers: negative input clamps to RunningLow
    /// rather than erroring. Callers validate before writing, not here.
    pub fn classify(quantity: i64) -> Self {
        if quantity <= 10 {
            StockStatus::RunningLow
        } else if quantity <= 50 {
            StockStatus::Low
        } else {
            StockStatus::InStock
        }
    }
}

/// Inventory item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    /// On-hand quantity (non-negative)
    pub quantity: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl InventoryItem {
    /// Derive the current stock status from quantity
    pub fn status(&self) -> StockStatus {
        StockStatus::classify(self.quantity)
    }
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub quantity: i64,
}

/// Update inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub quantity: Option<i64>,
}

/// Adjust quantity payload (restock positive, usage negative)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryAdjust {
    pub delta: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_boundaries() {
        assert_eq!(StockStatus::classify(10), StockStatus::RunningLow);
        assert_eq!(StockStatus::classify(11), StockStatus::Low);
        assert_eq!(StockStatus::classify(50), StockStatus::Low);
        assert_eq!(StockStatus::classify(51), StockStatus::InStock);
    }

    #[test]
    fn classify_extremes() {
        assert_eq!(StockStatus::classify(0), StockStatus::RunningLow);
        // Negative quantities clamp instead of erroring
        assert_eq!(StockStatus::classify(-5), StockStatus::RunningLow);
        assert_eq!(StockStatus::classify(i64::MAX), StockStatus::InStock);
    }

    #[test]
    fn status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&StockStatus::RunningLow).unwrap(),
            "\"RUNNING_LOW\""
        );
        assert_eq!(
            serde_json::to_string(&StockStatus::InStock).unwrap(),
            "\"IN_STOCK\""
        );
    }
}
