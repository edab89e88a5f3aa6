use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An order placed through the manual-payment checkout flow.
///
/// `product_title` and `price` are snapshots taken at purchase time; later
/// product edits do not touch them. Status is the only field that changes
/// after creation, and orders are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub product_id: String,
    pub product_title: String,
    pub price: f64,
    pub customer_name: String,
    pub customer_email: String,
    /// Free-text transaction reference supplied by the buyer.
    pub payment_id: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Completed,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Checkout form input.
#[derive(Debug, Deserialize, Validate)]
pub struct PurchaseRequest {
    #[validate(length(min = 1, message = "Product is required"))]
    pub product_id: String,
    #[validate(length(min = 2, message = "Name is required"))]
    pub customer_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub customer_email: String,
    #[validate(length(min = 10, message = "A valid transaction ID is required"))]
    pub payment_id: String,
}

/// Insert body for a new order.
#[derive(Debug, Serialize)]
pub struct NewOrder {
    pub product_id: String,
    pub product_title: String,
    pub price: f64,
    pub customer_name: String,
    pub customer_email: String,
    pub payment_id: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Admin status-transition input.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}
