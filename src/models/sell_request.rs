use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A "sell your product" submission from the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellRequest {
    pub id: String,
    pub product_name: String,
    pub product_link: String,
    pub price: f64,
    pub email: String,
    pub phone: String,
    pub message: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub submission_date: DateTime<Utc>,
    pub status: SellRequestStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl SellRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for SellRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Public submission form input.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitSellRequest {
    #[validate(length(min = 2, message = "Product name is required"))]
    pub product_name: String,
    #[validate(url(message = "A valid product link is required"))]
    pub product_link: String,
    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: f64,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "A contact number is required"))]
    pub phone: String,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

/// Insert body for a new sell request.
#[derive(Debug, Serialize)]
pub struct NewSellRequest {
    pub product_name: String,
    pub product_link: String,
    pub price: f64,
    pub email: String,
    pub phone: String,
    pub message: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub submission_date: DateTime<Utc>,
    pub status: SellRequestStatus,
}

/// Admin status-transition input.
#[derive(Debug, Deserialize)]
pub struct UpdateSellRequestStatus {
    pub status: SellRequestStatus,
}
