use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::FieldErrors;

/// Closed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Telegram Mini Apps")]
    TelegramMiniApps,
    #[serde(rename = "Android Apps")]
    AndroidApps,
    #[serde(rename = "Websites")]
    Websites,
    #[serde(rename = "Bots")]
    Bots,
    #[serde(rename = "Tools")]
    Tools,
    #[serde(rename = "Services")]
    Services,
    #[serde(rename = "Games")]
    Games,
    #[serde(rename = "Social Accounts")]
    SocialAccounts,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Self::TelegramMiniApps,
        Self::AndroidApps,
        Self::Websites,
        Self::Bots,
        Self::Tools,
        Self::Services,
        Self::Games,
        Self::SocialAccounts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TelegramMiniApps => "Telegram Mini Apps",
            Self::AndroidApps => "Android Apps",
            Self::Websites => "Websites",
            Self::Bots => "Bots",
            Self::Tools => "Tools",
            Self::Services => "Services",
            Self::Games => "Games",
            Self::SocialAccounts => "Social Accounts",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Discount fraction in [0, 1]. Absent means no discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    /// Store-assigned counter, starts at zero on insert.
    #[serde(default)]
    pub units_sold: i64,
    /// Store-assigned rating in [0, 5], starts at zero on insert.
    #[serde(default)]
    pub rating: f64,
    pub image: String,
    pub live_preview_link: String,
    pub category: Category,
}

impl Product {
    /// Effective price after discount. Derived at read time, never
    /// persisted.
    pub fn sale_price(&self) -> f64 {
        self.price * (1.0 - self.discount.unwrap_or(0.0))
    }
}

/// Upsert input for the catalog. All fields are optional so that updates
/// may be partial; the insert path requires the full set and reports each
/// missing field.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveProduct {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(custom = "validate_category")]
    pub category: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Price must be positive"))]
    pub price: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0, message = "Discount must be between 0 and 1 (100%)"))]
    pub discount: Option<f64>,
    #[serde(default)]
    #[validate(url(message = "Must be a valid URL"))]
    pub image: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Must be a valid URL"))]
    pub live_preview_link: Option<String>,
}

fn validate_category(value: &str) -> Result<(), ValidationError> {
    if Category::from_str(value).is_some() {
        return Ok(());
    }
    let mut error = ValidationError::new("category");
    error.message = Some("Unknown category".into());
    Err(error)
}

impl SaveProduct {
    /// Build the insert body, reporting every missing required field.
    /// The store assigns the zero defaults for units sold and rating.
    pub fn into_new(&self) -> std::result::Result<NewProduct, FieldErrors> {
        let category = self.category.as_deref().and_then(Category::from_str);
        match (
            &self.title,
            category,
            &self.description,
            self.price,
            &self.image,
            &self.live_preview_link,
        ) {
            (
                Some(title),
                Some(category),
                Some(description),
                Some(price),
                Some(image),
                Some(live_preview_link),
            ) => Ok(NewProduct {
                title: title.clone(),
                description: description.clone(),
                price,
                discount: self.discount,
                units_sold: 0,
                rating: 0.0,
                image: image.clone(),
                live_preview_link: live_preview_link.clone(),
                category,
            }),
            _ => {
                let mut errors = FieldErrors::new();
                if self.title.is_none() {
                    errors.insert("title".into(), "Title is required".into());
                }
                if category.is_none() {
                    errors.insert("category".into(), "A known category is required".into());
                }
                if self.description.is_none() {
                    errors.insert("description".into(), "Description is required".into());
                }
                if self.price.is_none() {
                    errors.insert("price".into(), "Price is required".into());
                }
                if self.image.is_none() {
                    errors.insert("image".into(), "An image URL is required".into());
                }
                if self.live_preview_link.is_none() {
                    errors.insert(
                        "live_preview_link".into(),
                        "A live preview URL is required".into(),
                    );
                }
                Err(errors)
            }
        }
    }
}

/// Insert body for a new product.
#[derive(Debug, Serialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    pub units_sold: i64,
    pub rating: f64,
    pub image: String,
    pub live_preview_link: String,
    pub category: Category,
}
