use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::FieldErrors;

/// Entry in the secondary app-listing catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyApp {
    pub id: String,
    pub name: String,
    pub image: String,
    pub install_link: String,
}

/// Upsert input for the app listing, with the same partial-update
/// treatment as products.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveMyApp {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "App name is required"))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Must be a valid image URL"))]
    pub image: Option<String>,
    #[serde(default)]
    #[validate(url(message = "Must be a valid install link URL"))]
    pub install_link: Option<String>,
}

impl SaveMyApp {
    /// Build the insert body, reporting every missing required field.
    pub fn into_new(&self) -> std::result::Result<NewMyApp, FieldErrors> {
        match (&self.name, &self.image, &self.install_link) {
            (Some(name), Some(image), Some(install_link)) => Ok(NewMyApp {
                name: name.clone(),
                image: image.clone(),
                install_link: install_link.clone(),
            }),
            _ => {
                let mut errors = FieldErrors::new();
                if self.name.is_none() {
                    errors.insert("name".into(), "App name is required".into());
                }
                if self.image.is_none() {
                    errors.insert("image".into(), "An image URL is required".into());
                }
                if self.install_link.is_none() {
                    errors.insert("install_link".into(), "An install link URL is required".into());
                }
                Err(errors)
            }
        }
    }
}

/// Insert body for a new app listing.
#[derive(Debug, Serialize)]
pub struct NewMyApp {
    pub name: String,
    pub image: String,
    pub install_link: String,
}
