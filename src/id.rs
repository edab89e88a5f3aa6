//! Prefixed ID generation for storefront entities.
//!
//! The store assigns every record a `sf_{entity}_{uuid_simple}` identifier
//! (32 hex chars, no hyphens) on insert. Ids are never reassigned, and
//! update operations never change them.

use uuid::Uuid;

/// Entity types that receive store-assigned ids.
#[derive(Debug, Clone, Copy)]
pub enum EntityType {
    Product,
    Order,
    SellRequest,
    App,
}

impl EntityType {
    /// Returns the prefix for this entity type.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Product => "sf_prod",
            Self::Order => "sf_ord",
            Self::SellRequest => "sf_req",
            Self::App => "sf_app",
        }
    }

    /// Generates a new prefixed ID for this entity type.
    pub fn gen_id(&self) -> String {
        format!("{}_{}", self.prefix(), Uuid::new_v4().as_simple())
    }
}
