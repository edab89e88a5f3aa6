use rusqlite::Connection;
use validator::Validate;

use crate::db::queries;
use crate::db::store::Patch;
use crate::error::{msg, AppError, OptionExt, Result};
use crate::models::{Product, SaveProduct};
use crate::views::{View, ViewTracker};

/// Insert or merge-update a catalog product.
///
/// With an id, only the supplied fields change in storage; omitted fields
/// keep their prior values. Without one, the store assigns the id and the
/// zero defaults for units sold and rating.
pub fn save_product(
    conn: &Connection,
    views: &ViewTracker,
    input: &SaveProduct,
) -> Result<Product> {
    input.validate()?;

    let product = match &input.id {
        Some(id) => {
            queries::merge_product(conn, id, product_patch(input))?;
            queries::get_product_by_id(conn, id)?.or_not_found(msg::PRODUCT_NOT_FOUND)?
        }
        None => {
            let new = input.into_new().map_err(AppError::Validation)?;
            queries::insert_product(conn, &new)?
        }
    };

    views.invalidate(&[View::AdminProducts, View::PublicCatalog, View::AdminDashboard]);
    Ok(product)
}

fn product_patch(input: &SaveProduct) -> Patch {
    Patch::new()
        .set_opt("title", input.title.as_deref())
        .set_opt("category", input.category.as_deref())
        .set_opt("description", input.description.as_deref())
        .set_opt("price", input.price)
        .set_opt("discount", input.discount)
        .set_opt("image", input.image.as_deref())
        .set_opt("live_preview_link", input.live_preview_link.as_deref())
}

/// Remove a product. Deleting an id that does not exist is not an error,
/// and existing orders keep their title/price snapshots.
pub fn delete_product(conn: &Connection, views: &ViewTracker, id: &str) -> Result<()> {
    queries::delete_product(conn, id)?;
    views.invalidate(&[View::AdminProducts, View::PublicCatalog, View::AdminDashboard]);
    Ok(())
}
