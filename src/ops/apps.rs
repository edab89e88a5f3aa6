use rusqlite::Connection;
use validator::Validate;

use crate::db::queries;
use crate::db::store::Patch;
use crate::error::{msg, AppError, OptionExt, Result};
use crate::models::{MyApp, SaveMyApp};
use crate::views::{View, ViewTracker};

/// Insert or merge-update an app listing, mirroring the product upsert
/// without the numeric defaults.
pub fn save_my_app(conn: &Connection, views: &ViewTracker, input: &SaveMyApp) -> Result<MyApp> {
    input.validate()?;

    let app = match &input.id {
        Some(id) => {
            let patch = Patch::new()
                .set_opt("name", input.name.as_deref())
                .set_opt("image", input.image.as_deref())
                .set_opt("install_link", input.install_link.as_deref());
            queries::merge_my_app(conn, id, patch)?;
            queries::get_my_app_by_id(conn, id)?.or_not_found(msg::APP_NOT_FOUND)?
        }
        None => {
            let new = input.into_new().map_err(AppError::Validation)?;
            queries::insert_my_app(conn, &new)?
        }
    };

    views.invalidate(&[View::AdminApps, View::PublicApps]);
    Ok(app)
}

/// Remove an app listing. Deleting an id that does not exist is not an
/// error.
pub fn delete_my_app(conn: &Connection, views: &ViewTracker, id: &str) -> Result<()> {
    queries::delete_my_app(conn, id)?;
    views.invalidate(&[View::AdminApps, View::PublicApps]);
    Ok(())
}
