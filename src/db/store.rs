//! Document-store persistence gateway.
//!
//! Collection-scoped CRUD over schema-flexible JSON records. The store
//! assigns ids on insert, orders listings by a record field, and merges
//! updates key-by-key so that fields omitted from a patch are left
//! untouched.

use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};
use crate::id::EntityType;

/// Named collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Products,
    Orders,
    SellRequests,
    MyApps,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Orders => "orders",
            Self::SellRequests => "sell_requests",
            Self::MyApps => "my_apps",
        }
    }

    fn entity(&self) -> EntityType {
        match self {
            Self::Products => EntityType::Product,
            Self::Orders => EntityType::Order,
            Self::SellRequests => EntityType::SellRequest,
            Self::MyApps => EntityType::App,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A stored record: the assigned id plus its schema-flexible fields.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    /// Merge the id into the fields and deserialize into a typed record.
    ///
    /// A record that no longer matches its type is a store-corruption
    /// condition, not a caller error.
    pub fn into_record<T: DeserializeOwned>(self) -> Result<T> {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(self.id));
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| AppError::Internal(format!("corrupt document: {}", e)))
    }
}

/// Serialize a value into document fields. Any `id` key is discarded: ids
/// are store-assigned and never travel inside the record body.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        _ => Err(AppError::Internal(
            "document body must serialize to an object".to_string(),
        )),
    }
}

fn parse_fields(data: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(data) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) | Err(_) => Err(AppError::Internal(
            "corrupt document body in store".to_string(),
        )),
    }
}

/// List every record in a collection, ordered by one of its fields.
///
/// `order_by` is interpolated into the JSON path and must be a field name
/// the caller controls, never user input.
pub fn list(
    conn: &Connection,
    collection: Collection,
    order_by: &str,
    direction: Direction,
) -> Result<Vec<Document>> {
    let sql = format!(
        "SELECT id, data FROM documents WHERE collection = ?1 \
         ORDER BY json_extract(data, '$.{}') {}",
        order_by,
        direction.as_sql()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![collection.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, data)| {
            Ok(Document {
                id,
                fields: parse_fields(&data)?,
            })
        })
        .collect()
}

pub fn get_by_id(conn: &Connection, collection: Collection, id: &str) -> Result<Option<Document>> {
    let data = conn
        .query_row(
            "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection.as_str(), id],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    match data {
        Some(data) => Ok(Some(Document {
            id: id.to_string(),
            fields: parse_fields(&data)?,
        })),
        None => Ok(None),
    }
}

/// Insert a new record; the store assigns and returns its id.
pub fn insert(conn: &Connection, collection: Collection, fields: Map<String, Value>) -> Result<String> {
    let id = collection.entity().gen_id();
    conn.execute(
        "INSERT INTO documents (collection, id, data) VALUES (?1, ?2, ?3)",
        params![collection.as_str(), id, Value::Object(fields).to_string()],
    )?;
    Ok(id)
}

/// Overwrite only the supplied fields, leaving all others at their prior
/// value. Creates the record when the id does not exist yet. A `null`
/// patch value clears the field.
pub fn upsert_merge(
    conn: &Connection,
    collection: Collection,
    id: &str,
    patch: Map<String, Value>,
) -> Result<()> {
    let existing = conn
        .query_row(
            "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection.as_str(), id],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    let merged = match existing {
        Some(data) => {
            let mut fields = parse_fields(&data)?;
            for (key, value) in patch {
                if value.is_null() {
                    fields.remove(&key);
                } else {
                    fields.insert(key, value);
                }
            }
            fields
        }
        None => patch.into_iter().filter(|(_, v)| !v.is_null()).collect(),
    };

    conn.execute(
        "INSERT INTO documents (collection, id, data) VALUES (?1, ?2, ?3) \
         ON CONFLICT (collection, id) DO UPDATE SET data = excluded.data",
        params![collection.as_str(), id, Value::Object(merged).to_string()],
    )?;
    Ok(())
}

/// Remove a record. Deleting an id that does not exist is not an error.
pub fn delete(conn: &Connection, collection: Collection, id: &str) -> Result<()> {
    conn.execute(
        "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
        params![collection.as_str(), id],
    )?;
    Ok(())
}

/// Builder for merge patches with optional fields. Fields that are `None`
/// never enter the patch, so the merge leaves them untouched.
#[derive(Debug, Default)]
pub struct Patch {
    fields: Map<String, Value>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn set_opt<V: Into<Value>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(field, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}
