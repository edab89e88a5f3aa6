use rusqlite::Connection;

/// Initialize the document store schema.
///
/// Record bodies are schema-flexible JSON; ids are store-assigned and the
/// (collection, id) pair is the only structure the store knows about.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;

        CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            data TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        );
        "#,
    )?;
    Ok(())
}
