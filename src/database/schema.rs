use rusqlite::{Connection, OptionalExtension, Result};

/// Name of the `vec0` virtual table holding one row per stored node
pub const VEC_TABLE_NAME: &str = "vec_items";

/// DDL for the vector table with an `embed_dim`-wide embedding column.
///
/// `text` is an auxiliary (`+`) column: stored alongside the vector but never
/// part of similarity comparisons.
pub fn vec_table_ddl(embed_dim: usize) -> String {
    format!(
        "CREATE VIRTUAL TABLE IF NOT EXISTS {VEC_TABLE_NAME} USING vec0(
            id INTEGER PRIMARY KEY,
            metadata_ TEXT,
            node_id TEXT,
            embedding float[{embed_dim}],
            +text TEXT
        )"
    )
}

pub fn create_schema(conn: &Connection, embed_dim: usize) -> Result<()> {
    conn.execute(&vec_table_ddl(embed_dim), [])?;
    Ok(())
}

/// Whether the vector table has already been created in this database
pub fn vec_table_exists(conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [VEC_TABLE_NAME],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Embedding width the existing vector table was declared with, if it exists
pub fn declared_dimension(conn: &Connection) -> Result<Option<usize>> {
    let sql: Option<String> = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [VEC_TABLE_NAME],
            |row| row.get(0),
        )
        .optional()?;

    Ok(sql.as_deref().and_then(parse_float_width))
}

/// Number of schema objects (the table plus its shadow tables and indexes)
/// that belong to the vector table
pub fn schema_object_count(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE name = ?1 OR name LIKE ?1 || '\\_%' ESCAPE '\\'",
        [VEC_TABLE_NAME],
        |row| row.get(0),
    )
}

fn parse_float_width(ddl: &str) -> Option<usize> {
    let lower = ddl.to_lowercase();
    let start = lower.find("float[")? + "float[".len();
    let end = lower[start..].find(']')? + start;
    lower[start..end].trim().parse().ok()
}
