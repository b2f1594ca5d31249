use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    // Run migrations
    sqlx::migrate!("../../migrations").run(&pool).await?;

    Ok(pool)
}

/// Fresh in-memory database with the schema applied.
///
/// Limited to one connection: every SQLite memory connection is its own database.
#[cfg(test)]
pub async fn create_memory_pool() -> SqlitePool {
    create_pool("sqlite::memory:", 1)
        .await
        .expect("in-memory database")
}
