use sqlx::SqlitePool;

use crate::models::Category;

const SELECT_CATEGORY: &str = "SELECT id, name, description FROM category";

pub struct CategoryRepository;

impl CategoryRepository {
    /// Get all categories ordered by id
    pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("{} ORDER BY id ASC", SELECT_CATEGORY);
        let rows = sqlx::query_as::<_, CategoryRow>(&query)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("{} WHERE id = $1", SELECT_CATEGORY);
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("{} WHERE name = $1", SELECT_CATEGORY);
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}
