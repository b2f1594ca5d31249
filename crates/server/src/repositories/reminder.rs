use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{CreateReminder, Reminder, UpdateReminder};

const SELECT_REMINDER: &str = r#"
    SELECT id, created_at, updated_at, title, description, category_id, completed
    FROM reminder
"#;

pub struct ReminderRepository;

impl ReminderRepository {
    pub async fn create(pool: &SqlitePool, data: CreateReminder) -> Result<Reminder, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO reminder (title, description, category_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.category_id)
        .fetch_one(pool)
        .await?;

        let id: i64 = sqlx::Row::get(&result, "id");
        Self::get_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Open reminders first, then newest first
    pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Reminder>, sqlx::Error> {
        let query = format!(
            "{} ORDER BY completed ASC, created_at DESC, id DESC",
            SELECT_REMINDER
        );
        let rows = sqlx::query_as::<_, ReminderRow>(&query)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Reminder>, sqlx::Error> {
        let query = format!("{} WHERE id = $1", SELECT_REMINDER);
        let row = sqlx::query_as::<_, ReminderRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Apply a partial update, returns None when the reminder does not exist
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: UpdateReminder,
    ) -> Result<Option<Reminder>, sqlx::Error> {
        let Some(existing) = Self::get_by_id(pool, id).await? else {
            return Ok(None);
        };

        let title = data.title.unwrap_or(existing.title);
        let description = data.description.resolve(existing.description);
        let category_id = data.category_id.resolve(existing.category_id);
        let completed = data.completed.unwrap_or(existing.completed);

        sqlx::query(
            r#"
            UPDATE reminder SET
                title = $1,
                description = $2,
                category_id = $3,
                completed = $4,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $5
            "#,
        )
        .bind(&title)
        .bind(&description)
        .bind(category_id)
        .bind(completed)
        .bind(id)
        .execute(pool)
        .await?;

        Self::get_by_id(pool, id).await
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reminder WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reminder")
            .fetch_one(pool)
            .await
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReminderRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    title: String,
    description: Option<String>,
    category_id: Option<i64>,
    completed: bool,
}

impl From<ReminderRow> for Reminder {
    fn from(row: ReminderRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            title: row.title,
            description: row.description,
            category_id: row.category_id,
            completed: row.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::models::Clearable;

    #[tokio::test]
    async fn test_create_and_partial_update() {
        let pool = create_memory_pool().await;
        let reminder = ReminderRepository::create(
            &pool,
            CreateReminder {
                title: "Watch Arrival".into(),
                description: Some("the director's cut".into()),
                category_id: Some(1),
            },
        )
        .await
        .unwrap();
        assert!(!reminder.completed);

        let updated = ReminderRepository::update(
            &pool,
            reminder.id,
            UpdateReminder {
                description: Clearable::Clear,
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.title, "Watch Arrival");
        assert!(updated.description.is_none());
        assert_eq!(updated.category_id, Some(1));
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn test_missing_reminder() {
        let pool = create_memory_pool().await;
        assert!(ReminderRepository::update(&pool, 404, UpdateReminder::default())
            .await
            .unwrap()
            .is_none());
        assert!(!ReminderRepository::delete(&pool, 404).await.unwrap());
        assert_eq!(ReminderRepository::count(&pool).await.unwrap(), 0);
    }
}
