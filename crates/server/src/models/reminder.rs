use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Clearable;

/// Wishlist entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Reminder {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub completed: bool,
}

/// Request body for creating a reminder
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateReminder {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Request body for updating a reminder
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateReminder {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: Clearable<String>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub category_id: Clearable<i64>,
    #[serde(default)]
    pub completed: Option<bool>,
}
