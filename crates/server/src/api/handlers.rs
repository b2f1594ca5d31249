mod categories;
mod downloads;
mod health;
mod reminders;
mod sync;

// Re-export all handlers
pub use categories::list_categories;
pub use downloads::{
    create_download, delete_download, get_download, list_downloads, pause_download,
    resume_download, DeleteDownloadQuery,
};
pub use health::health_check;
pub use reminders::{create_reminder, delete_reminder, list_reminders, update_reminder};
pub use sync::trigger_sync;

// Re-export utoipa path structs for OpenAPI routing
#[doc(hidden)]
pub use categories::__path_list_categories;
#[doc(hidden)]
pub use downloads::{
    __path_create_download, __path_delete_download, __path_get_download, __path_list_downloads,
    __path_pause_download, __path_resume_download,
};
#[doc(hidden)]
pub use health::__path_health_check;
#[doc(hidden)]
pub use reminders::{
    __path_create_reminder, __path_delete_reminder, __path_list_reminders,
    __path_update_reminder,
};
#[doc(hidden)]
pub use sync::__path_trigger_sync;
