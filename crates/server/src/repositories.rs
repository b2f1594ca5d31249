mod category;
mod download;
mod reminder;

pub use category::CategoryRepository;
pub use download::DownloadRepository;
pub use reminder::ReminderRepository;
