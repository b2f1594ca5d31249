mod category;
mod common;
mod download;
mod health;
mod reminder;

pub use category::*;
pub use common::*;
pub use download::*;
pub use health::*;
pub use reminder::*;
