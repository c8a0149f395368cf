pub mod dashboard;
pub mod format;
pub mod layout;
pub mod ranking;
pub mod users;
