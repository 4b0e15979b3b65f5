pub mod chat;
pub mod dashboard;
