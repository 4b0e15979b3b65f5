pub mod dashboard;
pub mod layout;
pub mod report;
pub mod supply;
