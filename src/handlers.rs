pub mod analysis;
pub mod chat;
pub mod forecasts;
pub mod health;
pub mod supply;
