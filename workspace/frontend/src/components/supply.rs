pub mod modal;

pub use modal::SupplyModal;
