pub mod layout;
pub mod navbar;
pub mod sidebar;

pub use layout::Layout;
