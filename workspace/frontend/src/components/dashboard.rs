pub mod detail_panel;
pub mod forecast_card;
pub mod forecast_column;
pub mod summary;
pub mod view;

pub use view::DashboardView;
