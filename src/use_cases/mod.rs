pub mod dashboard;
pub mod menu_catalog;

#[cfg(test)]
pub(crate) mod test_support;

pub use dashboard::{DashboardReport, DashboardStatistics, DashboardUseCase};
pub use menu_catalog::{FeaturedDishes, MenuCatalogUseCase, MenuFilter, MenuPage};
