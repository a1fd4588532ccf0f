// Presentational shells: navigation and page copy. No business logic.

pub mod navigation;
pub mod pages;
