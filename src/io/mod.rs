pub mod items;
pub mod reporting;
