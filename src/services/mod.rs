pub mod catalog;
pub mod ingestion;
pub mod providers;
pub mod recommendations;
pub mod show_search;
