pub mod catalog;
pub mod config;
pub mod era_index;
pub mod thumbnail;
pub mod timeline;
pub mod util;
