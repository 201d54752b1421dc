pub mod article;
pub mod claim;
pub mod config;
pub mod evidence;
pub mod verdict;
