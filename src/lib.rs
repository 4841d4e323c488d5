// Movie catalog state: listings, image cache, favorites and selection

pub mod backends;
pub mod config;
pub mod constants;
pub mod core;
pub mod db;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use crate::config::Config;
pub use crate::core::{LoadState, Operation, Property, PropertySubscriber};
pub use crate::state::CatalogSession;
pub use crate::utils::{CatalogError, CatalogResult};
