pub mod session;

pub use session::{CatalogSession, CatalogSessionBuilder};
