pub mod catalog;
pub mod favorites;
pub mod image_cache;
pub mod lookup;
pub mod selection;

pub use catalog::CatalogController;
pub use favorites::FavoritesController;
pub use image_cache::ImageCacheController;
pub use lookup::{MovieLookup, StaticCatalog};
pub use selection::SelectionState;
