pub mod connection;
pub mod favorites;
pub mod memory;

pub use favorites::SqliteFavoritesStore;
pub use memory::MemoryFavoritesStore;
