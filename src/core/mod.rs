pub mod coalesce;
pub mod load_state;
pub mod property;

pub use coalesce::Coalescer;
pub use load_state::{LoadState, Operation};
pub use property::{Property, PropertySubscriber};
