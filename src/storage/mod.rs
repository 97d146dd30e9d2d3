pub mod codec;
pub mod document;
pub mod engine;
pub mod memory;
pub mod persistence;
pub mod table;

pub use document::{CURRENT_VERSION, Document};
pub use engine::{DocumentStorage, LocationId};
pub use memory::MemoryStorage;
pub use persistence::FileStorage;
pub use table::Table;
