// location module — the hash-fragment port and its in-memory implementation

mod interface;
pub mod memory;

pub use interface::Location;
pub use memory::MemoryLocation;
