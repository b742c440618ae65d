//! Template set storage adapters.

mod memory;

pub use memory::InMemorySetStore;
