pub mod memory;
pub mod mongo;

pub use memory::InMemoryTransferRepository;
pub use mongo::MongoTransferRepository;
