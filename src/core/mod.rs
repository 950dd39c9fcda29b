pub mod ingest;
pub mod store;

pub use store::EventStore;
