pub mod record_store;
pub mod writer;
