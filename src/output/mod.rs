//! Output module for the vector-store sink used by RAG ingestion.

mod vector_client;

pub use vector_client::VectorStoreClient;
