//! Platform Request Service Library

pub mod config;
pub mod http;
pub mod observability;
pub mod processor;
pub mod storage;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use processor::RequestProcessor;
pub use storage::RequestRepository;
