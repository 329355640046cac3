//! Persistence subsystem for processed platform requests.
//!
//! # Data Flow
//! ```text
//! RequestProcessor
//!     → models.rs (ProcessedRequest row built at process time)
//!     → repo.rs (single INSERT per successful call)
//!     → pool.rs (shared SQLite pool)
//! ```
//!
//! # Design Decisions
//! - Append-only: the service inserts rows and never updates or deletes them
//! - Schema is created on startup with CREATE TABLE IF NOT EXISTS
//! - Read-side finders exist for analytics but have no HTTP surface

pub mod models;
pub mod pool;
pub mod repo;

pub use models::ProcessedRequest;
pub use pool::StorePool;
pub use repo::RequestRepository;
