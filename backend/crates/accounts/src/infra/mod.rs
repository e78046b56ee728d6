//! Infrastructure Layer
//!
//! Repository implementations: PostgreSQL for production, in-memory for
//! tests and demos.

pub mod memory;
pub mod postgres;

pub use memory::MemoryAccountStore;
pub use postgres::PgAccountRepository;
