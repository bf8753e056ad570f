//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories over Diesel and a bb8 pool
//! - **memory**: in-process store used without a database and in tests
//! - **security**: password digests and signed bearer tokens
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
