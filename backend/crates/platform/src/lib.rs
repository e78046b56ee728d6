//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password credential hashing (salted HMAC-SHA512)
//! - Signed bearer token issuance and verification (HMAC-SHA256)
//!
//! Nothing in here touches the database or reads ambient configuration;
//! all secrets are passed in explicitly by the caller.

pub mod credential;
pub mod token;
