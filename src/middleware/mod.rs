//! Middleware module for the Keygate HTTP server
//!
//! Provides:
//! - Credential gate extractor (query-parameter key/value pair)
//! - Admin bearer-token extractor

pub mod auth;
