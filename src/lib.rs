//! rawserve - a small HTTP/1.1 server over raw TCP
//!
//! Core library for request parsing, routing, file storage and response
//! serialization.

pub mod config;
pub mod handlers;
pub mod http;
pub mod server;
pub mod store;
