//! HTTP server for hierarchical todos and categories.
//!
//! The transport is a thin layer over [`todo_core::Endpoints`]: see [`http`]
//! for the routes and the response envelope.

pub mod http;

pub use http::{app, serve};
