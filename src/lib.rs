//! Bookshelf - GraphQL API for books, users and notifications
//!
//! The crate exposes the GraphQL schema, its SQLite persistence layer, and the
//! credential/session module used to authenticate requests. Mounting the schema
//! on an HTTP/WebSocket router is left to the embedding process.

pub mod config;
pub mod db;
pub mod graphql;
pub mod services;

pub use config::Config;
pub use db::Database;
pub use graphql::{BookshelfSchema, build_schema};
pub use services::{AuthConfig, AuthError, AuthService, NotificationEvents, TokenService};
