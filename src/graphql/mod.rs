//! GraphQL API with subscriptions for real-time updates
//!
//! This module provides a GraphQL API using async-graphql with support for
//! queries, mutations, and subscriptions. Queries and mutations are split by
//! entity under `queries/` and `mutations/` and merged in `schema.rs`.

pub mod auth;
mod helpers;
pub mod mutations;
pub mod queries;
mod schema;
mod subscriptions;
pub mod types;

pub use auth::{AuthExt, AuthGuard, AuthUser, OptionalAuthUser, auth_user_from_headers, bearer_token};
pub use schema::{BookshelfSchema, MutationRoot, QueryRoot, build_schema};
pub use subscriptions::SubscriptionRoot;
pub use types::{AuthPayload, Book, Date, Notification, User};
