//! Helper functions shared across GraphQL query/mutation modules

use async_graphql::{ErrorExtensions, ID};

use crate::services::AuthError;

/// Parse a GraphQL ID into a database row ID
pub(crate) fn parse_id(id: &ID) -> async_graphql::Result<i64> {
    id.parse::<i64>()
        .map_err(|_| async_graphql::Error::new(format!("Invalid ID: {}", id.as_str())))
}

/// Error for update/delete on a missing row
pub(crate) fn not_found(kind: &str, id: impl std::fmt::Display) -> async_graphql::Error {
    async_graphql::Error::new(format!("{} {} not found", kind, id))
        .extend_with(|_, e| e.set("code", "NOT_FOUND"))
}

/// Convert a repository error, logging the detail server-side
pub(crate) fn db_error(e: anyhow::Error) -> async_graphql::Error {
    tracing::error!(error = %e, "Database operation failed");
    async_graphql::Error::new(e.to_string())
}

/// Convert an auth service error into a client-facing error
pub(crate) fn auth_error(e: AuthError) -> async_graphql::Error {
    if e.is_client_error() {
        async_graphql::Error::new(e.to_string()).extend_with(|_, ext| ext.set("code", "UNAUTHORIZED"))
    } else {
        tracing::error!(error = %e, "Authentication backend failure");
        async_graphql::Error::new("Internal server error")
    }
}
