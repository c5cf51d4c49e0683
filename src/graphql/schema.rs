//! GraphQL schema definition with queries, mutations, and subscriptions
//!
//! Every operation except signUp, signIn and the notificationChange
//! subscription requires an authenticated request.

use async_graphql::{MergedObject, Schema};

use crate::db::Database;
use crate::services::{AuthService, NotificationEvents, NotificationService, TokenService};

use super::mutations::{AuthMutations, BookMutations, NotificationMutations, UserMutations};
use super::queries::{BookQueries, NotificationQueries, UserQueries};
use super::subscriptions::SubscriptionRoot;

/// The GraphQL schema type
pub type BookshelfSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(UserQueries, NotificationQueries, BookQueries);

#[derive(MergedObject, Default)]
pub struct MutationRoot(AuthMutations, UserMutations, NotificationMutations, BookMutations);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database, tokens: TokenService, events: NotificationEvents) -> BookshelfSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), SubscriptionRoot)
        .data(AuthService::new(db.clone(), tokens.clone()))
        .data(NotificationService::new(db.clone(), events))
        .data(tokens)
        .data(db)
        .finish()
}
