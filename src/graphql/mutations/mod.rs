pub mod auth;
pub mod books;
pub mod notifications;
pub mod users;

pub use auth::AuthMutations;
pub use books::BookMutations;
pub use notifications::NotificationMutations;
pub use users::UserMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ID, Object, Result};

    pub(crate) use crate::db::*;
    pub(crate) use crate::graphql::auth::AuthGuard;
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
}
