//! Application services: credentials, sessions, accounts and notifications

pub mod auth;
pub mod credentials;
pub mod logging;
pub mod notifications;
pub mod tokens;

pub use auth::{AuthConfig, AuthError, AuthService, AuthSession, SignUpInput};
pub use credentials::{BCRYPT_COST, hash_password, verify_password};
pub use logging::init_tracing;
pub use notifications::{NotificationEvents, NotificationService};
pub use tokens::{SessionClaims, TOKEN_LIFETIME_DAYS, TokenService};
