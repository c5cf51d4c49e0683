//! GraphQL object types and the `Date` scalar

use async_graphql::{ID, InputValueError, InputValueResult, Scalar, ScalarType, SimpleObject, Value};
use chrono::{DateTime, Utc};

use crate::db::{BookRecord, NotificationRecord, UserRecord};
use crate::services::AuthSession;

// ============================================================================
// Scalars
// ============================================================================

/// Timestamp exchanged as milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub DateTime<Utc>);

#[Scalar(name = "Date")]
impl ScalarType for Date {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            // Fractional milliseconds are truncated
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|ms| ms.is_finite()).map(|ms| ms.trunc() as i64))
                .and_then(DateTime::from_timestamp_millis)
                .map(Date)
                .ok_or_else(|| InputValueError::custom("Date must be a millisecond timestamp")),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Number(self.0.timestamp_millis().into())
    }
}

impl From<DateTime<Utc>> for Date {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

// ============================================================================
// Objects
// ============================================================================

#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub id: ID,
    pub email: String,
    pub username: String,
    pub biography: Option<String>,
    pub created_at: Date,
    pub updated_at: Date,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: ID::from(r.id),
            email: r.email,
            username: r.username,
            biography: r.biography,
            created_at: r.created_at.into(),
            updated_at: r.updated_at.into(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Notification {
    pub id: ID,
    pub title: String,
    pub text: String,
    pub created_at: Date,
    pub updated_at: Date,
}

impl From<NotificationRecord> for Notification {
    fn from(r: NotificationRecord) -> Self {
        Self {
            id: ID::from(r.id),
            title: r.title,
            text: r.text,
            created_at: r.created_at.into(),
            updated_at: r.updated_at.into(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Book {
    pub id: ID,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub release_date: Option<String>,
    pub page_count: Option<String>,
    pub volume: Option<String>,
}

impl From<BookRecord> for Book {
    fn from(r: BookRecord) -> Self {
        Self {
            id: ID::from(r.id),
            title: r.title,
            author: r.author,
            publisher: r.publisher,
            release_date: r.release_date,
            page_count: r.page_count,
            volume: r.volume,
        }
    }
}

/// Result of signUp and signIn
#[derive(Debug, Clone, SimpleObject)]
pub struct AuthPayload {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub user: User,
}

impl From<AuthSession> for AuthPayload {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user: session.user.into(),
        }
    }
}
