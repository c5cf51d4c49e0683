//! Integration tests for the GraphQL API
//!
//! These tests run GraphQL documents against an in-memory database:
//! - Authentication gating of protected operations
//! - Sign-up / sign-in and bearer-token binding
//! - CRUD for users, notifications and books
//! - The notificationChange subscription

use std::time::Duration;

use async_graphql::{Request, Response, Variables};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue};
use bookshelf::graphql::auth_user_from_headers;
use bookshelf::{AuthConfig, BookshelfSchema, Database, NotificationEvents, TokenService, build_schema};
use futures::{FutureExt, StreamExt};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

// ============================================================================
// Harness
// ============================================================================

struct TestApi {
    schema: BookshelfSchema,
    tokens: TokenService,
}

impl TestApi {
    async fn new() -> Self {
        let db = Database::in_memory().await.expect("in-memory database");
        let tokens = TokenService::new(&AuthConfig::new("integration-secret").unwrap());
        let schema = build_schema(db, tokens.clone(), NotificationEvents::default());
        Self { schema, tokens }
    }

    /// Execute a document the way the HTTP layer would: resolve the
    /// Authorization header first, then attach the user to the request.
    async fn execute(&self, query: &str, variables: Value, token: Option<&str>) -> Response {
        let mut request = Request::new(query).variables(Variables::from_json(variables));

        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
            );
        }
        if let Some(user) = auth_user_from_headers(&headers, &self.tokens) {
            request = request.data(user);
        }

        self.schema.execute(request).await
    }

    async fn data(&self, query: &str, variables: Value, token: Option<&str>) -> Value {
        let response = self.execute(query, variables, token).await;
        assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
        response.data.into_json().unwrap()
    }

    async fn error(&self, query: &str, variables: Value, token: Option<&str>) -> String {
        let response = self.execute(query, variables, token).await;
        assert!(!response.errors.is_empty(), "expected an error");
        response.errors[0].message.clone()
    }

    async fn sign_up(&self, email: &str, password: &str) -> (String, String) {
        let data = self
            .data(
                SIGN_UP,
                json!({ "email": email, "password": password, "username": "reader", "biography": "bio" }),
                None,
            )
            .await;
        let token = data["signUp"]["token"].as_str().unwrap().to_string();
        let user_id = data["signUp"]["user"]["id"].as_str().unwrap().to_string();
        (token, user_id)
    }
}

const SIGN_UP: &str = r#"
    mutation($email: String!, $password: String!, $username: String!, $biography: String!) {
        signUp(email: $email, password: $password, username: $username, biography: $biography) {
            token
            user { id email username biography }
        }
    }
"#;

const SIGN_IN: &str = r#"
    mutation($email: String!, $password: String!) {
        signIn(email: $email, password: $password) {
            token
            user { id email }
        }
    }
"#;

// ============================================================================
// Authentication
// ============================================================================

mod authentication {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_protected_queries_require_token() {
        let api = TestApi::new().await;

        for query in [
            "{ getAllUsers { id } }",
            "{ getAllNotifications { id } }",
            "{ getAllBooks { id } }",
            r#"{ getUser(id: "1") { id } }"#,
        ] {
            assert_eq!(api.error(query, json!({}), None).await, "Not authenticated");
        }
    }

    #[tokio::test]
    async fn test_garbage_token_is_anonymous() {
        let api = TestApi::new().await;
        let message = api
            .error("{ getAllUsers { id } }", json!({}), Some("not-a-token"))
            .await;
        assert_eq!(message, "Not authenticated");
    }

    #[tokio::test]
    async fn test_token_from_other_secret_is_anonymous() {
        let api = TestApi::new().await;
        let foreign = TokenService::new(&AuthConfig::new("someone-else").unwrap());
        let token = foreign.issue(1).unwrap();

        let message = api
            .error("{ getAllUsers { id } }", json!({}), Some(&token))
            .await;
        assert_eq!(message, "Not authenticated");
    }

    #[tokio::test]
    async fn test_sign_up_returns_usable_token() {
        let api = TestApi::new().await;
        let (token, user_id) = api.sign_up("ada@example.com", "engine").await;

        let data = api
            .data("{ getAllUsers { id email username } }", json!({}), Some(&token))
            .await;
        assert_eq!(
            data,
            json!({
                "getAllUsers": [
                    { "id": user_id, "email": "ada@example.com", "username": "reader" }
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_sign_in_roundtrip() {
        let api = TestApi::new().await;
        let (_, user_id) = api.sign_up("grace@example.com", "cobol").await;

        let data = api
            .data(
                SIGN_IN,
                json!({ "email": "grace@example.com", "password": "cobol" }),
                None,
            )
            .await;
        assert_eq!(data["signIn"]["user"]["id"], json!(user_id));

        let token = data["signIn"]["token"].as_str().unwrap();
        let me = api
            .data(
                "query($id: ID!) { getUser(id: $id) { email } }",
                json!({ "id": user_id }),
                Some(token),
            )
            .await;
        assert_eq!(me, json!({ "getUser": { "email": "grace@example.com" } }));
    }

    #[tokio::test]
    async fn test_sign_in_failures() {
        let api = TestApi::new().await;
        api.sign_up("linus@example.com", "kernel").await;

        let wrong_password = api
            .error(
                SIGN_IN,
                json!({ "email": "linus@example.com", "password": "minix" }),
                None,
            )
            .await;
        assert_eq!(wrong_password, "Invalid credentials");

        let unknown = api
            .error(
                SIGN_IN,
                json!({ "email": "nobody@example.com", "password": "kernel" }),
                None,
            )
            .await;
        assert_eq!(unknown, "Account not found");
    }

    #[tokio::test]
    async fn test_duplicate_sign_up() {
        let api = TestApi::new().await;
        api.sign_up("dup@example.com", "one").await;

        let message = api
            .error(
                SIGN_UP,
                json!({ "email": "dup@example.com", "password": "two", "username": "x", "biography": "" }),
                None,
            )
            .await;
        assert_eq!(message, "Email already registered");
    }

    #[tokio::test]
    async fn test_sign_up_with_email_of_added_user() {
        let api = TestApi::new().await;
        let (token, _) = api.sign_up("admin@example.com", "pw").await;
        api.data(
            r#"mutation { addUser(email: "profile@example.com", username: "p", biography: "") { id } }"#,
            json!({}),
            Some(&token),
        )
        .await;

        let message = api
            .error(
                SIGN_UP,
                json!({ "email": "profile@example.com", "password": "pw", "username": "p", "biography": "" }),
                None,
            )
            .await;
        assert_eq!(message, "Email already registered");
    }
}

// ============================================================================
// CRUD
// ============================================================================

mod crud {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_user_lifecycle() {
        let api = TestApi::new().await;
        let (token, _) = api.sign_up("admin@example.com", "pw").await;
        let token = Some(token.as_str());

        let added = api
            .data(
                r#"mutation { addUser(email: "new@example.com", username: "newbie", biography: "hi") { id createdAt } }"#,
                json!({}),
                token,
            )
            .await;
        let id = added["addUser"]["id"].as_str().unwrap().to_string();
        assert!(added["addUser"]["createdAt"].is_i64());

        let updated = api
            .data(
                r#"mutation($id: ID!) { updateUser(id: $id, email: "new@example.com", username: "renamed", biography: "bye") { username biography } }"#,
                json!({ "id": id }),
                token,
            )
            .await;
        assert_eq!(
            updated,
            json!({ "updateUser": { "username": "renamed", "biography": "bye" } })
        );

        let deleted = api
            .data(
                "mutation($id: ID!) { deleteUser(id: $id) { id } }",
                json!({ "id": id }),
                token,
            )
            .await;
        assert_eq!(deleted["deleteUser"]["id"], json!(id));

        let missing = api
            .data("query($id: ID!) { getUser(id: $id) { id } }", json!({ "id": id }), token)
            .await;
        assert_eq!(missing, json!({ "getUser": null }));

        let message = api
            .error(
                "mutation($id: ID!) { deleteUser(id: $id) { id } }",
                json!({ "id": id }),
                token,
            )
            .await;
        assert!(message.contains("not found"), "{message}");
    }

    #[tokio::test]
    async fn test_invalid_id() {
        let api = TestApi::new().await;
        let (token, _) = api.sign_up("ids@example.com", "pw").await;

        let message = api
            .error(r#"{ getUser(id: "abc") { id } }"#, json!({}), Some(&token))
            .await;
        assert_eq!(message, "Invalid ID: abc");
    }

    #[tokio::test]
    async fn test_book_lifecycle() {
        let api = TestApi::new().await;
        let (token, _) = api.sign_up("librarian@example.com", "pw").await;
        let token = Some(token.as_str());

        let added = api
            .data(
                r#"mutation { addBook(title: "Dune", author: "Frank Herbert", pageCount: "412") { id title pageCount publisher } }"#,
                json!({}),
                token,
            )
            .await;
        let id = added["addBook"]["id"].as_str().unwrap().to_string();
        assert_eq!(added["addBook"]["publisher"], Value::Null);

        let updated = api
            .data(
                r#"mutation { updateBook(title: "Dune", author: "F. Herbert", volume: "1") { id author volume pageCount } }"#,
                json!({}),
                token,
            )
            .await;
        assert_eq!(
            updated,
            json!({ "updateBook": { "id": id, "author": "F. Herbert", "volume": "1", "pageCount": null } })
        );

        let message = api
            .error(
                r#"mutation { updateBook(title: "Emma", author: "Austen") { id } }"#,
                json!({}),
                token,
            )
            .await;
        assert!(message.contains("not found"), "{message}");

        let fetched = api
            .data("query($id: ID!) { getBook(id: $id) { title } }", json!({ "id": id }), token)
            .await;
        assert_eq!(fetched, json!({ "getBook": { "title": "Dune" } }));

        api.data("mutation($id: ID!) { deleteBook(id: $id) { id } }", json!({ "id": id }), token)
            .await;
        let all = api.data("{ getAllBooks { id } }", json!({}), token).await;
        assert_eq!(all, json!({ "getAllBooks": [] }));
    }
}

// ============================================================================
// Subscriptions
// ============================================================================

mod subscriptions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_notification_changes_are_pushed() {
        let api = TestApi::new().await;
        let (token, _) = api.sign_up("pub@example.com", "pw").await;

        let mut stream = api
            .schema
            .execute_stream(Request::new("subscription { notificationChange { id title text } }"));
        // Poll once so the subscription registers with the broadcast channel
        assert!(stream.next().now_or_never().is_none());

        let added = api
            .data(
                r#"mutation { addNotification(title: "Hello", text: "World") { id createdAt updatedAt } }"#,
                json!({}),
                Some(&token),
            )
            .await;
        let id = added["addNotification"]["id"].clone();
        assert!(added["addNotification"]["createdAt"].is_i64());

        let pushed = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("subscription event")
            .expect("stream open");
        assert_eq!(
            pushed.data.into_json().unwrap(),
            json!({ "notificationChange": { "id": id, "title": "Hello", "text": "World" } })
        );

        api.data(
            "mutation($id: ID!) { deleteNotification(id: $id) { id } }",
            json!({ "id": id }),
            Some(&token),
        )
        .await;

        let pushed = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("subscription event")
            .expect("stream open");
        assert_eq!(pushed.data.into_json().unwrap()["notificationChange"]["id"], id);
    }

    #[tokio::test]
    async fn test_anonymous_cannot_publish() {
        let api = TestApi::new().await;
        let message = api
            .error(
                r#"mutation { addNotification(title: "x", text: "y") { id } }"#,
                json!({}),
                None,
            )
            .await;
        assert_eq!(message, "Not authenticated");
    }
}
