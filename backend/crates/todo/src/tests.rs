//! Router-level tests for the todo crate
//!
//! Drive the full HTTP surface against the in-memory store, including
//! the bearer-token middleware.

mod router_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::infra::memory::MemoryTodoStore;
    use crate::presentation::router::todo_router_generic;
    use kernel::id::UserId;
    use platform::token::{TokenConfig, issue_token};

    fn setup() -> (Router, MemoryTodoStore, TokenConfig) {
        let store = MemoryTodoStore::new();
        let config = TokenConfig::development();
        let router = todo_router_generic(store.clone(), config.clone());
        (router, store, config)
    }

    fn bearer(config: &TokenConfig, user_id: i64) -> String {
        let token = issue_token(config, &user_id.to_string(), "tester");
        format!("Bearer {token}")
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        auth: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }

    #[tokio::test]
    async fn test_missing_or_bad_token_is_unauthorized() {
        let (router, _store, config) = setup();

        let (status, _) = send(&router, Method::GET, "/lists", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &router,
            Method::GET,
            "/lists",
            Some("Bearer garbage"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // Token signed with a different key
        let other = TokenConfig::new("different-key", config.issuer.clone(), config.ttl);
        let (status, _) = send(
            &router,
            Method::GET,
            "/lists",
            Some(&bearer(&other, 1)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_crud_flow() {
        let (router, store, config) = setup();
        store.add_user(UserId::from_i64(1));
        let auth = bearer(&config, 1);

        let (status, created) = send(
            &router,
            Method::POST,
            "/lists",
            Some(&auth),
            Some(json!({"name": "Groceries"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Groceries");
        let list_id = created["id"].as_i64().unwrap();

        let (status, fetched) = send(
            &router,
            Method::GET,
            &format!("/lists/{list_id}"),
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Groceries");
        assert_eq!(fetched["items"], json!([]));

        // Empty update body keeps the current name
        let (status, updated) = send(
            &router,
            Method::PUT,
            &format!("/lists/{list_id}"),
            Some(&auth),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Groceries");

        let (status, renamed) = send(
            &router,
            Method::PUT,
            &format!("/lists/{list_id}"),
            Some(&auth),
            Some(json!({"name": "Weekly Groceries"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(renamed["name"], "Weekly Groceries");

        let (status, _) = send(
            &router,
            Method::DELETE,
            &format!("/lists/{list_id}"),
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &router,
            Method::GET,
            &format!("/lists/{list_id}"),
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_list_name_is_bad_request() {
        let (router, store, config) = setup();
        store.add_user(UserId::from_i64(1));
        let auth = bearer(&config, 1);

        let (status, _) = send(
            &router,
            Method::POST,
            "/lists",
            Some(&auth),
            Some(json!({"name": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_foreign_list_reads_as_not_found() {
        let (router, store, config) = setup();
        store.add_user(UserId::from_i64(1));
        store.add_user(UserId::from_i64(2));

        let (_, created) = send(
            &router,
            Method::POST,
            "/lists",
            Some(&bearer(&config, 1)),
            Some(json!({"name": "Private"})),
        )
        .await;
        let list_id = created["id"].as_i64().unwrap();

        // Another authenticated user gets 404, not 403
        let intruder = bearer(&config, 2);
        let (status, _) = send(
            &router,
            Method::GET,
            &format!("/lists/{list_id}"),
            Some(&intruder),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &router,
            Method::DELETE,
            &format!("/lists/{list_id}"),
            Some(&intruder),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_listing_with_search_and_paging() {
        let (router, store, config) = setup();
        store.add_user(UserId::from_i64(1));
        let auth = bearer(&config, 1);

        for name in ["Groceries", "Chores", "Reading"] {
            let (status, _) = send(
                &router,
                Method::POST,
                "/lists",
                Some(&auth),
                Some(json!({"name": name})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, page) = send(&router, Method::GET, "/lists", Some(&auth), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 3);
        assert_eq!(page["startIndex"], 0);
        assert_eq!(page["pageContent"].as_array().unwrap().len(), 3);

        // total keeps counting past the page window
        let (_, page) = send(
            &router,
            Method::GET,
            "/lists?skip=1&take=1",
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(page["total"], 3);
        assert_eq!(page["startIndex"], 1);
        assert_eq!(page["pageContent"].as_array().unwrap().len(), 1);
        assert_eq!(page["pageContent"][0]["name"], "Chores");

        let (_, page) = send(
            &router,
            Method::GET,
            "/lists?search=read",
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(page["total"], 1);
        assert_eq!(page["pageContent"][0]["name"], "Reading");
    }

    #[tokio::test]
    async fn test_label_create_is_reuse_over_http() {
        let (router, store, config) = setup();
        store.add_user(UserId::from_i64(1));
        let auth = bearer(&config, 1);

        let (_, created) = send(
            &router,
            Method::POST,
            "/lists",
            Some(&auth),
            Some(json!({"name": "Chores"})),
        )
        .await;
        let list_id = created["id"].as_i64().unwrap();

        let labels_uri = format!("/lists/{list_id}/labels");
        let (status, first) = send(
            &router,
            Method::POST,
            &labels_uri,
            Some(&auth),
            Some(json!({"name": "urgent"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, second) = send(
            &router,
            Method::POST,
            &labels_uri,
            Some(&auth),
            Some(json!({"name": "urgent"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first["id"], second["id"]);

        let (_, labels) = send(&router, Method::GET, &labels_uri, Some(&auth), None).await;
        assert_eq!(labels.as_array().unwrap().len(), 1);

        // A search hit through the label name
        let (_, page) = send(
            &router,
            Method::GET,
            "/lists?search=URGENT",
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(page["total"], 1);
    }

    #[tokio::test]
    async fn test_label_rename_and_delete_by_name() {
        let (router, store, config) = setup();
        store.add_user(UserId::from_i64(1));
        let auth = bearer(&config, 1);

        let (_, created) = send(
            &router,
            Method::POST,
            "/lists",
            Some(&auth),
            Some(json!({"name": "Chores"})),
        )
        .await;
        let list_id = created["id"].as_i64().unwrap();

        send(
            &router,
            Method::POST,
            &format!("/lists/{list_id}/labels"),
            Some(&auth),
            Some(json!({"name": "urgent"})),
        )
        .await;
        send(
            &router,
            Method::POST,
            &format!("/lists/{list_id}/labels"),
            Some(&auth),
            Some(json!({"name": "someday"})),
        )
        .await;

        // Renaming onto a sibling's name would break name uniqueness
        let (status, _) = send(
            &router,
            Method::PUT,
            &format!("/lists/{list_id}/labels/urgent"),
            Some(&auth),
            Some(json!({"newName": "someday"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        // Exact-name addressing, so the wrong case misses
        let (status, _) = send(
            &router,
            Method::PUT,
            &format!("/lists/{list_id}/labels/URGENT"),
            Some(&auth),
            Some(json!({"newName": "later"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, renamed) = send(
            &router,
            Method::PUT,
            &format!("/lists/{list_id}/labels/urgent"),
            Some(&auth),
            Some(json!({"newName": "later"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(renamed["name"], "later");

        let (status, _) = send(
            &router,
            Method::DELETE,
            &format!("/lists/{list_id}/labels/later"),
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_item_flow_with_labels() {
        let (router, store, config) = setup();
        store.add_user(UserId::from_i64(1));
        let auth = bearer(&config, 1);

        let (_, created) = send(
            &router,
            Method::POST,
            "/lists",
            Some(&auth),
            Some(json!({"name": "Chores"})),
        )
        .await;
        let list_id = created["id"].as_i64().unwrap();

        let (status, item) = send(
            &router,
            Method::POST,
            &format!("/lists/{list_id}/items"),
            Some(&auth),
            Some(json!({"description": "vacuum"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let item_id = item["id"].as_i64().unwrap();

        let (status, updated) = send(
            &router,
            Method::PUT,
            &format!("/lists/{list_id}/items/{item_id}"),
            Some(&auth),
            Some(json!({"description": "vacuum upstairs"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["description"], "vacuum upstairs");

        let (status, label) = send(
            &router,
            Method::POST,
            &format!("/lists/{list_id}/items/{item_id}/labels"),
            Some(&auth),
            Some(json!({"name": "weekly"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(label["name"], "weekly");

        // The single-list read returns the full aggregate
        let (_, full) = send(
            &router,
            Method::GET,
            &format!("/lists/{list_id}"),
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(full["items"][0]["labels"][0]["name"], "weekly");

        let (status, _) = send(
            &router,
            Method::DELETE,
            &format!("/lists/{list_id}/items/{item_id}"),
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &router,
            Method::GET,
            &format!("/lists/{list_id}/items/{item_id}"),
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_user_token_is_not_found() {
        let (router, _store, config) = setup();

        // A validly signed token for an id with no account row
        let (status, _) = send(&router, Method::GET, "/lists", Some(&bearer(&config, 9)), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
