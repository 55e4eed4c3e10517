use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

use httpmock::MockServer;
use reqwest::Url;
use serde_json::json;

use postboard::application::store::{EditingTarget, Notice};
use postboard::{BackendError, HttpBackend, PostStore, PostsBackend, StoreError};

const POST_A: &str = r#"{"id":1,"title":"A","content":"x","created_at":"2024-03-01T12:00:00Z","updated_at":"2024-03-01T12:00:00Z"}"#;
const POST_B: &str = r#"{"id":1,"title":"B","content":"x","created_at":"2024-03-01T12:00:00Z","updated_at":"2024-03-02T09:15:00Z"}"#;

fn backend(server: &MockServer) -> HttpBackend {
    let base = Url::parse(&server.url("/api/")).expect("base url");
    HttpBackend::new(&base).expect("backend")
}

fn store(server: &MockServer) -> PostStore {
    PostStore::new(Arc::new(backend(server)))
}

#[tokio::test]
async fn list_keeps_server_order() -> Result<(), BackendError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/api/posts/");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{POST_B},{}]", POST_A.replace("\"id\":1", "\"id\":2")));
    });

    let posts = backend(&server).list_posts().await?;

    mock.assert();
    let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(posts[0].title, "B");
    Ok(())
}

#[tokio::test]
async fn create_sends_trimmed_fields_then_refreshes() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST")
            .path("/api/posts/")
            .json_body(json!({ "title": "A", "content": "x" }));
        then.status(201)
            .header("content-type", "application/json")
            .body(POST_A);
    });
    let list = server.mock(|when, then| {
        when.method("GET").path("/api/posts/");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{POST_A}]"));
    });

    let store = store(&server);
    let created = store.create("  A ", "x\n").await.expect("create");

    create.assert();
    list.assert();
    let view = store.view();
    assert_eq!(created.id, 1);
    assert_eq!(view.posts.len(), 1);
    assert_eq!(view.posts[0].title, "A");
    assert_eq!(view.notice, Some(Notice::Created(1)));
}

#[tokio::test]
async fn update_scenario_over_http() {
    let server = MockServer::start();
    let mut list = server.mock(|when, then| {
        when.method("GET").path("/api/posts/");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{POST_A}]"));
    });

    let store = store(&server);
    store.load().await.expect("initial load");
    store.begin_edit(1).expect("begin edit");
    list.assert();
    list.delete();

    let update = server.mock(|when, then| {
        when.method("PUT")
            .path("/api/posts/1/")
            .json_body(json!({ "title": "B", "content": "x" }));
        then.status(200)
            .header("content-type", "application/json")
            .body(POST_B);
    });
    list = server.mock(|when, then| {
        when.method("GET").path("/api/posts/");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{POST_B}]"));
    });

    store.update(1, "B", "x").await.expect("update");

    update.assert();
    list.assert();
    let view = store.view();
    assert_eq!(view.post(1).map(|p| p.title.as_str()), Some("B"));
    assert_eq!(view.editing, EditingTarget::None);
    assert!(view.error.is_none());
}

#[tokio::test]
async fn delete_404_keeps_list_and_reports_body() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method("GET").path("/api/posts/");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!("[{}]", POST_A.replace("\"id\":1", "\"id\":5")));
    });
    let delete = server.mock(|when, then| {
        when.method("DELETE").path("/api/posts/5/");
        then.status(404).body("not found");
    });

    let store = store(&server);
    store.load().await.expect("load");
    let err = store.delete(5).await.expect_err("404");

    list.assert();
    delete.assert();
    let view = store.view();
    assert_eq!(
        err,
        StoreError::Api {
            status: 404,
            body: "not found".into()
        }
    );
    assert_eq!(view.error, Some(err));
    assert!(view.post(5).is_some());
    assert!(!view.is_deleting(5));
}

#[tokio::test]
async fn delete_accepts_empty_success_body() -> Result<(), BackendError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("DELETE").path("/api/posts/3/");
        then.status(204);
    });

    backend(&server).delete_post(3).await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn plain_text_success_is_a_decode_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/api/posts/");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body("<html>maintenance</html>");
    });

    let err = backend(&server).list_posts().await.expect_err("not json");

    mock.assert();
    assert!(matches!(err, BackendError::Decode(ref msg) if msg.contains("maintenance")));
}

#[tokio::test]
async fn server_error_body_is_preserved_verbatim() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/api/posts/");
        then.status(400)
            .header("content-type", "application/json")
            .body(r#"{"title":["Ensure this field has no more than 200 characters."]}"#);
    });

    let store = store(&server);
    store.open_compose();
    let err = store.create("t", "c").await.expect_err("rejected");

    assert_eq!(err.status(), Some(400));
    assert!(matches!(
        &err,
        StoreError::Api { body, .. } if body.contains("no more than 200")
    ));
    assert!(store.view().composing);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let base = Url::parse("http://127.0.0.1:9/api/").expect("url");
    let store = PostStore::new(Arc::new(HttpBackend::new(&base).expect("backend")));

    let err = store.load().await.expect_err("nothing listens on port 9");

    assert!(matches!(err, StoreError::Network(_)));
    assert!(err.is_retryable());
    assert!(store.view().posts.is_empty());
}

#[tokio::test]
async fn truncated_error_body_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let server = thread::spawn(move || {
        let (mut socket, _) = listener.accept().expect("accept");
        let mut request = [0u8; 2048];
        let _ = socket.read(&mut request);
        socket
            .write_all(b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 100\r\n\r\nshort")
            .expect("write response");
    });

    let base = Url::parse(&format!("http://{addr}/api/")).expect("url");
    let err = HttpBackend::new(&base)
        .expect("backend")
        .list_posts()
        .await
        .expect_err("connection closes mid-body");
    server.join().expect("server thread");

    assert!(matches!(err, BackendError::Network(_)), "got {err:?}");
}
