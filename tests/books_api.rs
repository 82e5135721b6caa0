use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use bookshelf_kernel::settings::Settings;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    bookshelf_app::app::router(&Settings::default()).unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

async fn create(app: &Router, book: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(book)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["bookId"].as_str().unwrap().to_string()
}

fn full_book(name: &str, page_count: u32, read_page: u32, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

#[tokio::test]
async fn book_lifecycle_scenario() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"name": "Buku A", "pageCount": 100, "readPage": 100})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");
    let id = body["data"]["bookId"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 16);

    let (status, body) = send(&app, Method::GET, &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let book = &body["data"]["book"];
    assert_eq!(book["id"], id.as_str());
    assert_eq!(book["name"], "Buku A");
    assert_eq!(book["finished"], true);
    assert_eq!(book["insertedAt"], book["updatedAt"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{id}"),
        Some(json!({"name": "Buku A", "pageCount": 100, "readPage": 50})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Buku berhasil diperbarui");

    let (_, body) = send(&app, Method::GET, &format!("/books/{id}"), None).await;
    assert_eq!(body["data"]["book"]["finished"], false);
    assert_eq!(body["data"]["book"]["readPage"], 50);
    assert_eq!(body["data"]["book"]["insertedAt"], book["insertedAt"]);

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil dihapus");

    let (status, body) = send(&app, Method::GET, &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Buku tidak ditemukan");
}

#[tokio::test]
async fn create_without_name_is_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"pageCount": 10, "readPage": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"status": "fail", "message": "Gagal menambahkan buku. Mohon isi nama buku"})
    );

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn create_with_read_page_above_page_count_is_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"name": "Buku A", "pageCount": 10, "readPage": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );
}

#[tokio::test]
async fn malformed_body_gets_a_fail_envelope() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"name": "Buku A", "pageCount": -5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Gagal menambahkan buku. "));
}

#[tokio::test]
async fn year_keeps_whatever_number_was_sent() {
    let app = app();
    let mut book = full_book("Buku A", 10, 0, false);
    book["year"] = json!(1999.5);
    let id = create(&app, book).await;

    let (status, body) = send(&app, Method::GET, &format!("/books/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["book"]["year"], json!(1999.5));
}

#[tokio::test]
async fn list_returns_projections_in_insertion_order() {
    let app = app();
    let first = create(&app, full_book("Kelas Dicoding", 100, 100, false)).await;
    let second = create(&app, full_book("Rust untuk Pemula", 300, 20, true)).await;

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["data"]["books"],
        json!([
            {"id": first, "name": "Kelas Dicoding", "publisher": "Dicoding Indonesia"},
            {"id": second, "name": "Rust untuk Pemula", "publisher": "Dicoding Indonesia"},
        ])
    );
}

#[tokio::test]
async fn list_filters_combine() {
    let app = app();
    let finished = create(&app, full_book("Kelas Dicoding", 100, 100, false)).await;
    let reading = create(&app, full_book("Rust untuk Pemula", 300, 20, true)).await;
    let idle = create(&app, full_book("Belajar Dicoding Lanjut", 200, 10, false)).await;

    let ids = |body: &Value| -> Vec<String> {
        body["data"]["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|book| book["id"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, body) = send(&app, Method::GET, "/books?name=dicoding", None).await;
    assert_eq!(ids(&body), vec![finished.clone(), idle.clone()]);

    let (_, body) = send(&app, Method::GET, "/books?reading=1", None).await;
    assert_eq!(ids(&body), vec![reading.clone()]);

    let (_, body) = send(&app, Method::GET, "/books?reading=0", None).await;
    assert_eq!(ids(&body), vec![finished.clone(), idle.clone()]);

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(ids(&body), vec![finished.clone()]);

    let (_, body) = send(&app, Method::GET, "/books?name=DICODING&finished=0", None).await;
    assert_eq!(ids(&body), vec![idle]);

    let (status, body) = send(&app, Method::GET, "/books?name=python", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ids(&body).is_empty());
}

#[tokio::test]
async fn list_tolerates_repeated_query_keys() {
    let app = app();
    let reading = create(&app, full_book("Rust untuk Pemula", 300, 20, true)).await;
    create(&app, full_book("Kelas Dicoding", 100, 100, false)).await;

    let (status, body) = send(&app, Method::GET, "/books?reading=1&reading=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], reading.as_str());

    let (status, body) = send(&app, Method::GET, "/books?name=zzz&name=rust", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn update_and_delete_unknown_ids() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/xxxxx",
        Some(json!({"pageCount": 1, "readPage": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Gagal memperbarui buku. Id tidak ditemukan");

    let (status, body) = send(&app, Method::DELETE, "/books/xxxxx", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");
}

#[tokio::test]
async fn update_validation_failures() {
    let app = app();
    let id = create(&app, full_book("Buku A", 100, 10, true)).await;
    let uri = format!("/books/{id}");

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"pageCount": 100}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Gagal memperbarui buku. Mohon isi nama buku");

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"name": "Buku A", "pageCount": 10, "readPage": 11})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let (_, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(body["data"]["book"]["readPage"], 10);
    assert_eq!(body["data"]["book"]["reading"], true);
}

#[tokio::test]
async fn health_and_docs_are_served() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));

    let (status, body) = send(&app, Method::GET, "/books/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("books module is healthy".to_string()));

    let (status, body) = send(&app, Method::GET, "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books"]["post"].is_object());
    assert!(body["paths"]["/books/{id}"]["delete"].is_object());
}
