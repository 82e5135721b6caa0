//! HTTP handlers for `/books`.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookshelf_http::{ApiResponse, AppError};
use serde::Serialize;

use super::filter::{BookFilter, ListQuery};
use super::models::{Book, BookPayload, BookSummary};
use super::store::{SharedStore, StoreError};

/// Operation a failure happened in; it decides the wording of the message.
#[derive(Debug, Clone, Copy)]
enum Action {
    Create,
    Get,
    Update,
    Delete,
}

impl Action {
    fn failure_prefix(self) -> &'static str {
        match self {
            Action::Create => "Gagal menambahkan buku",
            Action::Get => "Buku tidak ditemukan",
            Action::Update => "Gagal memperbarui buku",
            Action::Delete => "Buku gagal dihapus",
        }
    }

    fn reject(self, err: StoreError) -> AppError {
        let prefix = self.failure_prefix();
        match err {
            StoreError::MissingName => {
                AppError::validation(format!("{prefix}. Mohon isi nama buku"))
            }
            StoreError::InvalidPageRange { .. } => AppError::validation(format!(
                "{prefix}. readPage tidak boleh lebih besar dari pageCount"
            )),
            StoreError::NotFound(_) => match self {
                Action::Get => AppError::not_found(prefix),
                _ => AppError::not_found(format!("{prefix}. Id tidak ditemukan")),
            },
            StoreError::InternalFailure(_) => {
                AppError::internal("Buku gagal ditambahkan", anyhow::Error::new(err))
            }
        }
    }

    fn decode(
        self,
        payload: Result<Json<BookPayload>, JsonRejection>,
    ) -> Result<BookPayload, AppError> {
        payload.map(|Json(payload)| payload).map_err(|rejection| {
            AppError::bad_request(format!(
                "{}. {}",
                self.failure_prefix(),
                rejection.body_text()
            ))
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedBook {
    book_id: String,
}

#[derive(Debug, Serialize)]
struct BookList {
    books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
struct BookDetail {
    book: Book,
}

/// Routes mounted under `/books`
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/health", get(health_check))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(store)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn create_book(
    State(store): State<SharedStore>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse<CreatedBook>, AppError> {
    let payload = Action::Create.decode(payload)?;
    let book_id = store
        .write()
        .await
        .create(payload)
        .map_err(|err| Action::Create.reject(err))?;

    Ok(ApiResponse::data(StatusCode::CREATED, CreatedBook { book_id })
        .with_message("Buku berhasil ditambahkan"))
}

async fn list_books(
    State(store): State<SharedStore>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResponse<BookList> {
    let filter = BookFilter::from(pairs.into_iter().collect::<ListQuery>());
    let books = store.read().await.list(&filter);

    ApiResponse::data(StatusCode::OK, BookList { books })
}

async fn get_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<ApiResponse<BookDetail>, AppError> {
    let book = store
        .read()
        .await
        .get(&id)
        .cloned()
        .map_err(|err| Action::Get.reject(err))?;

    Ok(ApiResponse::data(StatusCode::OK, BookDetail { book }))
}

async fn update_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse, AppError> {
    let mut store = store.write().await;

    // Unknown ids answer 404 even when the body is unreadable.
    if let Err(err) = store.get(&id) {
        return Err(Action::Update.reject(err));
    }

    let payload = Action::Update.decode(payload)?;
    store
        .update(&id, payload)
        .map_err(|err| Action::Update.reject(err))?;

    Ok(ApiResponse::message(StatusCode::OK, "Buku berhasil diperbarui"))
}

async fn delete_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<ApiResponse, AppError> {
    store
        .write()
        .await
        .delete(&id)
        .map_err(|err| Action::Delete.reject(err))?;

    Ok(ApiResponse::message(StatusCode::OK, "Buku berhasil dihapus"))
}
