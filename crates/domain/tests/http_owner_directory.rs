//! Tests for the HTTP owner directory against a local user service.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use domain::{HttpOwnerDirectory, OwnerDirectory, OwnerId, OwnerLookupError, RetryPolicy};

#[derive(Clone)]
struct UserService {
    hits: Arc<AtomicUsize>,
    /// Status returned for every owner other than "alice".
    fallback: StatusCode,
    /// Delay before every response.
    delay: Duration,
}

async fn read_user(State(service): State<UserService>, Path(id): Path<String>) -> StatusCode {
    service.hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(service.delay).await;
    if id == "alice" {
        StatusCode::OK
    } else {
        service.fallback
    }
}

/// Serves `/users/{id}` on an ephemeral port and returns its base URL.
async fn spawn_user_service(fallback: StatusCode) -> (String, Arc<AtomicUsize>) {
    spawn_slow_user_service(fallback, Duration::ZERO).await
}

async fn spawn_slow_user_service(
    fallback: StatusCode,
    delay: Duration,
) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/users/{id}", get(read_user))
        .with_state(UserService {
            hits: hits.clone(),
            fallback,
            delay,
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), hits)
}

fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_backoff: Duration::from_millis(1),
    }
}

#[tokio::test]
async fn existing_owner_is_found() {
    let (base_url, hits) = spawn_user_service(StatusCode::NOT_FOUND).await;
    let directory =
        HttpOwnerDirectory::new(&base_url, Duration::from_secs(2), fast_retry(3)).unwrap();

    assert!(directory.exists(&OwnerId::new("alice")).await.unwrap());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn not_found_is_definitive_and_never_retried() {
    let (base_url, hits) = spawn_user_service(StatusCode::NOT_FOUND).await;
    let directory =
        HttpOwnerDirectory::new(&base_url, Duration::from_secs(2), fast_retry(3)).unwrap();

    assert!(!directory.exists(&OwnerId::new("ghost")).await.unwrap());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn other_client_errors_count_as_not_found() {
    let (base_url, hits) = spawn_user_service(StatusCode::BAD_REQUEST).await;
    let directory =
        HttpOwnerDirectory::new(&base_url, Duration::from_secs(2), fast_retry(3)).unwrap();

    assert!(!directory.exists(&OwnerId::new("ghost")).await.unwrap());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn server_errors_are_retried_then_reported() {
    let (base_url, hits) = spawn_user_service(StatusCode::INTERNAL_SERVER_ERROR).await;
    let directory =
        HttpOwnerDirectory::new(&base_url, Duration::from_secs(2), fast_retry(3)).unwrap();

    let result = directory.exists(&OwnerId::new("ghost")).await;

    assert!(matches!(result, Err(OwnerLookupError::Unavailable(_))));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn connection_refused_is_unavailable() {
    // Reserve a port, then close it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let directory = HttpOwnerDirectory::new(
        &format!("http://{addr}"),
        Duration::from_millis(500),
        fast_retry(2),
    )
    .unwrap();

    let result = directory.exists(&OwnerId::new("alice")).await;
    assert!(matches!(result, Err(OwnerLookupError::Unavailable(_))));
}

#[tokio::test]
async fn slow_responses_time_out_per_attempt() {
    let (base_url, hits) =
        spawn_slow_user_service(StatusCode::NOT_FOUND, Duration::from_secs(5)).await;
    let directory =
        HttpOwnerDirectory::new(&base_url, Duration::from_millis(200), fast_retry(2)).unwrap();

    let started = Instant::now();
    let result = directory.exists(&OwnerId::new("alice")).await;
    let elapsed = started.elapsed();

    assert!(matches!(result, Err(OwnerLookupError::Unavailable(_))));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert!(elapsed >= Duration::from_millis(400), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "elapsed {elapsed:?}");
}
