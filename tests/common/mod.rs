/**
 * Mock object-storage bucket for the fetcher tests.
 *
 * Serves a fixed map of `path -> bytes` and records every requested path.
 * Unknown paths answer 404.
 */
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

#[derive(Clone)]
pub struct MockBucket {
    files: Arc<HashMap<String, Vec<u8>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockBucket {
    /// Paths requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve_object(State(bucket): State<MockBucket>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    bucket.requests.lock().unwrap().push(path.clone());

    match bucket.files.get(&path) {
        Some(body) => (StatusCode::OK, body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "NoSuchKey").into_response(),
    }
}

/// Start a bucket on a random local port. Returns its base URL.
pub async fn start_bucket(files: HashMap<String, Vec<u8>>) -> (String, MockBucket) {
    let bucket = MockBucket {
        files: Arc::new(files),
        requests: Arc::default(),
    };

    let app = Router::new()
        .fallback(serve_object)
        .with_state(bucket.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), bucket)
}

/// A manifest with one weight group listing `shards`.
pub fn manifest_json(shards: &[&str]) -> Vec<u8> {
    let paths: Vec<String> = shards.iter().map(|s| format!("\"{}\"", s)).collect();
    format!(
        r#"{{"format":"layers-model","weightsManifest":[{{"paths":[{}],"weights":[]}}]}}"#,
        paths.join(",")
    )
    .into_bytes()
}
