use std::io;
use std::sync::{Arc, Mutex};

use api::{ApiClient, ErrorKind, History, Session, SignInData};
use serde_json::{json, Value};
use store::{MemoryStore, SessionStore, StoreError};
use tracing::subscriber::DefaultGuard;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Shared buffer the fmt subscriber writes into.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn output(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route error events on this thread into a buffer until the guard drops.
fn capture() -> (Captured, DefaultGuard) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::ERROR)
        .finish();
    (captured, tracing::subscriber::set_default(subscriber))
}

/// Reads nothing and refuses every write.
#[derive(Clone)]
struct ReadOnlyStore;

impl SessionStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    async fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::InvalidKey(key.to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_http_failure_is_logged_with_request_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), Session::new(MemoryStore::new()), History::new()).unwrap();
    let (captured, _guard) = capture();

    let error = client.get::<Value>("/projects/9").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);

    let output = captured.output();
    assert!(output.contains("ERROR"), "{output}");
    assert!(output.contains("api request failed"), "{output}");
    assert!(output.contains("status=404"), "{output}");
    assert!(output.contains(&format!("error_message={}", error.user_message())), "{output}");
    assert!(output.contains(&format!("url={}/projects/9", server.uri())), "{output}");
    assert!(output.contains("method=GET"), "{output}");
    assert!(output.contains("error_data=\"gone\""), "{output}");
}

#[tokio::test]
async fn test_transport_failure_is_logged_without_status() {
    let client = ApiClient::new("http://127.0.0.1:1", Session::new(MemoryStore::new()), History::new()).unwrap();
    let (captured, _guard) = capture();

    let error = client.get::<Value>("/tasks").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Transport);

    let output = captured.output();
    assert!(output.contains("api request failed"), "{output}");
    assert!(!output.contains("status="), "{output}");
    assert!(output.contains("url=http://127.0.0.1:1/tasks"), "{output}");
    assert!(output.contains("method=GET"), "{output}");
    assert!(output.contains("error_message="), "{output}");
    assert!(output.contains("error_data="), "{output}");
}

#[tokio::test]
async fn test_session_save_failure_is_logged_like_a_request_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sign-in"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc",
            "id": 1,
            "name": "A",
            "email": "a@b.com"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), Session::new(ReadOnlyStore), History::new()).unwrap();
    let (captured, _guard) = capture();

    let error = client
        .sign_in(&SignInData {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Unexpected);

    let output = captured.output();
    assert!(output.contains("api request failed"), "{output}");
    assert!(output.contains(&format!("url={}/sign-in", server.uri())), "{output}");
    assert!(output.contains("method=POST"), "{output}");
    assert!(output.contains("error_message=Unexpected error in request"), "{output}");
    assert!(output.contains("invalid"), "{output}");
}
