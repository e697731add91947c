//! In-process stand-in for the employee directory service.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use shared::domain::Employee;
use tokio::{
    net::TcpListener,
    sync::{Mutex, Notify},
};

pub(crate) const EMPLOYEES_ROUTE: &str = "/api/employees";

#[derive(Clone)]
pub(crate) enum Reply {
    Fixed { status: StatusCode, body: String },
    BasicAuth { expected: String, records: Vec<Employee> },
}

impl Reply {
    pub(crate) fn ok_json(body: impl Into<String>) -> Self {
        Reply::Fixed {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    pub(crate) fn status(status: StatusCode) -> Self {
        Reply::Fixed {
            status,
            body: r#"{"detail":"Incorrect email or password"}"#.to_string(),
        }
    }

    /// Accepts only `username:password`, answering 401 otherwise.
    pub(crate) fn basic_auth(username: &str, password: &str, records: Vec<Employee>) -> Self {
        use base64::{engine::general_purpose::STANDARD, Engine as _};
        Reply::BasicAuth {
            expected: format!("Basic {}", STANDARD.encode(format!("{username}:{password}"))),
            records,
        }
    }
}

#[derive(Clone)]
struct FixtureState {
    reply: Reply,
    hold: bool,
    requests: Arc<Mutex<Vec<HeaderMap>>>,
    release: Arc<Notify>,
}

pub(crate) struct DirectoryServer {
    pub(crate) base_url: String,
    pub(crate) requests: Arc<Mutex<Vec<HeaderMap>>>,
    release: Arc<Notify>,
}

impl DirectoryServer {
    pub(crate) async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// Lets one held request complete.
    pub(crate) fn release_one(&self) {
        self.release.notify_one();
    }
}

async fn list_employees(
    State(state): State<FixtureState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().await.push(headers);
    if state.hold {
        state.release.notified().await;
    }

    let (status, body) = match state.reply {
        Reply::Fixed { status, body } => (status, body),
        Reply::BasicAuth { expected, records } => {
            if authorization.as_deref() == Some(expected.as_str()) {
                (
                    StatusCode::OK,
                    serde_json::to_string(&records).unwrap_or_default(),
                )
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    r#"{"detail":"Incorrect email or password"}"#.to_string(),
                )
            }
        }
    };
    (status, [(CONTENT_TYPE, "application/json")], body)
}

pub(crate) async fn spawn_directory_server(reply: Reply) -> DirectoryServer {
    spawn_with(reply, false).await
}

/// Every request waits for `release_one` before it is answered.
pub(crate) async fn spawn_held_directory_server(reply: Reply) -> DirectoryServer {
    spawn_with(reply, true).await
}

async fn spawn_with(reply: Reply, hold: bool) -> DirectoryServer {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let requests = Arc::new(Mutex::new(Vec::new()));
    let release = Arc::new(Notify::new());
    let state = FixtureState {
        reply,
        hold,
        requests: requests.clone(),
        release: release.clone(),
    };
    let app = Router::new()
        .route(EMPLOYEES_ROUTE, get(list_employees))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    DirectoryServer {
        base_url: format!("http://{addr}/api"),
        requests,
        release,
    }
}

/// A base url on a port nobody listens on.
pub(crate) async fn unreachable_base_url() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/api")
}

pub(crate) fn sample_directory() -> Vec<Employee> {
    vec![
        Employee::new(1, "山田 太郎", "開発部", "taro@example.com"),
        Employee::new(2, "鈴木 花子", "営業部", "hanako@example.com"),
        Employee::new(3, "佐藤 次郎", "人事部", "jiro@example.com"),
    ]
}

pub(crate) async fn wait_for_requests(server: &DirectoryServer, count: usize) {
    for _ in 0..500 {
        if server.request_count().await >= count {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("directory server never saw {count} request(s)");
}
