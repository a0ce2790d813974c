#![allow(dead_code)]

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::State,
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{head, post},
};
use serde_json::{Value, json};
use std::{
    fs,
    path::PathBuf,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::{net::TcpListener, sync::Mutex};
use tower::ServiceExt;

use outreach_desk::config::Config;

pub const KEY: &str = "test-key";
pub const SHEETS_TOKEN: &str = "ya29.test-token";
pub const REFRESH_TOKEN: &str = "refresh-abc";
/// A lead or draft with this email makes the fake workflow answer 500.
pub const FAILING_EMAIL: &str = "fail@x.io";

/// Every request body the fake upstream received, tagged by route.
#[derive(Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<(String, Value)>>>);

impl Recorded {
    async fn push(&self, route: &str, body: Value) {
        self.0.lock().await.push((route.to_string(), body));
    }

    pub async fn bodies(&self, route: &str) -> Vec<Value> {
        self.0
            .lock()
            .await
            .iter()
            .filter(|(r, _)| r == route)
            .map(|(_, b)| b.clone())
            .collect()
    }
}

pub struct TestApp {
    pub app: Router,
    pub upstream: Recorded,
    pub upstream_url: String,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
    }
}

fn temp_db_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "outreach-{tag}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    path
}

async fn generate_emails(State(rec): State<Recorded>, Json(body): Json<Value>) -> Response {
    rec.push("generate-emails", body.clone()).await;
    if body["leads"][0]["email"] == FAILING_EMAIL {
        return (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded").into_response();
    }
    let leads = body["leads"].as_array().cloned().unwrap_or_default();
    // one lead comes back as a bare object, several as an array
    let drafts: Vec<Value> = leads
        .iter()
        .map(|l| {
            json!({
                "recipient_email": l["email"],
                "first_name": l["firstname"],
                "lastName": l["lastname"],
                "subject": "Hello",
                "content": format!("Hi {}", l["firstname"].as_str().unwrap_or_default()),
            })
        })
        .collect();
    if drafts.len() == 1 {
        Json(drafts[0].clone()).into_response()
    } else {
        Json(Value::Array(drafts)).into_response()
    }
}

async fn send_email(State(rec): State<Recorded>, Json(body): Json<Value>) -> Response {
    rec.push("send-email", body.clone()).await;
    if body["emails"][0]["email"] == FAILING_EMAIL {
        return (StatusCode::BAD_GATEWAY, "smtp relay down").into_response();
    }
    Json(json!({"status": "queued"})).into_response()
}

/// Refresh-token grant; the form body is recorded as a string.
async fn token(State(rec): State<Recorded>, body: String) -> Response {
    let granted = body.contains("grant_type=refresh_token")
        && body.contains(&format!("refresh_token={REFRESH_TOKEN}"));
    rec.push("token", Value::String(body)).await;
    if !granted {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant"})),
        )
            .into_response();
    }
    Json(json!({
        "access_token": SHEETS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3599
    }))
    .into_response()
}

async fn token_garbled() -> Response {
    (
        [(header::CONTENT_TYPE, "application/json")],
        "not json at all",
    )
        .into_response()
}

async fn generate_connections(State(rec): State<Recorded>, Json(body): Json<Value>) -> Response {
    rec.push("generate-connections", body.clone()).await;
    if body["connections"][0]["companyName"] == "fail" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "search quota exhausted").into_response();
    }
    Json(json!([
        {"firstName": "Ana", "lastName": "Ruiz", "linkedin": "https://linkedin.com/in/ana"},
        {"first_name": "Ben", "last_name": "Ode", "profile_url": "https://linkedin.com/in/ben"}
    ]))
    .into_response()
}

async fn sheets_append(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {SHEETS_TOKEN}")[..]);
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let rows = body["values"].as_array().map(Vec::len).unwrap_or(0);
    rec.push("sheets", body).await;
    Json(json!({
        "spreadsheetId": "sheet-1",
        "updates": {"updatedRange": "sheet1!A1:E2", "updatedRows": rows}
    }))
    .into_response()
}

/// Local stand-in for the workflow webhooks, the file host and the Sheets API.
async fn spawn_upstream(rec: Recorded) -> String {
    let app = Router::new()
        .route("/webhook/generate-emails", post(generate_emails))
        .route("/webhook/send-email", post(send_email))
        .route("/webhook/generate-connections", post(generate_connections))
        .route("/files/present.pdf", head(|| async { StatusCode::OK }))
        .route("/sheets/{*rest}", post(sheets_append))
        .route("/token", post(token))
        .route("/token-garbled", post(token_garbled))
        .with_state(rec);
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("upstream server");
    });
    format!("http://{addr}")
}

pub async fn spawn_app(tag: &str) -> TestApp {
    spawn_app_with(tag, |_| {}).await
}

pub async fn spawn_app_with(tag: &str, tweak: impl FnOnce(&mut Config)) -> TestApp {
    spawn_app_with_upstream(tag, |cfg, _| tweak(cfg)).await
}

/// Like `spawn_app_with`, but the tweak also sees the fake upstream's base URL.
pub async fn spawn_app_with_upstream(
    tag: &str,
    tweak: impl FnOnce(&mut Config, &str),
) -> TestApp {
    let upstream = Recorded::default();
    let base = spawn_upstream(upstream.clone()).await;

    let db_path = temp_db_path(tag);
    let mut cfg = Config::default();
    cfg.basic.api_key = KEY.to_string();
    cfg.basic.database_url = format!("sqlite:{}", db_path.display());
    cfg.workflow.generate_emails_url =
        Some(format!("{base}/webhook/generate-emails").parse().expect("url"));
    cfg.workflow.send_emails_url = Some(format!("{base}/webhook/send-email").parse().expect("url"));
    cfg.workflow.generate_connections_url = Some(
        format!("{base}/webhook/generate-connections")
            .parse()
            .expect("url"),
    );
    cfg.sheets.spreadsheet_id = Some("sheet-1".to_string());
    cfg.sheets.api_base = format!("{base}/sheets");
    cfg.sheets.access_token = Some(SHEETS_TOKEN.to_string());
    tweak(&mut cfg, &base);

    let storage = outreach_desk::db::connect(&cfg.basic.database_url)
        .await
        .expect("open database");
    let state = outreach_desk::OutreachState::new(storage, &cfg).expect("build state");
    let app = outreach_desk::outreach_router(state, cfg.basic.body_limit);

    TestApp {
        app,
        upstream,
        upstream_url: base,
        db_path,
    }
}

impl TestApp {
    /// Send a request as `user` with the service key; returns status and JSON body.
    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {KEY}"))
            .header("x-user-email", "me@example.com");
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");
        self.send(req).await
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.app.clone().oneshot(req).await.expect("request failed");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }
}
