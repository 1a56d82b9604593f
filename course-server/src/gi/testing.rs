//! In-process GI stub for exercising the client over real HTTP.
//!
//! Tests bind an axum server to an ephemeral port and point
//! `GiConfig::with_base_url` at it. Responses are scripted per endpoint
//! (search responses additionally keyed by the request's `countryCode`), and
//! every call is counted.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

pub const COURSE_GROUPS: &str = "searchCourseGroups";
pub const COURSES: &str = "searchCourses";

/// Calls observed by the stub, by endpoint.
#[derive(Debug, Default)]
pub struct StubCounters {
    pub auth: AtomicUsize,
    pub course_groups: AtomicUsize,
    pub courses: AtomicUsize,
    pub gps: AtomicUsize,
}

/// A canned (status, body) response, returned verbatim.
type Canned = (u16, String);

struct StubConfig {
    auth: Canned,
    gps: Canned,
    /// (endpoint path, countryCode) -> response; first match wins.
    search: Vec<(&'static str, String, Canned)>,
}

#[derive(Clone)]
struct StubState {
    counters: Arc<StubCounters>,
    config: Arc<StubConfig>,
}

/// Builder for a stub GI server with scripted responses.
pub struct StubBuilder {
    config: StubConfig,
}

impl StubBuilder {
    /// Stub that authenticates successfully and finds nothing.
    pub fn new() -> Self {
        Self {
            config: StubConfig {
                auth: (
                    200,
                    r#"{"access_token": "stub-token", "expires_in": 3600}"#.to_string(),
                ),
                gps: (200, "{}".to_string()),
                search: Vec::new(),
            },
        }
    }

    pub fn auth_response(mut self, status: u16, body: impl Into<String>) -> Self {
        self.config.auth = (status, body.into());
        self
    }

    pub fn gps_response(mut self, status: u16, body: impl Into<String>) -> Self {
        self.config.gps = (status, body.into());
        self
    }

    /// Script a search endpoint's response for requests carrying the given
    /// `countryCode` (use `""` for the unconstrained base body).
    pub fn search_response(
        mut self,
        endpoint: &'static str,
        country: &str,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.config
            .search
            .push((endpoint, country.to_string(), (status, body.into())));
        self
    }

    /// Bind to an ephemeral port and serve in the background.
    pub async fn spawn(self) -> GiStub {
        let counters = Arc::new(StubCounters::default());
        let state = StubState {
            counters: counters.clone(),
            config: Arc::new(self.config),
        };

        let app = Router::new()
            .route("/auth/authenticateToken", post(auth))
            .route("/courses/searchCourseGroups", post(course_groups))
            .route("/courses/searchCourses", post(courses))
            .route("/courses/getCourseGroupGPS", get(gps))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        GiStub {
            base_url: format!("http://{addr}"),
            counters,
        }
    }
}

/// Handle onto a running stub server.
pub struct GiStub {
    pub base_url: String,
    pub counters: Arc<StubCounters>,
}

impl GiStub {
    pub fn auth_calls(&self) -> usize {
        self.counters.auth.load(Ordering::SeqCst)
    }

    pub fn course_group_calls(&self) -> usize {
        self.counters.course_groups.load(Ordering::SeqCst)
    }

    pub fn course_calls(&self) -> usize {
        self.counters.courses.load(Ordering::SeqCst)
    }

    pub fn gps_calls(&self) -> usize {
        self.counters.gps.load(Ordering::SeqCst)
    }
}

fn respond((status, body): &Canned) -> Response {
    (StatusCode::from_u16(*status).unwrap(), body.clone()).into_response()
}

fn search_response(state: &StubState, endpoint: &str, body: &Value) -> Response {
    let country = body.get("countryCode").and_then(Value::as_str).unwrap_or("");
    for (path, scripted_country, canned) in &state.config.search {
        if *path == endpoint && scripted_country == country {
            return respond(canned);
        }
    }
    // Unscripted combinations find nothing.
    respond(&(200, r#"{"data": []}"#.to_string()))
}

async fn auth(State(state): State<StubState>) -> Response {
    state.counters.auth.fetch_add(1, Ordering::SeqCst);
    respond(&state.config.auth)
}

async fn course_groups(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.counters.course_groups.fetch_add(1, Ordering::SeqCst);
    search_response(&state, COURSE_GROUPS, &body)
}

async fn courses(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.counters.courses.fetch_add(1, Ordering::SeqCst);
    search_response(&state, COURSES, &body)
}

async fn gps(State(state): State<StubState>) -> Response {
    state.counters.gps.fetch_add(1, Ordering::SeqCst);
    respond(&state.config.gps)
}
