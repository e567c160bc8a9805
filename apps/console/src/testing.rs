//! In-memory stand-in for the recruiting backend, plus a `Ui` that records
//! what it was asked to show.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    extract::{Multipart, Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::ui::{ToastKind, Ui};

#[derive(Default)]
struct Store {
    next_id: HashMap<&'static str, i64>,
    candidates: BTreeMap<i64, Value>,
    jobs: BTreeMap<i64, Value>,
    applications: BTreeMap<i64, Value>,
    uploads: HashMap<i64, Vec<u8>>,
    failing: HashSet<String>,
}

impl Store {
    fn allocate(&mut self, collection: &'static str) -> i64 {
        let next = self.next_id.entry(collection).or_insert(0);
        *next += 1;
        *next
    }

    fn table(&mut self, collection: &str) -> Option<&mut BTreeMap<i64, Value>> {
        match collection {
            "candidates" => Some(&mut self.candidates),
            "jobs" => Some(&mut self.jobs),
            "applications" => Some(&mut self.applications),
            _ => None,
        }
    }

    /// Update responses carry nested candidate and job records; list and
    /// get return bare ids.
    fn expand(&self, application: &Value) -> Value {
        let mut out = application.clone();
        let candidate_id = application["candidate_id"].as_i64().unwrap_or_default();
        let job_id = application["job_id"].as_i64().unwrap_or_default();
        if let Some(c) = self.candidates.get(&candidate_id) {
            out["candidate"] = c.clone();
        }
        if let Some(j) = self.jobs.get(&job_id) {
            out["job"] = j.clone();
        }
        out
    }
}

#[derive(Clone, Default)]
struct MockState {
    store: Arc<Mutex<Store>>,
    requests: Arc<AtomicUsize>,
}

pub struct MockBackend {
    pub base_url: String,
    state: MockState,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        let mut app = Router::new();
        for collection in COLLECTIONS {
            app = collection_routes(app, collection);
        }
        let app = app
            .route("/candidates/:id/upload_resume/", post(upload))
            .layer(middleware::from_fn_with_state(state.clone(), gate))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    /// Every later request under `/<collection>/` answers 500.
    pub async fn fail_collection(&self, collection: &str) {
        self.store().failing.insert(collection.to_string());
    }

    pub async fn uploaded(&self, candidate_id: i64) -> Option<Vec<u8>> {
        self.store().uploads.get(&candidate_id).cloned()
    }

    pub async fn seed_candidate(&self, name: &str, email: &str, phone: &str) -> i64 {
        self.seed(
            "candidates",
            json!({"name": name, "email": email, "phone": phone, "resume_path": null}),
        )
    }

    pub async fn seed_job(&self, title: &str, description: &str, location: &str) -> i64 {
        self.seed(
            "jobs",
            json!({"title": title, "description": description, "location": location}),
        )
    }

    pub async fn seed_application(&self, candidate_id: i64, job_id: i64) -> i64 {
        self.seed(
            "applications",
            json!({
                "candidate_id": candidate_id,
                "job_id": job_id,
                "applied_at": "2025-01-02T10:00:00"
            }),
        )
    }

    fn seed(&self, collection: &'static str, mut record: Value) -> i64 {
        let mut store = self.store();
        let id = store.allocate(collection);
        record["id"] = json!(id);
        if let Some(table) = store.table(collection) {
            table.insert(id, record);
        }
        id
    }

    fn store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.state.store.lock().unwrap()
    }
}

async fn gate(State(state): State<MockState>, request: Request, next: Next) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let collection = request
        .uri()
        .path()
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string();
    let failing = state.store.lock().unwrap().failing.contains(&collection);
    if failing {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    next.run(request).await
}

fn not_found(collection: &str) -> Response {
    let label = match collection {
        "candidates" => "Candidate",
        "jobs" => "Job",
        _ => "Application",
    };
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": format!("{label} not found")})),
    )
        .into_response()
}

const COLLECTIONS: [&str; 3] = ["candidates", "jobs", "applications"];

fn collection_routes(router: Router<MockState>, collection: &'static str) -> Router<MockState> {
    router
        .route(
            &format!("/{collection}/"),
            get(move |state: State<MockState>| list(state, collection)).post(
                move |state: State<MockState>, Json(body): Json<Value>| {
                    create(state, collection, body)
                },
            ),
        )
        .route(
            &format!("/{collection}/:id"),
            get(move |state: State<MockState>, Path(id): Path<i64>| fetch(state, collection, id))
                .put(
                    move |state: State<MockState>,
                          Path(id): Path<i64>,
                          Json(body): Json<Value>| {
                        update(state, collection, id, body)
                    },
                )
                .delete(move |state: State<MockState>, Path(id): Path<i64>| {
                    remove(state, collection, id)
                }),
        )
}

/// Mimics server-side normalisation so tests can tell server state apart
/// from what the form sent.
fn normalise(collection: &str, mut body: Value) -> Value {
    if collection == "candidates" {
        if let Some(email) = body["email"].as_str() {
            body["email"] = json!(email.to_lowercase());
        }
    }
    body
}

async fn list(State(state): State<MockState>, collection: &'static str) -> Response {
    let mut store = state.store.lock().unwrap();
    let Some(table) = store.table(collection) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let records: Vec<Value> = table.values().cloned().collect();
    Json(records).into_response()
}

async fn fetch(State(state): State<MockState>, collection: &'static str, id: i64) -> Response {
    let mut store = state.store.lock().unwrap();
    match store.table(collection).and_then(|t| t.get(&id).cloned()) {
        Some(record) => Json(record).into_response(),
        None => not_found(collection),
    }
}

async fn create(State(state): State<MockState>, key: &'static str, body: Value) -> Response {
    let mut store = state.store.lock().unwrap();
    let id = store.allocate(key);
    let mut record = normalise(key, body);
    record["id"] = json!(id);
    if key == "candidates" {
        record["resume_path"] = Value::Null;
    }
    if key == "applications" {
        record["applied_at"] = json!("2025-01-02T10:00:00");
    }
    if let Some(table) = store.table(key) {
        table.insert(id, record.clone());
    }
    Json(record).into_response()
}

async fn update(
    State(state): State<MockState>,
    collection: &'static str,
    id: i64,
    body: Value,
) -> Response {
    let mut store = state.store.lock().unwrap();
    let body = normalise(collection, body);
    let updated = match store.table(collection).and_then(|t| t.get_mut(&id)) {
        Some(record) => {
            if let (Some(target), Some(fields)) = (record.as_object_mut(), body.as_object()) {
                for (k, v) in fields {
                    target.insert(k.clone(), v.clone());
                }
            }
            record.clone()
        }
        None => return not_found(collection),
    };
    if collection == "applications" {
        return Json(store.expand(&updated)).into_response();
    }
    Json(updated).into_response()
}

async fn remove(State(state): State<MockState>, collection: &'static str, id: i64) -> Response {
    let mut store = state.store.lock().unwrap();
    match store.table(collection).and_then(|t| t.remove(&id)) {
        Some(record) => Json(record).into_response(),
        None => not_found(collection),
    }
}

async fn upload(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Response {
    let mut file: Option<(String, Vec<u8>)> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        match field.bytes().await {
            Ok(data) => file = Some((name, data.to_vec())),
            Err(_) => return StatusCode::BAD_REQUEST.into_response(),
        }
    }
    let Some((name, data)) = file else {
        return (StatusCode::UNPROCESSABLE_ENTITY, "file field missing").into_response();
    };

    let mut store = state.store.lock().unwrap();
    let file_path = format!("resumes/{id}_{name}");
    match store.candidates.get_mut(&id) {
        Some(candidate) => candidate["resume_path"] = json!(file_path),
        None => return not_found("candidates"),
    }
    store.uploads.insert(id, data);

    Json(json!({"message": "Resume uploaded successfully", "file_path": file_path}))
        .into_response()
}

/// Records alerts, toasts and confirmation prompts. Confirmations are
/// answered from a queue, then `true` once the queue is empty.
pub struct RecordingUi {
    alerts: Mutex<Vec<String>>,
    toasts: Mutex<Vec<(String, ToastKind)>>,
    prompts: Mutex<Vec<String>>,
    answers: Mutex<VecDeque<bool>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::with_answers(Vec::new())
    }

    pub fn with_answers(answers: Vec<bool>) -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            toasts: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
            answers: Mutex::new(answers.into()),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn toasts(&self) -> Vec<(String, ToastKind)> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Ui for RecordingUi {
    async fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    async fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(true)
    }

    async fn toast(&self, message: &str, kind: ToastKind) {
        self.toasts.lock().unwrap().push((message.to_string(), kind));
    }
}
