#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use iut_erp_client::{ClientConfig, ErpClient};

pub const PASSWORD: &str = "secret";

type Reply = (StatusCode, Json<Value>);

/// In-memory stand-in for the ERP REST backend.
#[derive(Clone, Default)]
pub struct Backend {
    store: Arc<Mutex<Store>>,
}

#[derive(Default)]
struct Store {
    collections: HashMap<&'static str, Vec<Value>>,
    next_id: i64,
    authorizations: Vec<Option<String>>,
}

impl Backend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.store.lock().unwrap().next_id = 100;
        backend
    }

    pub fn with(self, collection: &'static str, records: Vec<Value>) -> Self {
        self.store
            .lock()
            .unwrap()
            .collections
            .insert(collection, records);
        self
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.store
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// `Authorization` header of every collection request, in arrival order.
    pub fn authorizations(&self) -> Vec<Option<String>> {
        self.store.lock().unwrap().authorizations.clone()
    }

    /// Serves the backend on an ephemeral port and returns its API root.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut api = Router::new()
            .route("/users/login", post(login))
            .route("/equipment/status/:status", get(equipment_by_status));
        for name in ["courses", "teachers", "classrooms", "timeslots", "equipment"] {
            api = collection_routes(api, name);
        }

        let app = Router::new().nest("/api", api.with_state(self.clone()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/api", addr)
    }

    /// A client pointed at a freshly spawned copy of this backend.
    pub async fn client(&self) -> ErpClient {
        let base_url = self.spawn().await;
        ErpClient::new(&ClientConfig::new(base_url)).unwrap()
    }

    fn record_authorization(&self, headers: &HeaderMap) {
        let value = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.store.lock().unwrap().authorizations.push(value);
    }
}

fn collection_routes(router: Router<Backend>, name: &'static str) -> Router<Backend> {
    router
        .route(
            &format!("/{}", name),
            get(move |State(backend): State<Backend>, headers: HeaderMap| async move {
                backend.record_authorization(&headers);
                (StatusCode::OK, Json(Value::Array(backend.records(name))))
            })
            .post(
                move |State(backend): State<Backend>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    backend.record_authorization(&headers);
                    create(&backend, name, body)
                },
            ),
        )
        .route(
            &format!("/{}/:id", name),
            get(move |State(backend): State<Backend>, Path(id): Path<i64>| async move {
                match find(&backend.records(name), id) {
                    Some(record) => (StatusCode::OK, Json(record)),
                    None => not_found(name, id),
                }
            })
            .delete(move |State(backend): State<Backend>, Path(id): Path<i64>| async move {
                delete(&backend, name, id)
            }),
        )
}

fn find(records: &[Value], id: i64) -> Option<Value> {
    records.iter().find(|record| record["id"] == json!(id)).cloned()
}

fn not_found(name: &str, id: i64) -> Reply {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("{} {} not found", name, id) })),
    )
}

fn create(backend: &Backend, name: &'static str, body: Value) -> Reply {
    let mut store = backend.store.lock().unwrap();
    let id = store.next_id;
    store.next_id += 1;

    // Time slots are stored with the backend's own column names.
    let mut record = if name == "timeslots" {
        json!({
            "title": body["title"],
            "start_time": body["startTime"],
            "end_time": body["endTime"],
            "course_id": body["courseId"],
            "teacher_id": body["teacherId"],
            "classroom_id": body["classroomId"],
            "color": body["color"],
        })
    } else {
        body
    };
    record["id"] = json!(id);

    store
        .collections
        .entry(name)
        .or_default()
        .push(record.clone());
    (StatusCode::CREATED, Json(record))
}

fn delete(backend: &Backend, name: &'static str, id: i64) -> Reply {
    let mut store = backend.store.lock().unwrap();

    if name == "courses" {
        let scheduled = store
            .collections
            .get("timeslots")
            .map(|slots| slots.iter().filter(|slot| slot["course_id"] == json!(id)).count())
            .unwrap_or(0);
        if scheduled > 0 {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": format!("Course {} has {} time slots", id, scheduled),
                    "type": "HAS_TIMESLOTS",
                })),
            );
        }
    }

    let records = store.collections.entry(name).or_default();
    let before = records.len();
    records.retain(|record| record["id"] != json!(id));
    if records.len() == before {
        return not_found(name, id);
    }

    (StatusCode::OK, Json(json!({ "message": "deleted" })))
}

async fn login(Json(body): Json<Value>) -> Reply {
    let role = match body["email"].as_str() {
        Some("admin@iutdouala.cm") => "admin",
        Some("student@iutdouala.cm") => "student",
        _ => "",
    };

    if role.is_empty() || body["password"] != json!(PASSWORD) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        );
    }

    let id = if role == "admin" { 1 } else { 2 };
    (
        StatusCode::OK,
        Json(json!({
            "token": format!("token-{}", id),
            "user": {
                "id": id,
                "name": format!("{} user", role),
                "email": body["email"],
                "role": role,
            },
        })),
    )
}

async fn equipment_by_status(
    State(backend): State<Backend>,
    Path(status): Path<String>,
) -> Reply {
    let matching = backend
        .records("equipment")
        .into_iter()
        .filter(|item| item["status"] == json!(status))
        .collect();
    (StatusCode::OK, Json(Value::Array(matching)))
}

pub fn classroom(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "capacity": 40,
        "building": "Bloc A",
        "floor": 1,
        "hasProjector": true,
        "hasComputers": false,
        "isLab": false,
    })
}

pub fn course(id: i64, name: &str, code: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "code": code,
        "department": "Génie Informatique",
        "credits": 4,
        "hoursPerWeek": 3,
    })
}

pub fn teacher(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("teacher{}@iutdouala.cm", id),
        "department": "Génie Informatique",
        "specialization": "Réseaux",
        "availableDays": ["Lundi", "Mercredi"],
    })
}

pub fn time_slot(id: i64, classroom_id: i64, course_id: i64, start: &str, end: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Slot {}", id),
        "start_time": start,
        "end_time": end,
        "classroom_id": classroom_id,
        "teacher_id": 1,
        "course_id": course_id,
        "color": "#0ea5e9",
    })
}

pub fn equipment(id: i64, name: &str, serial: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "Projecteur",
        "serialNumber": serial,
        "purchaseDate": "2023-09-01",
        "status": status,
        "location": "A1",
    })
}
