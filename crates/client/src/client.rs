//! # REST Client
//!
//! Thin wrapper over `reqwest` for the ERP backend. Every collection the
//! backend exposes (`/courses`, `/teachers`, `/classrooms`, `/timeslots`,
//! `/equipment`, `/users`) shares the same five operations, so they are served
//! by one generic [`Collection`] handle.
//!
//! Non-2xx responses are mapped back onto [`ErpError`] variants:
//!
//! | Status / body                 | Error                           |
//! |-------------------------------|---------------------------------|
//! | `type == "HAS_TIMESLOTS"`     | `ErpError::CourseHasTimeSlots`  |
//! | 400                           | `ErpError::Validation`          |
//! | 401                           | `ErpError::Authentication`      |
//! | 403                           | `ErpError::Authorization`       |
//! | 404                           | `ErpError::NotFound`            |
//! | anything else                 | `ErpError::Api`                 |
//!
//! Transport failures (connection refused, timeouts, undecodable bodies) are
//! reported as `ErpError::Internal`. Nothing is retried.

use std::marker::PhantomData;
use std::time::Duration;

use chrono::FixedOffset;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error, warn};

use iut_erp_core::{
    errors::{ErpError, ErpResult},
    models::{
        classroom::{Classroom, NewClassroom},
        course::{Course, NewCourse},
        equipment::{Equipment, EquipmentStatus, NewEquipment},
        teacher::{NewTeacher, Teacher},
        time_slot::{NewTimeSlot, TimeSlot},
        user::{AuthResponse, LoginRequest, RegisterRequest, User},
    },
};

use crate::config::ClientConfig;

/// Handle on the ERP backend.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ErpClient {
    http: reqwest::Client,
    base_url: String,
    timezone: FixedOffset,
    token: Option<String>,
}

impl ErpClient {
    pub fn new(config: &ClientConfig) -> ErpResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(transport)?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            timezone: config.timezone,
            token: None,
        })
    }

    /// A copy of this client that sends `token` as a bearer credential.
    pub fn authenticated(&self, token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            timezone: self.timezone,
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Campus clock the backend's offset-less slot times refer to.
    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making API call to {} {}", method, url);

        let request = self.http.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> ErpResult<Response> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        debug!("Response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read error response body ({}): {}", status, e);
                String::new()
            }
        };
        error!("API error response ({}): {}", status, body);
        Err(error_from_response(status, &body))
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ErpResult<T> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(transport)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ErpResult<T> {
        self.json(self.request(Method::GET, path)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ErpResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.json(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ErpResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.json(self.request(Method::PUT, path).json(body)).await
    }

    /// Issues a DELETE; whatever body the backend answers with is discarded.
    pub async fn delete(&self, path: &str) -> ErpResult<()> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> ErpResult<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/users/login", &request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ErpResult<AuthResponse> {
        self.post("/users/register", request).await
    }

    pub fn courses(&self) -> Collection<'_, Course, NewCourse> {
        Collection::new(self, "/courses")
    }

    pub fn teachers(&self) -> Collection<'_, Teacher, NewTeacher> {
        Collection::new(self, "/teachers")
    }

    pub fn classrooms(&self) -> Collection<'_, Classroom, NewClassroom> {
        Collection::new(self, "/classrooms")
    }

    pub fn time_slots(&self) -> Collection<'_, TimeSlot, NewTimeSlot> {
        Collection::new(self, "/timeslots")
    }

    pub fn equipment(&self) -> Collection<'_, Equipment, NewEquipment> {
        Collection::new(self, "/equipment")
    }

    pub fn users(&self) -> Collection<'_, User, RegisterRequest> {
        Collection::new(self, "/users")
    }

    pub async fn equipment_by_status(&self, status: EquipmentStatus) -> ErpResult<Vec<Equipment>> {
        self.get(&format!(
            "/equipment/status/{}",
            urlencoding::encode(status.as_str())
        ))
        .await
    }
}

/// CRUD operations over one backend collection.
///
/// `T` is the record the backend returns, `N` the payload posted to create or
/// update one. The handle is `Copy`; each operation consumes a copy so the
/// returned future borrows only the client.
pub struct Collection<'a, T, N> {
    client: &'a ErpClient,
    path: &'static str,
    _records: PhantomData<fn() -> (T, N)>,
}

impl<T, N> Clone for Collection<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, N> Copy for Collection<'_, T, N> {}

impl<'a, T, N> Collection<'a, T, N>
where
    T: DeserializeOwned,
    N: Serialize,
{
    fn new(client: &'a ErpClient, path: &'static str) -> Self {
        Self {
            client,
            path,
            _records: PhantomData,
        }
    }

    pub fn path(self) -> &'static str {
        self.path
    }

    pub async fn list(self) -> ErpResult<Vec<T>> {
        self.client.get(self.path).await
    }

    pub async fn get(self, id: i64) -> ErpResult<T> {
        self.client.get(&format!("{}/{}", self.path, id)).await
    }

    pub async fn create(self, record: &N) -> ErpResult<T> {
        self.client.post(self.path, record).await
    }

    pub async fn update(self, id: i64, record: &N) -> ErpResult<T> {
        self.client
            .put(&format!("{}/{}", self.path, id), record)
            .await
    }

    pub async fn delete(self, id: i64) -> ErpResult<()> {
        self.client.delete(&format!("{}/{}", self.path, id)).await
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "message")]
    error: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Maps a failed response onto the domain error.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> ErpError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .error
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP error! status: {}", status.as_u16())
            } else {
                body.trim().to_string()
            }
        });

    if parsed.kind.as_deref() == Some("HAS_TIMESLOTS") {
        return ErpError::CourseHasTimeSlots(message);
    }

    match status {
        StatusCode::BAD_REQUEST => ErpError::Validation(message),
        StatusCode::UNAUTHORIZED => ErpError::Authentication(message),
        StatusCode::FORBIDDEN => ErpError::Authorization(message),
        StatusCode::NOT_FOUND => ErpError::NotFound(message),
        _ => ErpError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

fn transport(err: reqwest::Error) -> ErpError {
    ErpError::Internal(Box::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_message_is_used() {
        let err = error_from_response(
            StatusCode::NOT_FOUND,
            r#"{"error": "Classroom 12 not found"}"#,
        );
        assert_eq!(err.to_string(), "Resource not found: Classroom 12 not found");
    }

    #[test]
    fn test_has_timeslots_wins_over_status() {
        let err = error_from_response(
            StatusCode::BAD_REQUEST,
            r#"{"error": "Course has 2 time slots", "type": "HAS_TIMESLOTS"}"#,
        );
        assert!(matches!(err, ErpError::CourseHasTimeSlots(ref m) if m == "Course has 2 time slots"));
    }

    #[test]
    fn test_plain_text_and_empty_bodies() {
        let err = error_from_response(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(err, ErpError::Api { status: 502, ref message } if message == "upstream down"));

        let err = error_from_response(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.to_string(), "API error (500): HTTP error! status: 500");
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            error_from_response(StatusCode::UNAUTHORIZED, r#"{"message": "bad token"}"#),
            ErpError::Authentication(ref m) if m == "bad token"
        ));
        assert!(matches!(
            error_from_response(StatusCode::FORBIDDEN, "{}"),
            ErpError::Authorization(_)
        ));
        assert!(matches!(
            error_from_response(StatusCode::BAD_REQUEST, "{}"),
            ErpError::Validation(_)
        ));
    }
}
