//! HTTP client for the PharmaChain API.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::domain::Role;

use super::types::*;

/// Third-party endpoint that renders a QR code for an arbitrary string.
const QR_RENDER_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Errors that can occur when communicating with the PharmaChain API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Whether the server rejected the request with 403 Forbidden.
    ///
    /// Screens use this to render role-specific denial messages.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ApiError::Status { status: 403, .. })
    }

    /// Server-provided message for a non-2xx status, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// PharmaChain API client.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given host.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .build()
            .map_err(ApiError::Http)?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    /// Register a new account under the given role.
    ///
    /// Nothing beyond the status is consumed from the response.
    pub async fn register_account(
        &self,
        role: Role,
        request: &RegisterAccountRequest,
    ) -> Result<(), ApiError> {
        let response = self
            .post(&format!("/api/register/{}", role.as_str()), request, None)
            .await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Log in under the given role, returning the issued token and role label.
    pub async fn login(&self, role: Role, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = self
            .post(&format!("/api/login/{}", role.as_str()), request, None)
            .await?;
        Self::read_json(response).await
    }

    /// Register a medicine batch, returning the server-issued tag id.
    pub async fn register_medicine(
        &self,
        token: &str,
        request: &RegisterMedicineRequest,
    ) -> Result<RegisterMedicineResponse, ApiError> {
        let response = self
            .post("/api/medicine/register", request, Some(token))
            .await?;
        Self::read_json(response).await
    }

    /// Look up a tag id, returning the found/not-found result.
    pub async fn verify_medicine(
        &self,
        token: &str,
        request: &VerifyRequest,
    ) -> Result<VerifyResponse, ApiError> {
        let response = self.post("/api/verify", request, Some(token)).await?;
        Self::read_json(response).await
    }

    /// Fetch the ordered blockchain log for a tag id.
    pub async fn fetch_logs(&self, tag_id: &str) -> Result<Vec<LogEntry>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/blockchain/logs/{}", self.base_url, tag_id))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let body: LogsResponse = Self::read_json(response).await?;
        Ok(body.logs)
    }

    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Response, ApiError> {
        let mut request = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.map_err(|e| self.map_send_error(e))
    }

    fn map_send_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_connect() {
            ApiError::Connection(format!("Cannot connect to {}", self.base_url))
        } else {
            ApiError::Http(error)
        }
    }

    /// Turn a non-2xx status into `ApiError::Status`, carrying the
    /// server-provided message when the body has one.
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
        let response = Self::check_status(response).await?;
        response
            .json::<R>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// URL of the third-party QR rendering endpoint for a tag id.
///
/// The identifier is embedded as a query parameter; rendering happens on the
/// collaborator's side.
pub fn qr_code_url(tag_id: &str) -> String {
    reqwest::Url::parse_with_params(QR_RENDER_ENDPOINT, &[("size", "150x150"), ("data", tag_id)])
        .map(String::from)
        .unwrap_or_else(|_| QR_RENDER_ENDPOINT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn login_returns_token_and_role() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login/manufacturer"))
            .and(body_json(serde_json::json!({
                "email": "a@b.com",
                "password": "hunter2"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "tok-123",
                "role": "manufacturer"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let response = client
            .login(
                Role::Manufacturer,
                &LoginRequest {
                    email: "a@b.com".into(),
                    password: "hunter2".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.token, "tok-123");
        assert_eq!(response.role, "manufacturer");
    }

    #[tokio::test]
    async fn register_medicine_attaches_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/medicine/register"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"tag_id": "TAG-42"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let response = client
            .register_medicine(
                "tok-123",
                &RegisterMedicineRequest {
                    name: "Aspirin".into(),
                    batch: "B-1".into(),
                    expiry: "2026-01-01".into(),
                    manufacturer: "Acme".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.tag_id, "TAG-42");
    }

    #[tokio::test]
    async fn forbidden_status_is_distinguishable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/medicine/register"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let error = client
            .register_medicine(
                "tok-123",
                &RegisterMedicineRequest {
                    name: "Aspirin".into(),
                    batch: "B-1".into(),
                    expiry: "2026-01-01".into(),
                    manufacturer: "Acme".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(error.is_forbidden());
    }

    #[tokio::test]
    async fn fetch_logs_surfaces_server_message_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/blockchain/logs/TAG-404"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "No logs for tag"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let error = client.fetch_logs("TAG-404").await.unwrap_err();

        assert_eq!(error.server_message(), Some("No logs for tag"));
    }

    #[tokio::test]
    async fn account_registration_consumes_status_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/register/pharmacy_owner"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = client
            .register_account(
                Role::PharmacyOwner,
                &RegisterAccountRequest {
                    name: "Jo".into(),
                    license_no: "L-9".into(),
                    email: "jo@rx.com".into(),
                    password: "pw".into(),
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[test]
    fn qr_url_percent_encodes_tag_id() {
        let url = qr_code_url("TAG 42/x");
        assert!(url.starts_with(QR_RENDER_ENDPOINT));
        assert!(url.contains("data=TAG%2042%2Fx") || url.contains("data=TAG+42%2Fx"));
    }
}
