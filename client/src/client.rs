use eyre::{bail, Result};
use log::{debug, warn};
use reqwest::Client as ReqwestClient;
use reqwest::StatusCode;
use serde_json::Value;

use types::domain::{CreateAccountRequest, LoginRequest, SubmissionResult};
use types::error::Error;

use crate::config::BASE_URL;

/// The only response body the login endpoint sends on success.
pub const LOGIN_SUCCESS: &str = "Login success";

#[derive(Debug, Clone)]
pub struct Client {
    pub client: ReqwestClient,
    base_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(BASE_URL)
    }
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: ReqwestClient::new(),
            base_url: base_url.into(),
        }
    }

    /// Registers a new account. Never fails: transport and server errors come
    /// back as [`SubmissionResult::Failure`].
    pub async fn create_account(&self, request: CreateAccountRequest) -> SubmissionResult {
        match self.try_create_account(&request).await {
            Ok(data) => SubmissionResult::Success { data },
            Err(e) => {
                warn!("create account for {} failed: {}", request.email, e);
                SubmissionResult::failure(Error::describe(e))
            }
        }
    }

    /// Signs in. Success is signalled solely by the body being [`LOGIN_SUCCESS`];
    /// any other body is handed back verbatim as the error.
    pub async fn login(&self, request: LoginRequest) -> SubmissionResult {
        match self.try_login(&request).await {
            Ok(text) if text == LOGIN_SUCCESS => SubmissionResult::Success {
                data: Value::String(text),
            },
            Ok(text) => {
                debug!("login rejected for {}: {}", request.email, text);
                SubmissionResult::failure(text)
            }
            Err(e) => {
                warn!("login for {} failed: {}", request.email, e);
                SubmissionResult::failure(Error::describe(e))
            }
        }
    }

    async fn try_create_account(&self, request: &CreateAccountRequest) -> Result<Value> {
        let url = format!("{}/api/users/create", self.base_url);
        debug!("POST {}", url);
        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("create account responded {}", status);
        if !status.is_success() {
            bail!(failure_message(status, &text));
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    async fn try_login(&self, request: &LoginRequest) -> Result<String> {
        let url = format!("{}/api/users/login", self.base_url);
        debug!("POST {}", url);
        let response = self.client.post(url).json(request).send().await?;
        debug!("login responded {}", response.status());
        Ok(response.text().await?)
    }
}

/// A plain string body is the server's own explanation; anything else gets
/// the generic message.
fn failure_message(status: StatusCode, body: &str) -> String {
    let generic = || Error::RequestFailed(status.as_u16()).to_string();
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(message)) if !message.trim().is_empty() => message,
        Ok(_) => generic(),
        Err(_) if !body.trim().is_empty() => body.to_string(),
        Err(_) => generic(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode as HttpStatus;
    use axum::routing::post;
    use axum::{Json, Router};
    use rstest::rstest;
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn respond_to_create(status: HttpStatus, body: &'static str) -> Client {
        let router = Router::new().route(
            "/api/users/create",
            post(move || async move { (status, body) }),
        );
        Client::new(serve(router).await)
    }

    async fn respond_to_login(status: HttpStatus, body: &'static str) -> Client {
        let router = Router::new().route(
            "/api/users/login",
            post(move || async move { (status, body) }),
        );
        Client::new(serve(router).await)
    }

    fn create_request() -> CreateAccountRequest {
        CreateAccountRequest {
            name: "Jo".to_string(),
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        }
    }

    fn login_request() -> LoginRequest {
        LoginRequest {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_account_sends_payload_and_parses_json() {
        let router = Router::new().route(
            "/api/users/create",
            post(|Json(body): Json<Value>| async move {
                (
                    HttpStatus::CREATED,
                    Json(json!({
                        "id": "1",
                        "name": body["name"],
                        "email": body["email"],
                        "passwordSent": body["password"] == "secret",
                    })),
                )
            }),
        );
        let client = Client::new(serve(router).await);

        let result = client.create_account(create_request()).await;

        assert_eq!(
            result,
            SubmissionResult::Success {
                data: json!({"id": "1", "name": "Jo", "email": "a@b.com", "passwordSent": true})
            }
        );
    }

    #[tokio::test]
    async fn test_create_account_falls_back_to_text() {
        let client = respond_to_create(HttpStatus::OK, "User created").await;

        let result = client.create_account(create_request()).await;

        assert_eq!(
            result,
            SubmissionResult::Success {
                data: Value::String("User created".to_string())
            }
        );
    }

    #[rstest]
    #[case(HttpStatus::CONFLICT, "Email already exists", "Email already exists")]
    #[case(HttpStatus::BAD_REQUEST, "\"Name too short\"", "Name too short")]
    #[case(
        HttpStatus::INTERNAL_SERVER_ERROR,
        "{\"message\": \"boom\"}",
        "Request failed with status 500"
    )]
    #[case(HttpStatus::SERVICE_UNAVAILABLE, "", "Request failed with status 503")]
    #[tokio::test]
    async fn test_create_account_failure_message(
        #[case] status: HttpStatus,
        #[case] body: &'static str,
        #[case] expected: &str,
    ) {
        let client = respond_to_create(status, body).await;

        let result = client.create_account(create_request()).await;

        assert_eq!(result, SubmissionResult::failure(expected));
    }

    #[tokio::test]
    async fn test_login_success_literal() {
        let client = respond_to_login(HttpStatus::OK, "Login success").await;

        let result = client.login(login_request()).await;

        assert!(result.is_success());
        assert_eq!(result.error(), None);
    }

    #[rstest]
    #[case(HttpStatus::UNAUTHORIZED, "Invalid credentials")]
    #[case(HttpStatus::OK, "Invalid credentials")]
    #[case(HttpStatus::OK, "{\"status\": \"Login success\"}")]
    #[case(HttpStatus::OK, "login success")]
    #[case(HttpStatus::OK, "Login success\n")]
    #[tokio::test]
    async fn test_login_other_text_is_failure(
        #[case] status: HttpStatus,
        #[case] body: &'static str,
    ) {
        let client = respond_to_login(status, body).await;

        let result = client.login(login_request()).await;

        assert_eq!(result, SubmissionResult::failure(body));
    }

    #[tokio::test]
    async fn test_login_forwards_credentials() {
        let router = Router::new().route(
            "/api/users/login",
            post(|Json(body): Json<LoginRequest>| async move {
                if body == login_request() {
                    "Login success"
                } else {
                    "Invalid credentials"
                }
            }),
        );
        let client = Client::new(serve(router).await);

        assert!(client.login(login_request()).await.is_success());
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_failure_result() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = Client::new(format!("http://{}", addr));

        let created = client.create_account(create_request()).await;
        let logged_in = client.login(login_request()).await;

        for result in [created, logged_in] {
            let error = result.error().unwrap();
            assert!(error.contains("error sending request"), "{error}");
            assert!(error.contains(&addr.to_string()), "{error}");
        }
    }
}
