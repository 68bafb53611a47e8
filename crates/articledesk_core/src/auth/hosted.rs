//! Blocking HTTP client for a Supabase-compatible auth REST API.
//!
//! Endpoints used:
//! - `POST {base}/auth/v1/signup` with `{email, password, data: {full_name}}`
//! - `POST {base}/auth/v1/token?grant_type=password` with `{email, password}`
//!
//! Both requests carry the project key in the `apikey` header.

use super::{AuthError, AuthGateway, AuthUser, UserId};
use log::{info, warn};
use reqwest::blocking::{Client, Request, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

const SIGN_UP_PATH: &str = "/auth/v1/signup";
const SIGN_IN_PATH: &str = "/auth/v1/token?grant_type=password";
const ERROR_MESSAGE_KEYS: [&str; 4] = ["error_description", "msg", "message", "error"];

/// Auth gateway talking to a hosted auth service over HTTPS.
pub struct HostedAuthGateway {
    base_url: String,
    api_key: String,
    client: Client,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: ProfileData<'a>,
}

#[derive(Serialize)]
struct ProfileData<'a> {
    full_name: &'a str,
}

#[derive(Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// User object, returned either at top level or nested under `user`.
#[derive(Debug, Deserialize)]
struct UserReply {
    id: Option<String>,
    email: Option<String>,
    user: Option<Box<UserReply>>,
}

impl UserReply {
    fn into_user(self) -> Option<AuthUser> {
        if let Some(id) = self.id {
            return Some(AuthUser {
                id,
                email: self.email.unwrap_or_default(),
            });
        }
        self.user.and_then(|user| user.into_user())
    }
}

impl HostedAuthGateway {
    /// Creates a gateway for the service at `base_url` using `api_key`.
    ///
    /// # Errors
    /// - `NotConfigured` when either value is blank.
    /// - `Transport` when the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AuthError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let api_key = api_key.trim();
        if base_url.is_empty() || api_key.is_empty() {
            return Err(AuthError::NotConfigured);
        }
        let client = Client::builder()
            .build()
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    /// Builds the JSON POST for `path`, keyed with the project key.
    fn request(&self, path: &str, body: &impl Serialize) -> Result<Request, AuthError> {
        self.client
            .post(format!("{}{path}", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(body)
            .build()
            .map_err(|err| AuthError::Transport(err.to_string()))
    }

    fn post(&self, path: &str, body: &impl Serialize) -> Result<UserReply, AuthError> {
        let request = self.request(path, body)?;
        let response = self
            .client
            .execute(request)
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        read_reply(response)
    }
}

impl AuthGateway for HostedAuthGateway {
    fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<UserId, AuthError> {
        let started_at = Instant::now();
        let body = SignUpBody {
            email,
            password,
            data: ProfileData {
                full_name: display_name,
            },
        };
        let result = self.post(SIGN_UP_PATH, &body).and_then(|reply| {
            reply
                .into_user()
                .map(|user| user.id)
                .ok_or_else(|| AuthError::Transport("sign-up reply has no user id".to_string()))
        });
        log_outcome("auth_sign_up", started_at, &result);
        result
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let started_at = Instant::now();
        let result = self
            .post(SIGN_IN_PATH, &SignInBody { email, password })
            .and_then(|reply| {
                reply.into_user().ok_or_else(|| {
                    AuthError::Transport("sign-in reply has no user".to_string())
                })
            });
        log_outcome("auth_sign_in", started_at, &result);
        result
    }
}

fn read_reply(response: Response) -> Result<UserReply, AuthError> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|err| AuthError::Transport(err.to_string()))?;

    if !status.is_success() {
        return Err(AuthError::Rejected(error_message(status.as_u16(), &body)));
    }

    serde_json::from_str(&body)
        .map_err(|err| AuthError::Transport(format!("unreadable auth reply: {err}")))
}

/// Picks the service's human-readable message out of an error body.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ERROR_MESSAGE_KEYS
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("auth service responded with HTTP {status}"))
}

fn log_outcome<T>(event: &str, started_at: Instant, result: &Result<T, AuthError>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!("event={event} module=auth status=ok duration_ms={duration_ms}"),
        Err(AuthError::Rejected(_)) => {
            warn!("event={event} module=auth status=rejected duration_ms={duration_ms}")
        }
        Err(err) => warn!(
            "event={event} module=auth status=error duration_ms={duration_ms} error={err}"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        error_message, HostedAuthGateway, ProfileData, SignInBody, SignUpBody, UserReply,
        SIGN_IN_PATH, SIGN_UP_PATH,
    };
    use crate::auth::{AuthError, AuthUser};
    use reqwest::blocking::Request;
    use reqwest::header::AUTHORIZATION;
    use reqwest::Method;
    use serde_json::{json, Value};

    fn gateway() -> HostedAuthGateway {
        HostedAuthGateway::new("https://auth.example.com/", "anon-key").expect("configured gateway")
    }

    fn header<'r>(request: &'r Request, name: &str) -> Option<&'r str> {
        request
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    fn json_body(request: &Request) -> Value {
        let bytes = request
            .body()
            .and_then(|body| body.as_bytes())
            .expect("buffered request body");
        serde_json::from_slice(bytes).expect("json request body")
    }

    #[test]
    fn sign_up_request_posts_credentials_and_profile() {
        let body = SignUpBody {
            email: "ada@example.com",
            password: "secret1",
            data: ProfileData {
                full_name: "Ada Lovelace",
            },
        };
        let request = gateway()
            .request(SIGN_UP_PATH, &body)
            .expect("build sign-up request");

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://auth.example.com/auth/v1/signup"
        );
        assert_eq!(header(&request, "apikey"), Some("anon-key"));
        assert_eq!(
            header(&request, AUTHORIZATION.as_str()),
            Some("Bearer anon-key")
        );
        assert_eq!(
            json_body(&request),
            json!({
                "email": "ada@example.com",
                "password": "secret1",
                "data": { "full_name": "Ada Lovelace" }
            })
        );
    }

    #[test]
    fn sign_in_request_uses_password_grant() {
        let body = SignInBody {
            email: "ada@example.com",
            password: "secret1",
        };
        let request = gateway()
            .request(SIGN_IN_PATH, &body)
            .expect("build sign-in request");

        assert_eq!(
            request.url().as_str(),
            "https://auth.example.com/auth/v1/token?grant_type=password"
        );
        assert_eq!(header(&request, "apikey"), Some("anon-key"));
        assert_eq!(
            json_body(&request),
            json!({ "email": "ada@example.com", "password": "secret1" })
        );
    }

    #[test]
    fn error_message_prefers_service_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(error_message(400, body), "Invalid login credentials");
        assert_eq!(
            error_message(422, r#"{"code":422,"msg":"User already registered"}"#),
            "User already registered"
        );
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(
            error_message(502, "<html>bad gateway</html>"),
            "auth service responded with HTTP 502"
        );
    }

    #[test]
    fn user_reply_accepts_top_level_and_nested_user() {
        let top: UserReply =
            serde_json::from_str(r#"{"id":"u-1","email":"a@b.c","aud":"authenticated"}"#)
                .expect("top-level user");
        assert_eq!(
            top.into_user(),
            Some(AuthUser {
                id: "u-1".to_string(),
                email: "a@b.c".to_string()
            })
        );

        let nested: UserReply =
            serde_json::from_str(r#"{"access_token":"t","user":{"id":"u-2","email":"x@y.z"}}"#)
                .expect("nested user");
        assert_eq!(nested.into_user().map(|user| user.id).as_deref(), Some("u-2"));
    }

    #[test]
    fn new_rejects_blank_configuration() {
        assert!(matches!(
            HostedAuthGateway::new("  ", "key"),
            Err(AuthError::NotConfigured)
        ));
        assert!(matches!(
            HostedAuthGateway::new("https://auth.example.com", ""),
            Err(AuthError::NotConfigured)
        ));
    }
}
