//! Thin clients for the finance REST API.
//!
//! Every call is first described as an [`ApiRequest`] (method, path, body)
//! and only then sent, so the wire contract is checked by plain unit tests.
//! Errors are returned to the caller as they are; there are no retries.

pub mod auth;
pub mod categories;
pub mod transactions;

use std::fmt;

use gloo_net::http::{Method as HttpMethod, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

/// Auth endpoints live at the server root, everything else under the
/// configured API prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Auth,
    Resource,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Form(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub scope: Scope,
    pub path: String,
    pub body: Body,
}

impl ApiRequest {
    pub fn new(method: Method, scope: Scope, path: impl Into<String>) -> Self {
        Self {
            method,
            scope,
            path: path.into(),
            body: Body::Empty,
        }
    }

    pub fn get(scope: Scope, path: impl Into<String>) -> Self {
        Self::new(Method::Get, scope, path)
    }

    pub fn delete(scope: Scope, path: impl Into<String>) -> Self {
        Self::new(Method::Delete, scope, path)
    }

    pub fn with_json<T: Serialize>(mut self, payload: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    pub fn with_form<T: Serialize>(mut self, payload: &T) -> Result<Self, ApiError> {
        let encoded =
            serde_urlencoded::to_string(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Body::Form(encoded);
        Ok(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
    prefix: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, token: Option<String>) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            prefix: config.api_prefix.clone(),
            token,
        }
    }

    /// Client carrying whatever token the session holds right now.
    pub fn for_session(config: &AppConfig, session: &Session) -> Self {
        Self::new(config, session.get_token())
    }

    pub fn url(&self, request: &ApiRequest) -> String {
        match request.scope {
            Scope::Auth => format!("{}{}", self.base_url, request.path),
            Scope::Resource => format!("{}{}{}", self.base_url, self.prefix, request.path),
        }
    }

    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {}", token))
    }

    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let (status, body) = self.exchange(&request).await?;
        decode_body(status, &body)
    }

    /// For calls whose response body is of no interest (deletes).
    pub async fn send_discarding(&self, request: ApiRequest) -> Result<(), ApiError> {
        let (status, body) = self.exchange(&request).await?;
        check_status(status, &body)
    }

    async fn exchange(&self, request: &ApiRequest) -> Result<(u16, String), ApiError> {
        let url = self.url(request);
        log::debug!("{} {}", request.method, url);

        let method = match request.method {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
            Method::Patch => HttpMethod::PATCH,
            Method::Delete => HttpMethod::DELETE,
        };
        let mut builder = RequestBuilder::new(&url).method(method);
        if let Some(auth) = self.authorization() {
            builder = builder.header("Authorization", &auth);
        }

        let prepared = match &request.body {
            Body::Empty => builder.build()?,
            Body::Json(value) => builder.json(value)?,
            Body::Form(encoded) => builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(encoded.as_str())?,
        };

        let resp = prepared.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !resp.ok() {
            log::warn!("{} {} -> {}", request.method, url, status);
        }
        Ok((status, body))
    }
}

fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Status {
            status,
            body: body.to_string(),
        })
    }
}

pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    check_status(status, body)?;
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn client(token: Option<&str>) -> ApiClient {
        ApiClient::new(&AppConfig::default(), token.map(str::to_string))
    }

    #[test]
    fn resource_paths_get_the_api_prefix() {
        let req = ApiRequest::get(Scope::Resource, "/expense");
        assert_eq!(client(None).url(&req), "http://localhost:8000/api/expense");
    }

    #[test]
    fn auth_paths_stay_at_the_root() {
        let req = ApiRequest::get(Scope::Auth, "/users/me");
        assert_eq!(client(None).url(&req), "http://localhost:8000/users/me");
    }

    #[test]
    fn bearer_header_only_with_token() {
        assert_eq!(client(None).authorization(), None);
        assert_eq!(
            client(Some("abc")).authorization().as_deref(),
            Some("Bearer abc")
        );
    }

    #[test]
    fn non_success_status_is_an_error() {
        let err = decode_body::<Category>(404, r#"{"detail":"Not Found"}"#).unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("Not Found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unexpected_shape_is_a_decode_error() {
        let err = decode_body::<Vec<Category>>(200, r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn success_decodes() {
        let cats: Vec<Category> =
            decode_body(200, r#"[{"id":1,"name":"Food"},{"id":2,"name":"Rent"}]"#).unwrap();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[1].name, "Rent");
    }
}
