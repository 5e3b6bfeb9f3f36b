use crate::error::ApiError;
use crate::models::{LoginForm, RegisterPayload, TokenResponse, User};

use super::{ApiClient, ApiRequest, Method, Scope};

pub fn login_request(email: &str, password: &str) -> Result<ApiRequest, ApiError> {
    ApiRequest::new(Method::Post, Scope::Auth, "/auth/jwt/login").with_form(&LoginForm {
        username: email.to_string(),
        password: password.to_string(),
    })
}

pub fn register_request(email: &str, password: &str) -> Result<ApiRequest, ApiError> {
    ApiRequest::new(Method::Post, Scope::Auth, "/auth/register").with_json(&RegisterPayload {
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn me_request() -> ApiRequest {
    ApiRequest::get(Scope::Auth, "/users/me")
}

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let token: TokenResponse = self.send(login_request(email, password)?).await?;
        if token.access_token.is_empty() {
            return Err(ApiError::Decode("login response carried an empty token".to_string()));
        }
        Ok(token)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<User, ApiError> {
        self.send(register_request(email, password)?).await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.send(me_request()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Body;

    #[test]
    fn login_is_form_encoded() {
        let req = login_request("a+b@example.com", "p&ss word").unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.scope, Scope::Auth);
        assert_eq!(req.path, "/auth/jwt/login");
        assert_eq!(
            req.body,
            Body::Form("username=a%2Bb%40example.com&password=p%26ss+word".to_string())
        );
    }

    #[test]
    fn register_sends_json() {
        let req = register_request("anna@example.com", "secret1").unwrap();
        assert_eq!(req.path, "/auth/register");
        assert_eq!(
            req.body,
            Body::Json(serde_json::json!({ "email": "anna@example.com", "password": "secret1" }))
        );
    }

    #[test]
    fn current_user_is_a_plain_get() {
        let req = me_request();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/users/me");
        assert_eq!(req.body, Body::Empty);
    }
}
