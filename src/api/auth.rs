use super::ApiClient;
use crate::error::Result;
use reqwest::Method;
use serde_json::{json, Value};

impl ApiClient {
    /// `POST /auth/login` with a JSON body.
    pub async fn login(&self, username: &str, password: &str) -> Result<Value> {
        tracing::debug!(username, "login");
        let builder = self
            .request(Method::POST, "/auth/login")
            .json(&json!({ "username": username, "password": password }));
        self.send("/auth/login", builder).await
    }

    /// `POST /auth/register` with a URL-encoded form.
    pub async fn register(&self, username: &str, password: &str) -> Result<Value> {
        tracing::debug!(username, "register");
        let builder = self
            .request(Method::POST, "/auth/register")
            .form(&[("username", username), ("password", password)]);
        self.send("/auth/register", builder).await
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> Result<Value> {
        self.send("/auth/me", self.request(Method::GET, "/auth/me")).await
    }
}
