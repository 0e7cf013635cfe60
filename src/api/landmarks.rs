use super::ApiClient;
use crate::error::Result;
use geogenie_common::{landmark_names, landmarks, Landmark};
use reqwest::Method;
use serde_json::Value;

impl ApiClient {
    /// `GET /landmarks`: full records.
    pub async fn list_landmarks(&self) -> Result<Vec<Landmark>> {
        let payload = self
            .send("/landmarks", self.request(Method::GET, "/landmarks"))
            .await?;
        Ok(landmarks(&payload)?)
    }

    /// `GET /landmarks/list`: names only, in server order.
    pub async fn list_landmark_folders(&self) -> Result<Vec<String>> {
        let payload = self
            .send("/landmarks/list", self.request(Method::GET, "/landmarks/list"))
            .await?;
        Ok(landmark_names(&payload))
    }

    /// `POST /landmarks/add` with a URL-encoded `name`.
    pub async fn add_landmark(&self, name: &str) -> Result<Value> {
        let builder = self
            .request(Method::POST, "/landmarks/add")
            .form(&[("name", name)]);
        self.send("/landmarks/add", builder).await
    }
}
