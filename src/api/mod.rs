//! Remote API facade
//!
//! One module per backend resource. Encodings follow what each endpoint
//! expects:
//! - auth: JSON (login), URL-encoded form (register)
//! - recognize / feedback: multipart
//! - landmarks add / chat: URL-encoded form
//!
//! Flow controllers talk to the backend through [`GeoApi`] so they can be
//! driven by a fake in tests.

mod auth;
mod chat;
mod client;
mod feedback;
mod landmarks;
mod recognize;

pub use client::ApiClient;
pub use feedback::UploadReceipt;

use crate::error::Result;
use crate::media::ImageUpload;
use async_trait::async_trait;
use geogenie_common::{FeedbackMeta, Landmark, RecognizeResponse};
use serde_json::Value;

#[async_trait]
pub trait GeoApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Value>;

    async fn register(&self, username: &str, password: &str) -> Result<Value>;

    async fn me(&self) -> Result<Value>;

    async fn recognize(
        &self,
        image: &ImageUpload,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<RecognizeResponse>;

    async fn list_landmarks(&self) -> Result<Vec<Landmark>>;

    async fn list_landmark_folders(&self) -> Result<Vec<String>>;

    async fn add_landmark(&self, name: &str) -> Result<Value>;

    async fn upload_image(&self, image: &ImageUpload) -> Result<UploadReceipt>;

    async fn update_meta(&self, meta: &FeedbackMeta) -> Result<Value>;

    async fn chat_about_place(&self, place_name: &str, user_message: &str) -> Result<String>;
}

#[async_trait]
impl GeoApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<Value> {
        ApiClient::login(self, username, password).await
    }

    async fn register(&self, username: &str, password: &str) -> Result<Value> {
        ApiClient::register(self, username, password).await
    }

    async fn me(&self) -> Result<Value> {
        ApiClient::me(self).await
    }

    async fn recognize(
        &self,
        image: &ImageUpload,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<RecognizeResponse> {
        ApiClient::recognize(self, image, latitude, longitude).await
    }

    async fn list_landmarks(&self) -> Result<Vec<Landmark>> {
        ApiClient::list_landmarks(self).await
    }

    async fn list_landmark_folders(&self) -> Result<Vec<String>> {
        ApiClient::list_landmark_folders(self).await
    }

    async fn add_landmark(&self, name: &str) -> Result<Value> {
        ApiClient::add_landmark(self, name).await
    }

    async fn upload_image(&self, image: &ImageUpload) -> Result<UploadReceipt> {
        ApiClient::upload_image(self, image).await
    }

    async fn update_meta(&self, meta: &FeedbackMeta) -> Result<Value> {
        ApiClient::update_meta(self, meta).await
    }

    async fn chat_about_place(&self, place_name: &str, user_message: &str) -> Result<String> {
        ApiClient::chat_about_place(self, place_name, user_message).await
    }
}
