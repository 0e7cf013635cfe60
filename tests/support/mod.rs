//! Scripted backend for flow tests
//!
//! Each operation pops its next answer from a queue; an empty queue answers
//! with a 500. Every call is recorded in order.

#![allow(dead_code)]

use async_trait::async_trait;
use geogenie::api::{GeoApi, UploadReceipt};
use geogenie::error::{GeoError, Result};
use geogenie::media::ImageUpload;
use geogenie_common::{FeedbackMeta, Landmark, RecognizeResponse};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Register(String),
    Me,
    Recognize { file: String, latitude: Option<f64>, longitude: Option<f64> },
    ListLandmarks,
    ListFolders,
    AddLandmark(String),
    UploadImage(String),
    UpdateMeta(FeedbackMeta),
    Chat { place: String, message: String },
}

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    hang: AtomicBool,
    pub recognize: Mutex<VecDeque<Result<RecognizeResponse>>>,
    pub folders: Mutex<VecDeque<Result<Vec<String>>>>,
    pub uploads: Mutex<VecDeque<Result<UploadReceipt>>>,
    pub metas: Mutex<VecDeque<Result<Value>>>,
    pub chats: Mutex<VecDeque<Result<String>>>,
}

pub fn server_error() -> GeoError {
    GeoError::Status {
        status: 500,
        body: "Internal Server Error".into(),
    }
}

fn next<T>(queue: &Mutex<VecDeque<Result<T>>>) -> Result<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(server_error()))
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests never complete until cancelled.
    pub fn hanging() -> Self {
        let api = Self::default();
        api.hang.store(true, Ordering::SeqCst);
        api
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn push_recognize(&self, result: Result<RecognizeResponse>) -> &Self {
        self.recognize.lock().unwrap().push_back(result);
        self
    }

    pub fn push_folders(&self, result: Result<Vec<String>>) -> &Self {
        self.folders.lock().unwrap().push_back(result);
        self
    }

    pub fn push_upload(&self, result: Result<UploadReceipt>) -> &Self {
        self.uploads.lock().unwrap().push_back(result);
        self
    }

    pub fn push_meta(&self, result: Result<Value>) -> &Self {
        self.metas.lock().unwrap().push_back(result);
        self
    }

    pub fn push_chat(&self, result: Result<String>) -> &Self {
        self.chats.lock().unwrap().push_back(result);
        self
    }

    async fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }
}

pub fn response(place: &str, confidence: f64) -> RecognizeResponse {
    RecognizeResponse {
        place_name: place.into(),
        confidence,
        source: "db".into(),
    }
}

pub fn photo(name: &str) -> ImageUpload {
    ImageUpload::new(format!("/photos/{}", name), vec![0xFF, 0xD8, 0xFF, 0xE0])
}

#[async_trait]
impl GeoApi for FakeApi {
    async fn login(&self, username: &str, _password: &str) -> Result<Value> {
        self.record(Call::Login(username.into())).await;
        Ok(serde_json::json!({ "access_token": "t" }))
    }

    async fn register(&self, username: &str, _password: &str) -> Result<Value> {
        self.record(Call::Register(username.into())).await;
        Ok(Value::Null)
    }

    async fn me(&self) -> Result<Value> {
        self.record(Call::Me).await;
        Ok(Value::Null)
    }

    async fn recognize(
        &self,
        image: &ImageUpload,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<RecognizeResponse> {
        self.record(Call::Recognize {
            file: image.file_name.clone(),
            latitude,
            longitude,
        })
        .await;
        next(&self.recognize)
    }

    async fn list_landmarks(&self) -> Result<Vec<Landmark>> {
        self.record(Call::ListLandmarks).await;
        Ok(Vec::new())
    }

    async fn list_landmark_folders(&self) -> Result<Vec<String>> {
        self.record(Call::ListFolders).await;
        next(&self.folders)
    }

    async fn add_landmark(&self, name: &str) -> Result<Value> {
        self.record(Call::AddLandmark(name.into())).await;
        Ok(Value::Null)
    }

    async fn upload_image(&self, image: &ImageUpload) -> Result<UploadReceipt> {
        self.record(Call::UploadImage(image.file_name.clone())).await;
        next(&self.uploads)
    }

    async fn update_meta(&self, meta: &FeedbackMeta) -> Result<Value> {
        self.record(Call::UpdateMeta(meta.clone())).await;
        next(&self.metas)
    }

    async fn chat_about_place(&self, place_name: &str, user_message: &str) -> Result<String> {
        self.record(Call::Chat {
            place: place_name.into(),
            message: user_message.into(),
        })
        .await;
        next(&self.chats)
    }
}
