use super::ApiClient;
use crate::error::Result;
use crate::media::ImageUpload;
use geogenie_common::FeedbackMeta;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;

/// Answer to the image upload phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadReceipt {
    /// Server-assigned id; `None` when the payload carried no usable id.
    pub image_id: Option<String>,
    pub payload: Value,
}

impl UploadReceipt {
    pub fn from_payload(payload: Value) -> Self {
        Self {
            image_id: geogenie_common::image_id(&payload),
            payload,
        }
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            payload: serde_json::json!({ "image_id": id }),
            image_id: Some(id),
        }
    }
}

impl ApiClient {
    /// `POST /feedback/upload` with the image as the `file` part.
    pub async fn upload_image(&self, image: &ImageUpload) -> Result<UploadReceipt> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;
        let form = Form::new().part("file", part);

        tracing::debug!(file = %image.file_name, mime = %image.mime, "upload feedback image");
        let payload = self
            .send(
                "/feedback/upload",
                self.request(Method::POST, "/feedback/upload").multipart(form),
            )
            .await?;
        Ok(UploadReceipt::from_payload(payload))
    }

    /// `POST /feedback/meta`: attach metadata to an uploaded image.
    pub async fn update_meta(&self, meta: &FeedbackMeta) -> Result<Value> {
        let form = meta
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        tracing::debug!(image_id = %meta.image_id, landmark = %meta.landmark_name, "attach feedback metadata");
        self.send(
            "/feedback/meta",
            self.request(Method::POST, "/feedback/meta").multipart(form),
        )
        .await
    }
}
