use super::ApiClient;
use crate::error::Result;
use crate::media::ImageUpload;
use geogenie_common::{recognize_response, RecognizeResponse};
use reqwest::multipart::{Form, Part};
use reqwest::Method;

impl ApiClient {
    /// `POST /recognize` with the photo as the `image` part and optional
    /// coordinates as text parts.
    pub async fn recognize(
        &self,
        image: &ImageUpload,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<RecognizeResponse> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;
        let mut form = Form::new().part("image", part);
        if let Some(lat) = latitude {
            form = form.text("latitude", lat.to_string());
        }
        if let Some(lng) = longitude {
            form = form.text("longitude", lng.to_string());
        }

        tracing::debug!(file = %image.file_name, ?latitude, ?longitude, "recognize");
        let payload = self
            .send("/recognize", self.request(Method::POST, "/recognize").multipart(form))
            .await?;
        Ok(recognize_response(&payload)?)
    }
}
