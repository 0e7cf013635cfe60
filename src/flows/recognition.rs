//! Capture → upload → result hand-off
//!
//! idle → uploading → { result card, or "Upload failed" and back to idle }.
//! A failed upload only clears the uploading flag; nothing is retried.

use super::scope::ScreenScope;
use crate::api::GeoApi;
use crate::error::GeoError;
use crate::media::{self, ImageUpload};
use crate::store::GeoStore;
use geogenie_common::{
    beautify_name, notice, Coordinates, Landmark, Notice, RecognitionHandoff,
};
use std::path::Path;

#[derive(Debug)]
pub enum RecognitionOutcome {
    /// Show the result card with these parameters.
    Recognized(RecognitionHandoff),
    Failed { error: GeoError, notice: Notice },
    /// An upload is already in flight on this screen.
    Busy,
    Cancelled,
}

impl RecognitionOutcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            RecognitionOutcome::Failed { notice, .. } => Some(notice),
            _ => None,
        }
    }
}

pub struct RecognitionFlow<'a> {
    api: &'a dyn GeoApi,
    scope: ScreenScope,
}

impl<'a> RecognitionFlow<'a> {
    pub fn new(api: &'a dyn GeoApi, scope: ScreenScope) -> Self {
        Self { api, scope }
    }

    pub fn scope(&self) -> &ScreenScope {
        &self.scope
    }

    /// Read the photo at `path` and upload it.
    pub async fn upload_path(
        &self,
        store: &mut GeoStore,
        path: &Path,
        location: Option<Coordinates>,
    ) -> RecognitionOutcome {
        match media::load_image(path).await {
            Ok(image) => self.upload(store, &image, location).await,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "could not read photo");
                RecognitionOutcome::Failed {
                    error,
                    notice: Notice::error(notice::UPLOAD_FAILED),
                }
            }
        }
    }

    pub async fn upload(
        &self,
        store: &mut GeoStore,
        image: &ImageUpload,
        location: Option<Coordinates>,
    ) -> RecognitionOutcome {
        if store.is_uploading() {
            return RecognitionOutcome::Busy;
        }

        store.set_uploading(true);
        let result = self
            .scope
            .run(self.api.recognize(
                image,
                location.map(|c| c.latitude),
                location.map(|c| c.longitude),
            ))
            .await;
        store.set_uploading(false);

        match result {
            Ok(response) => {
                let handoff = RecognitionHandoff::new(&response, image.uri());
                tracing::info!(
                    place = %response.place_name,
                    confidence = response.confidence,
                    source = %response.source,
                    "recognized"
                );

                store.clear();
                store.set_image(Some(image.uri()));
                if !response.is_unknown() {
                    store.set_landmark(Some(Landmark {
                        id: response.place_name.clone(),
                        name: beautify_name(&response.place_name),
                        image: image.uri(),
                        confidence: response.confidence * 100.0,
                        description: String::new(),
                    }));
                }

                RecognitionOutcome::Recognized(handoff)
            }
            Err(GeoError::Cancelled) => RecognitionOutcome::Cancelled,
            Err(error) => {
                tracing::warn!(%error, "recognition upload failed");
                RecognitionOutcome::Failed {
                    error,
                    notice: Notice::error(notice::UPLOAD_FAILED),
                }
            }
        }
    }
}
