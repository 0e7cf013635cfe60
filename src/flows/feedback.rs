//! Feedback submission
//!
//! Two phases, strictly ordered:
//! 1. upload the image, which must yield a server-assigned `image_id`
//! 2. attach landmark name, description and coordinates to that id
//!
//! Phase 2 is never attempted without an id from phase 1. When phase 2
//! fails the uploaded image stays on the server; the form remembers its id
//! so the next submit only retries phase 2.

use super::scope::ScreenScope;
use crate::api::GeoApi;
use crate::error::{GeoError, Result};
use crate::media::{self, ImageUpload};
use geogenie_common::{
    filter_landmarks, notice, suggest, Coordinates, FeedbackMeta, Notice, Suggestion,
};

#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    image: Option<ImageUpload>,
    known_landmarks: Vec<String>,
    search: String,
    filtered: Vec<String>,
    selected: Option<String>,
    description: String,
    latitude: String,
    longitude: String,
    loading: bool,
    uploaded_image_id: Option<String>,
    scroll_to_top: bool,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    /// Set or replace the photo. Replacing one photo with a different one
    /// needs a fresh upload; attaching a photo to a resumed upload does not.
    pub fn set_image(&mut self, image: Option<ImageUpload>) {
        let replaced = match (&self.image, &image) {
            (Some(old), Some(new)) => old.path != new.path || old.bytes != new.bytes,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if replaced {
            self.uploaded_image_id = None;
        }
        self.image = image;
    }

    /// Continue a submission whose image is already on the server.
    pub fn resume_upload(&mut self, image_id: impl Into<String>) {
        self.uploaded_image_id = Some(image_id.into());
    }

    pub fn uploaded_image_id(&self) -> Option<&str> {
        self.uploaded_image_id.as_deref()
    }

    pub fn known_landmarks(&self) -> &[String] {
        &self.known_landmarks
    }

    pub fn set_known_landmarks(&mut self, names: Vec<String>) {
        self.known_landmarks = names;
        self.refilter();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Typing in the search box drops any selection.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.selected = None;
        self.refilter();
    }

    pub fn filtered(&self) -> &[String] {
        &self.filtered
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Pick a name from the dropdown.
    pub fn select(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.search = name.clone();
        self.selected = Some(name);
        self.filtered.clear();
    }

    /// Accept the typed text as a new landmark. Only offered when nothing
    /// matches; returns whether the selection was made.
    pub fn use_new_landmark(&mut self) -> bool {
        match self.suggestion() {
            Suggestion::CreateNew(name) => {
                self.selected = Some(name);
                self.filtered.clear();
                true
            }
            _ => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.refilter();
    }

    /// Whether the selection is not among the known landmarks.
    pub fn is_new_landmark(&self) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|s| !self.known_landmarks.iter().any(|k| k == s))
    }

    pub fn suggestion(&self) -> Suggestion {
        suggest(&self.filtered, &self.search, self.selected.is_some())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    pub fn coordinates(&self) -> (&str, &str) {
        (&self.latitude, &self.longitude)
    }

    pub fn set_latitude(&mut self, text: impl Into<String>) {
        self.latitude = text.into();
    }

    pub fn set_longitude(&mut self, text: impl Into<String>) {
        self.longitude = text.into();
    }

    pub fn set_location(&mut self, location: Coordinates) {
        let (lat, lng) = location.to_form_strings();
        self.latitude = lat;
        self.longitude = lng;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading && self.has_required_fields()
    }

    fn has_required_fields(&self) -> bool {
        self.selected.is_some() && (self.image.is_some() || self.uploaded_image_id.is_some())
    }

    /// Back to an empty form. The landmark list is kept.
    pub fn reset(&mut self) {
        *self = Self {
            known_landmarks: std::mem::take(&mut self.known_landmarks),
            scroll_to_top: true,
            ..Self::default()
        };
    }

    /// Consume a pending "scroll back to the top" request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }

    fn refilter(&mut self) {
        self.filtered = filter_landmarks(&self.known_landmarks, &self.search);
    }

    fn meta(&self, image_id: &str, landmark_name: &str) -> FeedbackMeta {
        let optional = |text: &str| (!text.is_empty()).then(|| text.to_string());
        FeedbackMeta {
            image_id: image_id.to_string(),
            landmark_name: landmark_name.to_string(),
            description: optional(&self.description),
            latitude: optional(&self.latitude),
            longitude: optional(&self.longitude),
        }
    }
}

#[derive(Debug)]
pub enum FeedbackOutcome {
    Submitted { image_id: String, notice: Notice },
    /// Photo or landmark missing; nothing was sent.
    Rejected(Notice),
    /// Phase 1 failed or returned no id; phase 2 was not attempted.
    UploadFailed { error: GeoError, notice: Notice },
    /// Phase 2 failed after the image was stored under `image_id`.
    MetadataFailed { image_id: String, error: GeoError, notice: Notice },
    Busy,
    Cancelled,
}

impl FeedbackOutcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            FeedbackOutcome::Submitted { notice, .. }
            | FeedbackOutcome::Rejected(notice)
            | FeedbackOutcome::UploadFailed { notice, .. }
            | FeedbackOutcome::MetadataFailed { notice, .. } => Some(notice),
            FeedbackOutcome::Busy | FeedbackOutcome::Cancelled => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, FeedbackOutcome::Submitted { .. })
    }
}

enum PhaseError {
    Upload(GeoError),
    Metadata(String, GeoError),
}

pub struct FeedbackFlow<'a> {
    api: &'a dyn GeoApi,
    scope: ScreenScope,
}

impl<'a> FeedbackFlow<'a> {
    pub fn new(api: &'a dyn GeoApi, scope: ScreenScope) -> Self {
        Self { api, scope }
    }

    pub fn scope(&self) -> &ScreenScope {
        &self.scope
    }

    /// Fetch landmark names for autocomplete.
    pub async fn load_landmarks(&self, form: &mut FeedbackForm) -> Result<usize> {
        let names = self.scope.run(self.api.list_landmark_folders()).await?;
        let count = names.len();
        form.set_known_landmarks(names);
        tracing::debug!(count, "landmark names loaded");
        Ok(count)
    }

    /// Fill the coordinates from the selected photo's GPS data.
    pub fn locate_from_photo(&self, form: &mut FeedbackForm) -> std::result::Result<Coordinates, Notice> {
        let path = form
            .image()
            .map(|image| image.path.clone())
            .ok_or_else(|| Notice::error(notice::PERMISSION_DENIED))?;

        match media::location_from_photo(&path) {
            Ok(location) => {
                form.set_location(location);
                Ok(location)
            }
            Err(error) => {
                tracing::warn!(%error, "no location available");
                Err(Notice::error(notice::PERMISSION_DENIED))
            }
        }
    }

    pub async fn submit(&self, form: &mut FeedbackForm) -> FeedbackOutcome {
        if form.is_loading() {
            return FeedbackOutcome::Busy;
        }
        let Some(landmark) = form.selected.clone().filter(|_| form.has_required_fields()) else {
            return FeedbackOutcome::Rejected(Notice::error(notice::FEEDBACK_PRECONDITION));
        };

        form.loading = true;
        let result = self.run_phases(form, &landmark).await;
        form.loading = false;

        match result {
            Ok(image_id) => {
                tracing::info!(%image_id, landmark = %landmark, "feedback submitted");
                form.reset();
                FeedbackOutcome::Submitted {
                    image_id,
                    notice: Notice::info(notice::FEEDBACK_THANKS),
                }
            }
            Err(PhaseError::Upload(GeoError::Cancelled))
            | Err(PhaseError::Metadata(_, GeoError::Cancelled)) => FeedbackOutcome::Cancelled,
            Err(PhaseError::Upload(error)) => {
                tracing::warn!(%error, "feedback image upload failed");
                FeedbackOutcome::UploadFailed {
                    error,
                    notice: Notice::error(notice::FEEDBACK_FAILED),
                }
            }
            Err(PhaseError::Metadata(image_id, error)) => {
                tracing::warn!(%image_id, %error, "feedback metadata failed; image kept for retry");
                FeedbackOutcome::MetadataFailed {
                    image_id,
                    error,
                    notice: Notice::error(notice::FEEDBACK_FAILED),
                }
            }
        }
    }

    async fn run_phases(
        &self,
        form: &mut FeedbackForm,
        landmark: &str,
    ) -> std::result::Result<String, PhaseError> {
        let image_id = match form.uploaded_image_id.clone() {
            Some(id) => {
                tracing::debug!(image_id = %id, "reusing uploaded image");
                id
            }
            None => {
                let image = form
                    .image
                    .as_ref()
                    .ok_or(PhaseError::Upload(GeoError::InvalidInput("no image selected".into())))?;
                let receipt = self
                    .scope
                    .run(self.api.upload_image(image))
                    .await
                    .map_err(PhaseError::Upload)?;
                let id = receipt
                    .image_id
                    .ok_or(PhaseError::Upload(GeoError::MissingField("image_id")))?;
                form.uploaded_image_id = Some(id.clone());
                id
            }
        };

        let meta = form.meta(&image_id, landmark);
        self.scope
            .run(self.api.update_meta(&meta))
            .await
            .map_err(|error| PhaseError::Metadata(image_id.clone(), error))?;

        Ok(image_id)
    }
}
