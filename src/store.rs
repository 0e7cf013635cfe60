//! Session state shared across screens
//!
//! Owned by the session and passed to each flow controller explicitly.
//! Only controllers mutate it.

use geogenie_common::{ChatMessage, ChatRole, Landmark};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoStore {
    current_image: Option<String>,
    current_landmark: Option<Landmark>,
    is_uploading: bool,
    chat: Vec<ChatMessage>,
}

impl GeoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_image(&self) -> Option<&str> {
        self.current_image.as_deref()
    }

    pub fn current_landmark(&self) -> Option<&Landmark> {
        self.current_landmark.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    pub fn set_image(&mut self, uri: Option<String>) {
        self.current_image = uri;
    }

    pub fn set_landmark(&mut self, landmark: Option<Landmark>) {
        self.current_landmark = landmark;
    }

    pub fn set_uploading(&mut self, uploading: bool) {
        self.is_uploading = uploading;
    }

    pub fn add_chat(&mut self, role: ChatRole, text: impl Into<String>) {
        self.chat.push(ChatMessage { role, text: text.into() });
    }

    /// Remove the message at `index`. Used by transcript policies that
    /// roll back an unconfirmed message.
    pub(crate) fn remove_chat(&mut self, index: usize) -> Option<ChatMessage> {
        (index < self.chat.len()).then(|| self.chat.remove(index))
    }

    /// Forget the image, landmark and transcript. The uploading flag is
    /// owned by the in-flight operation and left alone.
    pub fn clear(&mut self) {
        self.current_image = None;
        self.current_landmark = None;
        self.chat.clear();
    }
}
