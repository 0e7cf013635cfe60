//! Domain records shared by every front-end
//!
//! - Landmark: a recognized or user-chosen place
//! - ChatMessage: one bubble in a place chat transcript
//! - RecognizeResponse: payload of `POST /recognize`
//! - FeedbackMeta: metadata attached to an uploaded feedback image

use serde::{Deserialize, Serialize};

/// A named place the backend can recognize or collect feedback about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Landmark {
    pub id: String,
    pub name: String,
    /// Image reference (local path for recognized photos, URL for server records).
    pub image: String,
    /// Confidence score, 0-100.
    pub confidence: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into() }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Bot, text: text.into() }
    }

    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}

/// Recognition payload. `place_name` carries the `unknown_place` sentinel
/// when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizeResponse {
    pub place_name: String,
    /// Fraction in 0.0-1.0 as reported by the backend.
    pub confidence: f64,
    pub source: String,
}

impl RecognizeResponse {
    /// A blank place name is treated the same as the sentinel.
    pub fn is_unknown(&self) -> bool {
        self.place_name.trim().is_empty() || crate::naming::is_unknown(&self.place_name)
    }
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Six-decimal strings, the precision the feedback form stores.
    pub fn to_form_strings(&self) -> (String, String) {
        (format!("{:.6}", self.latitude), format!("{:.6}", self.longitude))
    }
}

/// Second phase of a feedback submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackMeta {
    pub image_id: String,
    pub landmark_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

impl FeedbackMeta {
    /// Multipart field list in submission order. Optional fields are
    /// omitted rather than sent empty.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("image_id", self.image_id.clone()),
            ("landmark_name", self.landmark_name.clone()),
        ];
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        if let Some(lat) = &self.latitude {
            fields.push(("latitude", lat.clone()));
        }
        if let Some(lng) = &self.longitude {
            fields.push(("longitude", lng.clone()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_deserialize_partial() {
        let json = r#"{"name": "Charminar", "confidence": 92.5}"#;
        let landmark: Landmark = serde_json::from_str(json).unwrap();
        assert_eq!(landmark.name, "Charminar");
        assert_eq!(landmark.confidence, 92.5);
        assert!(landmark.id.is_empty());
        assert!(landmark.description.is_empty());
    }

    #[test]
    fn test_chat_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::bot("hi")).unwrap();
        assert_eq!(json, r#"{"role":"bot","text":"hi"}"#);
    }

    #[test]
    fn test_recognize_response_unknown() {
        let resp: RecognizeResponse =
            serde_json::from_str(r#"{"place_name":"unknown_place","confidence":0}"#).unwrap();
        assert!(resp.is_unknown());
        assert_eq!(resp.source, "");

        let resp: RecognizeResponse = serde_json::from_str(
            r#"{"place_name":"golden_temple","confidence":0.91,"source":"model"}"#,
        )
        .unwrap();
        assert!(!resp.is_unknown());
    }

    #[test]
    fn test_coordinates_form_strings() {
        let (lat, lng) = Coordinates::new(17.3616078, 78.4746602).to_form_strings();
        assert_eq!(lat, "17.361608");
        assert_eq!(lng, "78.474660");
    }

    #[test]
    fn test_feedback_meta_skips_missing_fields() {
        let meta = FeedbackMeta {
            image_id: "42".into(),
            landmark_name: "Gateway of India".into(),
            latitude: Some("18.921984".into()),
            ..Default::default()
        };
        let names: Vec<&str> = meta.form_fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["image_id", "landmark_name", "latitude"]);
    }
}
