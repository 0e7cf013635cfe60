//! Recognition result card
//!
//! View model for the screen shown after a recognition upload. A match
//! offers Yes (chat about the place) and No (send feedback); a miss
//! offers only Add Info.

use crate::naming::{beautify_name, format_confidence, is_unknown, UNKNOWN_PLACE};
use crate::types::RecognizeResponse;
use serde::{Deserialize, Serialize};

/// Parameters handed from the capture screen to the result screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionHandoff {
    /// Raw place name as returned by the recognizer.
    pub place: String,
    pub confidence: f64,
    pub source: String,
    /// Reference to the uploaded image.
    pub image: String,
}

impl RecognitionHandoff {
    pub fn new(response: &RecognizeResponse, image: impl Into<String>) -> Self {
        Self {
            place: response.place_name.clone(),
            confidence: response.confidence,
            source: response.source.clone(),
            image: image.into(),
        }
    }
}

/// Actions available on the result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultAction {
    /// "Yes": open chat about the beautified place name.
    ConfirmChat(String),
    /// "No": the match is wrong, go to feedback.
    Reject,
    /// "Add Info": nothing matched, go to feedback.
    AddInfo,
}

impl ResultAction {
    pub fn label(&self) -> &'static str {
        match self {
            ResultAction::ConfirmChat(_) => "Yes",
            ResultAction::Reject => "No",
            ResultAction::AddInfo => "Add Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionView {
    pub title: &'static str,
    pub place: String,
    pub confidence: Option<String>,
    pub question: &'static str,
    pub image: String,
    pub source: String,
    pub actions: Vec<ResultAction>,
}

impl RecognitionView {
    pub fn from_handoff(handoff: &RecognitionHandoff) -> Self {
        if is_unknown(&handoff.place) || handoff.place.trim().is_empty() {
            return Self {
                title: "No Match Found",
                place: UNKNOWN_PLACE.to_string(),
                confidence: None,
                question: "Would you like to help us identify it?",
                image: handoff.image.clone(),
                source: handoff.source.clone(),
                actions: vec![ResultAction::AddInfo],
            };
        }

        let pretty = beautify_name(&handoff.place);
        Self {
            title: "We Found a Match!",
            place: pretty.clone(),
            confidence: Some(format!("Confidence: {}", format_confidence(handoff.confidence))),
            question: "Is this correct?",
            image: handoff.image.clone(),
            source: handoff.source.clone(),
            actions: vec![ResultAction::ConfirmChat(pretty), ResultAction::Reject],
        }
    }

    pub fn is_match(&self) -> bool {
        self.actions
            .iter()
            .any(|a| matches!(a, ResultAction::ConfirmChat(_)))
    }
}
