//! Flow controllers
//!
//! Each controller coordinates one screen's interaction with the backend.
//! Controllers borrow the API and receive the session [`GeoStore`] (or
//! their own form state) explicitly; none of them keeps global state.
//!
//! [`GeoStore`]: crate::store::GeoStore

pub mod chat;
pub mod feedback;
pub mod recognition;
pub mod scope;

pub use chat::{ChatFlow, ChatOutcome, ChatPhase, Optimistic, Transactional, TranscriptPolicy};
pub use feedback::{FeedbackFlow, FeedbackForm, FeedbackOutcome};
pub use recognition::{RecognitionFlow, RecognitionOutcome};
pub use scope::ScreenScope;
