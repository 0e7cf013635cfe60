//! GeoGenie Common Library
//!
//! Types and presentation logic shared by every GeoGenie front-end.
//! Nothing here performs I/O.

pub mod autocomplete;
pub mod error;
pub mod markup;
pub mod naming;
pub mod notice;
pub mod parser;
pub mod types;
pub mod view;

pub use autocomplete::{filter_landmarks, suggest, Suggestion};
pub use error::{Error, Result};
pub use naming::{beautify_name, format_confidence, is_unknown, UNKNOWN_PLACE};
pub use notice::{Notice, NoticeLevel};
pub use parser::{access_token, chat_reply_text, image_id, landmark_names, landmarks, recognize_response};
pub use types::{ChatMessage, ChatRole, Coordinates, FeedbackMeta, Landmark, RecognizeResponse};
pub use view::{RecognitionHandoff, RecognitionView, ResultAction};
