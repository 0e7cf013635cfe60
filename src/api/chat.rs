use super::ApiClient;
use crate::error::Result;
use geogenie_common::chat_reply_text;
use reqwest::Method;

impl ApiClient {
    /// `POST /chat/place` with a URL-encoded `name` and `user_message`.
    ///
    /// Returns the nested `ai_response.text`, or `"No response."` when the
    /// payload has none.
    pub async fn chat_about_place(&self, place_name: &str, user_message: &str) -> Result<String> {
        tracing::debug!(place = place_name, message = user_message, "sending chat payload");
        let builder = self
            .request(Method::POST, "/chat/place")
            .form(&[("name", place_name), ("user_message", user_message)]);
        let payload = self.send("/chat/place", builder).await?;
        Ok(chat_reply_text(&payload))
    }
}
