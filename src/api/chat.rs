//! Assistant chat: the HTTP call, a local transcript and the widget's open state.

use crate::client::{ApiClient, ApiError, ApiRequest};
use crate::models::{ChatContext, ChatMessage, ChatRequest, ChatResponse, ChatRole};

impl ApiClient {
    pub async fn send_message(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.send(ApiRequest::post("/chat/message").json(request)?)
            .await
    }
}

/// The messages exchanged so far. Only completed exchanges are recorded.
#[derive(Debug, Clone, Default)]
pub struct ChatConversation {
    messages: Vec<ChatMessage>,
}

impl ChatConversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Sends `message` and, once the assistant answers, appends both turns.
    /// A failed call leaves the transcript unchanged.
    pub async fn send(
        &mut self,
        client: &ApiClient,
        message: &str,
        context: Option<ChatContext>,
    ) -> Result<&ChatMessage, ApiError> {
        let response = client
            .send_message(&ChatRequest {
                message: message.to_string(),
                context,
            })
            .await?;
        self.push(message, response.response);
        Ok(&self.messages[self.messages.len() - 1])
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn push(&mut self, question: &str, answer: String) {
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content: question.to_string(),
        });
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            content: answer,
        });
    }
}

/// Whether the floating chat window is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatVisibility {
    open: bool,
}

impl ChatVisibility {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }
}
