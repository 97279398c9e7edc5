use adaptplan_plan::{WeeklyPlan, to_request_payload};
use tracing::info;

use crate::errors::Result;
use crate::prompts::{
    CHAT_TEMPERATURE, TUTOR_GREETING, TUTOR_SESSION_SYSTEM, TUTOR_SYSTEM, tutor_question,
};
use crate::transport::{ChatMessage, ChatRequest, ChatTransport};

/// Caller-owned tutor conversation.
///
/// The history is for display. Each question is sent on its own with the
/// current plan as context, so earlier turns never reach the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![
                ChatMessage::system(TUTOR_SESSION_SYSTEM),
                ChatMessage::assistant(TUTOR_GREETING),
            ],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Ask a question about `plan`. The answer is trimmed before it is returned.
    ///
    /// History is only extended when the service answers.
    pub async fn ask<T: ChatTransport + ?Sized>(
        &mut self,
        transport: &T,
        model: &str,
        plan: &WeeklyPlan,
        question: &str,
    ) -> Result<String> {
        let snippet = to_request_payload(plan).to_json()?;
        let request = ChatRequest {
            model: model.to_string(),
            temperature: CHAT_TEMPERATURE,
            json_object: false,
            messages: vec![
                ChatMessage::system(TUTOR_SYSTEM),
                ChatMessage::user(tutor_question(&snippet, question)),
            ],
        };

        info!(event = "chat_requested", model = %model, turns = self.messages.len());
        let answer = transport.complete(request).await?.trim().to_string();

        self.messages.push(ChatMessage::user(question));
        self.messages.push(ChatMessage::assistant(answer.clone()));
        Ok(answer)
    }
}
