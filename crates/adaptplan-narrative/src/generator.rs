use adaptplan_plan::{NarrativePayload, WeeklyPlan, to_request_payload};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::Result;
use crate::fallback::fallback_narrative;
use crate::model::{NarrativePlan, PlanPackage};
use crate::prompts::{
    NARRATIVE_TEMPERATURE, NARRATIVE_USER_PROMPT, SYSTEM_NARRATIVE, render_user_prompt,
};
use crate::transport::{ChatMessage, ChatRequest, ChatTransport};
use crate::validate::{SchedulePolicy, parse_narrative};

/// Turns a structured plan into a parent-facing narrative.
///
/// Responses that fail to parse or validate are replaced by the fixed
/// fallback narrative, so callers always receive a usable plan. Transport
/// failures are returned as errors.
pub struct NarrativeGenerator<T> {
    transport: T,
    model: String,
    policy: SchedulePolicy,
}

impl<T: ChatTransport> NarrativeGenerator<T> {
    pub fn new(transport: T, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
            policy: SchedulePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SchedulePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn policy(&self) -> SchedulePolicy {
        self.policy
    }

    /// Request a narrative for `payload` using the given prompts.
    ///
    /// `template` must contain the `{structured_json}` placeholder.
    pub async fn generate(
        &self,
        payload: &NarrativePayload,
        system_prompt: &str,
        template: &str,
    ) -> Result<NarrativePlan> {
        let request_id = Uuid::new_v4();
        let user_prompt = render_user_prompt(template, &payload.to_json()?);

        info!(
            event = "narrative_requested",
            request_id = %request_id,
            model = %self.model,
            week_of = %payload.week_of
        );

        let request = ChatRequest {
            model: self.model.clone(),
            temperature: NARRATIVE_TEMPERATURE,
            json_object: true,
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
        };
        let content = self.transport.complete(request).await?;

        match parse_narrative(&content, self.policy) {
            Ok(narrative) => {
                info!(event = "narrative_validated", request_id = %request_id);
                Ok(narrative)
            }
            Err(rejection) => {
                warn!(
                    event = "narrative_fallback",
                    request_id = %request_id,
                    policy = ?self.policy,
                    reason = %rejection
                );
                Ok(fallback_narrative())
            }
        }
    }

    /// Narrate a weekly plan with the built-in prompts and package the result.
    pub async fn narrate(&self, plan: WeeklyPlan) -> Result<PlanPackage> {
        let payload = to_request_payload(&plan);
        let narrative = self
            .generate(&payload, SYSTEM_NARRATIVE, NARRATIVE_USER_PROMPT)
            .await?;
        Ok(PlanPackage::new(plan, narrative))
    }
}
