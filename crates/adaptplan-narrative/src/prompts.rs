//! Prompt text sent to the text-generation service.

/// Placeholder in [`NARRATIVE_USER_PROMPT`] replaced with the serialized payload.
pub const STRUCTURED_JSON_PLACEHOLDER: &str = "{structured_json}";

pub const NARRATIVE_TEMPERATURE: f64 = 0.2;
pub const CHAT_TEMPERATURE: f64 = 0.3;

pub const SYSTEM_NARRATIVE: &str = "You are an ABA plan narrator. 
- You MUST NOT invent therapy targets. 
- Convert provided structured plan into a warm, parent-friendly narrative.
- Do NOT make medical claims or guarantees.
- Keep tone supportive and clear.
OUTPUT MUST BE VALID JSON ONLY and match the provided JSON schema keys exactly.
";

pub const NARRATIVE_USER_PROMPT: &str = "Create a one-week narrative plan for the child based on this structured data:

STRUCTURED_PLAN_JSON:
{structured_json}

Constraints:
- overview: short paragraph (5–7 sentences) summarizing goals across domains.
- daily_schedule: 5 keys (Mon..Fri). For each day, list 3–5 concise activities referencing provided targets/activities.
- parent_tips: 4–6 bullet points with simple at-home practice ideas.
- cautions: 2–4 items about prompting fade, generalization, and avoiding over-prompting.

Return **JSON ONLY** for keys: overview, daily_schedule, parent_tips, cautions.
";

/// Seed system message of a tutor chat session.
pub const TUTOR_SESSION_SYSTEM: &str =
    "You are a concise ABA tutor assistant. Avoid medical claims and guarantees.";

/// First assistant message shown in a tutor chat session.
pub const TUTOR_GREETING: &str =
    "Hi! Ask me about greeting practice, requesting, or play ideas based on today's levels.";

/// System prompt sent with each tutor question.
pub const TUTOR_SYSTEM: &str = "You are an ABA tutor. ONLY use the provided structured plan content. No medical claims, no guarantees. Keep answers actionable and short.";

/// Substitute the serialized payload into the template's placeholder.
///
/// Only the first occurrence is replaced, so payload text that happens to
/// contain the placeholder is left alone.
pub fn render_user_prompt(template: &str, structured_json: &str) -> String {
    template.replacen(STRUCTURED_JSON_PLACEHOLDER, structured_json, 1)
}

/// User message for a tutor question.
pub fn tutor_question(structured_json: &str, question: &str) -> String {
    format!("STRUCTURED_PLAN:{structured_json}\n\nQuestion: {question}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_one_placeholder() {
        assert_eq!(
            NARRATIVE_USER_PROMPT
                .matches(STRUCTURED_JSON_PLACEHOLDER)
                .count(),
            1
        );
    }

    #[test]
    fn renders_payload_once() {
        let rendered = render_user_prompt(NARRATIVE_USER_PROMPT, r#"{"note":"{structured_json}"}"#);
        assert!(rendered.contains("STRUCTURED_PLAN_JSON:\n{\"note\":\"{structured_json}\"}\n"));
        assert!(rendered.ends_with("cautions.\n"));
    }

    #[test]
    fn formats_tutor_question() {
        assert_eq!(
            tutor_question("{}", "What should we do Monday?"),
            "STRUCTURED_PLAN:{}\n\nQuestion: What should we do Monday?"
        );
    }
}
