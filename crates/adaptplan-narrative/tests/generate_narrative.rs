use std::path::PathBuf;
use std::sync::Mutex;

use adaptplan_core::{ChildProfile, ChildProfileDraft, Level, SkillLevels};
use adaptplan_narrative::{
    ChatRequest, ChatSession, ChatTransport, NarrativeError, NarrativeGenerator, NarrativePlan,
    Role, SchedulePolicy, TransportError, fallback_narrative, render_markdown,
};
use adaptplan_narrative::prompts::{
    NARRATIVE_USER_PROMPT, SYSTEM_NARRATIVE, TUTOR_GREETING, TUTOR_SYSTEM,
};
use adaptplan_plan::{RuleTable, WeeklyPlan, compose, to_request_payload};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

enum Reply {
    Body(String),
    Status(u16),
}

struct StubTransport {
    reply: Reply,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubTransport {
    fn body(body: impl Into<String>) -> Self {
        Self {
            reply: Reply::Body(body.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn status(status: u16) -> Self {
        Self {
            reply: Reply::Status(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for StubTransport {
    async fn complete(&self, request: ChatRequest) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status(status) => Err(TransportError::Api {
                status: *status,
                message: "stubbed failure".to_string(),
            }),
        }
    }
}

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn sample_plan() -> WeeklyPlan {
    let rules = RuleTable::from_path(&workspace_root().join("rules/rules.yaml")).unwrap();
    let mut draft = ChildProfileDraft::new("Sam", 6);
    draft.diagnosis = "Autism Spectrum Disorder".to_string();
    draft.strengths = vec!["visual schedules".to_string()];
    draft.preferences = vec!["trains".to_string()];
    draft.notes = Some("Sensitive to loud rooms".to_string());
    let child = ChildProfile::new(draft).unwrap();

    compose(
        child,
        SkillLevels::uniform(Level::Beginner),
        &rules,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
    .unwrap()
}

fn valid_body() -> serde_json::Value {
    json!({
        "overview": "Sam will practice greetings, requests, and train play this week.",
        "daily_schedule": {
            "Mon": ["Hello song", "Snack requests", "Train play"],
            "Tue": ["Wave game", "Bubble requests", "Track building"],
            "Wed": ["Peer hello", "Labeling hunt", "Train sharing"],
            "Thu": ["Greeting walk", "Choice board", "Turn-taking trains"],
            "Fri": ["Hello song", "Request review", "Free train play"]
        },
        "parent_tips": [
            "Greet Sam at the door each morning.",
            "Pause before handing over a train.",
            "Name trains as Sam plays.",
            "Take turns with the engine."
        ],
        "cautions": [
            "Fade prompts gradually.",
            "Practice in more than one room."
        ]
    })
}

async fn generate(
    transport: &StubTransport,
    policy: SchedulePolicy,
) -> adaptplan_narrative::Result<NarrativePlan> {
    let payload = to_request_payload(&sample_plan());
    NarrativeGenerator::new(transport, "gpt-4o-mini")
        .with_policy(policy)
        .generate(&payload, SYSTEM_NARRATIVE, NARRATIVE_USER_PROMPT)
        .await
}

#[tokio::test]
async fn non_json_body_returns_fallback() {
    let transport = StubTransport::body("Sure! Here is a lovely plan for Sam.");
    let narrative = generate(&transport, SchedulePolicy::Lenient).await.unwrap();
    assert_eq!(narrative, fallback_narrative());
}

#[tokio::test]
async fn missing_cautions_returns_fallback() {
    let mut body = valid_body();
    body.as_object_mut().unwrap().remove("cautions");
    let transport = StubTransport::body(body.to_string());

    let narrative = generate(&transport, SchedulePolicy::Lenient).await.unwrap();
    assert_eq!(narrative, fallback_narrative());
}

#[tokio::test]
async fn valid_body_passes_through() {
    let transport = StubTransport::body(valid_body().to_string());
    let narrative = generate(&transport, SchedulePolicy::Strict).await.unwrap();

    assert_eq!(narrative.day("Mon")[2], "Train play");
    assert_eq!(narrative.parent_tips.len(), 4);
    assert_ne!(narrative, fallback_narrative());
}

#[tokio::test]
async fn request_is_shaped_for_json_narrative() {
    let transport = StubTransport::body(valid_body().to_string());
    generate(&transport, SchedulePolicy::Lenient).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.model, "gpt-4o-mini");
    assert!(request.json_object);
    assert!((request.temperature - 0.2).abs() < f64::EPSILON);
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, Role::System);
    assert_eq!(request.messages[0].content, SYSTEM_NARRATIVE);
    assert_eq!(request.messages[1].role, Role::User);

    let payload_json = to_request_payload(&sample_plan()).to_json().unwrap();
    let user = &request.messages[1].content;
    assert!(user.contains(&payload_json));
    assert!(!user.contains("{structured_json}"));
    assert!(!user.contains("Sensitive to loud rooms"));
}

#[tokio::test]
async fn strict_policy_falls_back_on_missing_weekday() {
    let mut body = valid_body();
    body["daily_schedule"].as_object_mut().unwrap().remove("Thu");

    let lenient = generate(&StubTransport::body(body.to_string()), SchedulePolicy::Lenient)
        .await
        .unwrap();
    assert!(lenient.day("Thu").is_empty());
    assert_ne!(lenient, fallback_narrative());

    let strict = generate(&StubTransport::body(body.to_string()), SchedulePolicy::Strict)
        .await
        .unwrap();
    assert_eq!(strict, fallback_narrative());
}

#[tokio::test]
async fn transport_failure_is_not_masked() {
    let transport = StubTransport::status(429);
    let err = generate(&transport, SchedulePolicy::Lenient).await.unwrap_err();
    match err {
        NarrativeError::Transport(inner) => assert!(inner.is_rate_limit()),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn narrate_packages_plan_and_renders() {
    let transport = StubTransport::body("not json");
    let generator = NarrativeGenerator::new(&transport, "gpt-4o-mini");
    let package = generator.narrate(sample_plan()).await.unwrap();

    assert_eq!(package.narrative, fallback_narrative());
    let markdown = render_markdown(&package).unwrap();
    assert!(markdown.contains("## Weekly Overview"));
    assert!(markdown.contains("### Fri\n\n- Generalization across settings"));
    assert!(!markdown.contains("## Safety Flags"));
}

#[tokio::test]
async fn chat_session_records_trimmed_answers() {
    let transport = StubTransport::body("  Try a hello song before snack.\n");
    let plan = sample_plan();
    let mut session = ChatSession::new();
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].content, TUTOR_GREETING);

    let answer = session
        .ask(&transport, "gpt-4o-mini", &plan, "What can we do Monday?")
        .await
        .unwrap();
    assert_eq!(answer, "Try a hello song before snack.");
    assert_eq!(session.messages().len(), 4);
    assert_eq!(session.messages()[2].role, Role::User);
    assert_eq!(session.messages()[3].content, answer);

    let request = &transport.requests()[0];
    assert!(!request.json_object);
    assert!((request.temperature - 0.3).abs() < f64::EPSILON);
    assert_eq!(request.messages[0].content, TUTOR_SYSTEM);
    assert!(request.messages[1].content.starts_with("STRUCTURED_PLAN:{"));
    assert!(request.messages[1].content.ends_with("\n\nQuestion: What can we do Monday?"));
}

#[tokio::test]
async fn chat_failure_leaves_history_untouched() {
    let transport = StubTransport::status(503);
    let mut session = ChatSession::new();
    let result = session
        .ask(&transport, "gpt-4o-mini", &sample_plan(), "Any tips?")
        .await;
    assert!(result.is_err());
    assert_eq!(session.messages().len(), 2);
}
