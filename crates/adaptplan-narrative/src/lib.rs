pub mod chat;
pub mod config;
pub mod errors;
pub mod fallback;
pub mod generator;
pub mod model;
pub mod openai;
pub mod prompts;
pub mod render;
pub mod schema;
pub mod transport;
pub mod validate;

pub use chat::ChatSession;
pub use config::ServiceConfig;
pub use errors::{NarrativeError, NarrativeRejection, Result, TransportError};
pub use fallback::fallback_narrative;
pub use generator::NarrativeGenerator;
pub use model::{NarrativePlan, PlanPackage, WEEKDAYS};
pub use openai::OpenAiClient;
pub use render::render_markdown;
pub use schema::narrative_json_schema;
pub use transport::{ChatMessage, ChatRequest, ChatTransport, Role};
pub use validate::{SchedulePolicy, check_schedule_bounds, parse_narrative};
