mod config;
mod input;
mod logging;
mod output;

use std::path::{Path, PathBuf};
use std::time::Instant;

use adaptplan_core::Error as CoreError;
use adaptplan_narrative::{
    ChatSession, NarrativeError, NarrativeGenerator, OpenAiClient, TransportError,
    narrative_json_schema, render_markdown,
};
use adaptplan_plan::{
    PlanError, RuleTable, RuleTableError, WeeklyPlan, check_rule_table, compose,
    narrative_payload_json_schema, rule_table_json_schema, weekly_plan_json_schema,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use config::{AppConfig, load_config};
use input::PlanInputArgs;
use logging::init_logging;
use output::emit;

#[derive(Debug, Error)]
enum CliError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("rule table error: {0}")]
    Rules(#[from] RuleTableError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("narrative error: {0}")]
    Narrative(#[from] NarrativeError),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("render error: {0}")]
    Render(#[from] std::fmt::Error),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("rule table check failed with {0} error(s)")]
    RuleCheckFailed(usize),
}

#[derive(Parser, Debug)]
#[command(name = "adaptplan", version, about = "Rules-first weekly ABA plan builder")]
struct Cli {
    /// TOML config file. Defaults to ./adaptplan.toml when present.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Append JSON logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose the deterministic weekly plan.
    Plan(PlanArgs),
    /// Compose a plan and add a parent-facing narrative.
    Narrate(NarrateArgs),
    /// Ask the tutor assistant a question about a plan.
    Chat(ChatArgs),
    /// Rule table maintenance.
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
    /// Print a JSON Schema.
    Schema {
        #[arg(value_enum)]
        target: SchemaTarget,
    },
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    input: PlanInputArgs,
    /// Write the plan here instead of stdout.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct NarrateArgs {
    #[command(flatten)]
    input: PlanInputArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Write the package here instead of stdout.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ChatArgs {
    #[command(flatten)]
    input: PlanInputArgs,
    #[arg(long)]
    question: String,
}

#[derive(Subcommand, Debug)]
enum RulesCommand {
    /// Report missing combinations and content problems.
    Check {
        #[arg(long, value_name = "PATH")]
        rules: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Markdown,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaTarget {
    WeeklyPlan,
    /// Payload sent to the narrative service.
    Payload,
    Narrative,
    RuleTable,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Plan(args) => run_plan(&config, args),
        Command::Narrate(args) => run_narrate(&config, args).await,
        Command::Chat(args) => run_chat(&config, args).await,
        Command::Rules {
            command: RulesCommand::Check { rules },
        } => run_rules_check(&config, rules.as_deref()),
        Command::Schema { target } => run_schema(target),
    }
}

fn load_rules(config: &AppConfig, explicit: Option<&Path>) -> Result<RuleTable, CliError> {
    let path = explicit.unwrap_or(&config.rules_path);
    let table = RuleTable::from_path(path)?;
    tracing::info!(
        event = "rules_loaded",
        path = %path.display(),
        domains = table.domains().len()
    );
    Ok(table)
}

fn build_plan(config: &AppConfig, input: PlanInputArgs) -> Result<WeeklyPlan, CliError> {
    let rules = load_rules(config, input.rules.as_deref())?;
    let week_of = input.week_of();
    let levels = input.levels.levels();
    let child = input.child.into_profile()?;

    let plan = compose(child, levels, &rules, week_of)?;
    tracing::info!(
        event = "plan_composed",
        week_of = %plan.week_of(),
        safety_flags = plan.safety_flags().len()
    );
    for flag in plan.safety_flags() {
        tracing::warn!(event = "safety_flag", flag = %flag);
    }
    Ok(plan)
}

fn run_plan(config: &AppConfig, args: PlanArgs) -> Result<(), CliError> {
    let plan = build_plan(config, args.input)?;
    emit(args.out.as_deref(), &serde_json::to_string_pretty(&plan)?)
}

async fn run_narrate(config: &AppConfig, args: NarrateArgs) -> Result<(), CliError> {
    let plan = build_plan(config, args.input)?;
    let client = OpenAiClient::from_config(&config.narrative)?;
    let generator = NarrativeGenerator::new(client, config.narrative.model.clone())
        .with_policy(config.narrative.schedule_policy);

    let timer = Instant::now();
    let package = generator.narrate(plan).await?;
    tracing::info!(
        event = "narrate_finished",
        duration_ms = timer.elapsed().as_millis() as u64
    );

    let content = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&package)?,
        OutputFormat::Markdown => render_markdown(&package)?,
    };
    emit(args.out.as_deref(), &content)
}

async fn run_chat(config: &AppConfig, args: ChatArgs) -> Result<(), CliError> {
    let plan = build_plan(config, args.input)?;
    let client = OpenAiClient::from_config(&config.narrative)?;

    let mut session = ChatSession::new();
    let answer = session
        .ask(&client, &config.narrative.model, &plan, &args.question)
        .await?;
    emit(None, &answer)
}

fn run_rules_check(config: &AppConfig, rules: Option<&Path>) -> Result<(), CliError> {
    let table = load_rules(config, rules)?;
    let report = check_rule_table(&table);
    emit(None, &serde_json::to_string_pretty(&report)?)?;

    if report.is_ok() {
        tracing::info!(event = "rules_checked", warnings = report.warnings.len());
        Ok(())
    } else {
        Err(CliError::RuleCheckFailed(report.errors.len()))
    }
}

fn run_schema(target: SchemaTarget) -> Result<(), CliError> {
    emit(None, &schema_json(target)?)
}

fn schema_json(target: SchemaTarget) -> Result<String, CliError> {
    let schema = match target {
        SchemaTarget::WeeklyPlan => weekly_plan_json_schema(),
        SchemaTarget::Payload => narrative_payload_json_schema(),
        SchemaTarget::Narrative => narrative_json_schema(),
        SchemaTarget::RuleTable => rule_table_json_schema(),
    };
    Ok(serde_json::to_string_pretty(&schema)?)
}
