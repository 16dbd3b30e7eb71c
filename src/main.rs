//! Learning Compass operational CLI.
//!
//! A thin wrapper around the recommendation lifecycle for operators and
//! local debugging:
//!
//! ```bash
//! learning-compass status <student-id>     # classify the stored plan
//! learning-compass generate <student-id>   # run a full regeneration
//! ```
//!
//! All logs go to stderr; stdout carries the JSON result.

use learning_compass::analytics::RestAnalyticsAggregator;
use learning_compass::anthropic::{AnthropicClient, ClientConfig};
use learning_compass::config::Config;
use learning_compass::error::AppError;
use learning_compass::generation::PlanGenerator;
use learning_compass::lifecycle::{ActivePlan, LifecycleConfig, RecommendationLifecycle};
use learning_compass::storage::SqliteStorage;
use learning_compass::traits::RealTimeProvider;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let mut args = std::env::args().skip(1);
    let (command, student_id) = match (args.next(), args.next()) {
        (Some(command), Some(student_id)) => (command, student_id),
        _ => {
            eprintln!("Usage: learning-compass <status|generate> <student-id>");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&command, &student_id).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(command: &str, student_id: &str) -> Result<(), AppError> {
    let config = Config::from_env()?;

    let storage = SqliteStorage::new(&config.database_path).await?;
    let client = AnthropicClient::new(
        config.api_key.expose(),
        ClientConfig::default()
            .with_timeout_ms(config.request_timeout_ms)
            .with_model(&config.model),
    )?;
    let analytics =
        RestAnalyticsAggregator::new(&config.analytics_base_url, config.request_timeout_ms)?;

    let lifecycle = RecommendationLifecycle::new(
        storage,
        PlanGenerator::new(client, config.max_tokens),
        analytics,
        RealTimeProvider,
        LifecycleConfig::from_days(config.freshness_window_days),
    );

    match command {
        "status" => {
            let state = lifecycle.get_active_plan(student_id).await?;
            let next_eligible_at = lifecycle.next_eligible_at(student_id).await?;
            let summary = match &state {
                ActivePlan::NoPlan => serde_json::json!({
                    "state": "no_plan",
                    "next_eligible_at": next_eligible_at,
                }),
                ActivePlan::Fresh { record } => serde_json::json!({
                    "state": "fresh",
                    "record_id": record.id,
                    "created_at": record.created_at,
                    "next_eligible_at": next_eligible_at,
                    "plan": record.plan,
                }),
                ActivePlan::Stale {
                    record,
                    eligible_since,
                } => serde_json::json!({
                    "state": "stale",
                    "record_id": record.id,
                    "created_at": record.created_at,
                    "eligible_since": eligible_since,
                    "plan": record.plan,
                }),
            };
            print_json(&summary);
            Ok(())
        }
        "generate" => {
            let record = lifecycle.request_new_plan(student_id).await?;
            print_json(&serde_json::json!({
                "record_id": record.id,
                "created_at": record.created_at,
                "plan": record.plan,
            }));
            Ok(())
        }
        other => {
            eprintln!("Unknown command '{other}'. Use 'status' or 'generate'.");
            std::process::exit(2);
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => tracing::error!("Failed to render output: {e}"),
    }
}
