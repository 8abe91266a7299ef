//! Policy replay entry point
//!
//! Usage: `moviebot-policy [TURNS_FILE]`. Reads recorded dialogue states from
//! the file (or stdin) and prints the agent's acts for each turn, one JSON
//! array per line.

mod replay;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use moviebot_agent::DialoguePolicy;
use moviebot_config::{load_settings, Ontology, Settings};

use replay::TurnLog;

fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("MOVIEBOT_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        },
    };

    init_tracing(&settings);
    tracing::info!(
        environment = ?settings.environment,
        config_path = env.as_deref().unwrap_or("default"),
        "Configuration loaded"
    );

    let ontology = match Ontology::load(&settings.ontology_path) {
        Ok(ontology) => ontology,
        Err(e) => {
            tracing::warn!(
                path = %settings.ontology_path,
                error = %e,
                "Failed to load ontology, using the built-in movie ontology"
            );
            Ontology::default()
        },
    };

    let policy = DialoguePolicy::from_settings(&settings.policy, Arc::new(ontology))
        .context("Failed to build dialogue policy")?;

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let log = TurnLog::read(path.as_deref())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let turns = replay::replay(&policy, &log, &mut out)?;
    tracing::info!(turns, "Replay complete");

    Ok(())
}

/// Log to stderr so stdout carries only the acts
fn init_tracing(settings: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &settings.observability.log_level;
        // Target prefix covers every moviebot_* crate
        format!("moviebot={}", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if settings.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    subscriber.with(fmt_layer).init();
}
