#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # redacao
//!
//! Scores a Portuguese argumentative essay against the five ENEM writing
//! competencies and prints a feedback report.
//!
//! The annotator and sentiment estimator are reached over HTTP; set
//! `REDACAO_ANNOTATOR_URL` and `REDACAO_SENTIMENT_URL` (a `.env` file works
//! too). Grammar checking goes to LanguageTool at `REDACAO_LANGUAGETOOL_URL`.

use std::io::{IsTerminal, Read};

use anyhow::{Context, Result, bail};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use itertools::Itertools;
use redacao::{EssayEvaluator, EvaluatorConfig};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Score an essay
    Evaluate {
        /// Print the score record as JSON instead of a table
        json: bool,
        /// Essay text; stdin when absent
        text: Option<String>,
    },
    /// Print the active severity markers
    Policy,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    let json = long("json")
        .help("Print the score record and feedback as JSON")
        .switch();
    let text = positional::<String>("TEXT")
        .help("Essay text; read from stdin when omitted")
        .optional();

    let evaluate = construct!(Cmd::Evaluate { json, text })
        .to_options()
        .command("evaluate")
        .help("Score an essay");

    let policy = pure(Cmd::Policy)
        .to_options()
        .command("policy")
        .help("Print the category markers treated as severe grammar issues");

    let cmd = construct!([evaluate, policy]);

    cmd.to_options()
        .descr("Heuristic scorer for Portuguese argumentative essays")
        .run()
}

/// Returns the essay from the argument, or all of stdin.
fn read_essay(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("Pass the essay as an argument or pipe it through stdin.");
    }
    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .context("Could not read the essay from stdin")?;
    Ok(buf)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(Level::INFO).into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let config = EvaluatorConfig::from_env();

    match options() {
        Cmd::Evaluate { json, text } => {
            let essay = read_essay(text)?;
            let evaluator = EssayEvaluator::from_config(&config)?;
            let evaluation = evaluator
                .evaluate(&essay)
                .await
                .context("Could not evaluate the essay")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&evaluation)?);
            } else {
                eprintln!("{}", evaluation.record.render_table());
                for remark in evaluation.feedback.remarks() {
                    println!("{}", remark.yellow());
                }
                println!("{}", evaluation.feedback.total_line().bold().green());
            }
        }
        Cmd::Policy => {
            println!("{}", config.severity_policy().markers().iter().join(", "));
        }
    };

    Ok(())
}
