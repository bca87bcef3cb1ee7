//! Shared helpers for integration tests

#![allow(dead_code)]

use anyhow::Result;
use clap::Parser;
use clicli::cli::Cli;
use clicli::commands::{self, Confirm, Session};
use clicli::config::{ConfigKey, ConfigStore};
use clicli::output::Output;
use serde_json::{json, Value};

pub const TOKEN: &str = "pk_test_token";

/// Answers every confirmation prompt the same way
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(self.0)
    }
}

/// Session against a mock server with the given config values
pub fn session(base_url: &str, config: &[(ConfigKey, &str)], answer: bool) -> Session {
    let mut store = ConfigStore::in_memory();
    store.insert(ConfigKey::ApiKey, TOKEN);
    for (key, value) in config {
        store.insert(*key, value);
    }

    Session {
        config: store,
        interactive: false,
        base_url: base_url.to_string(),
        api_key: None,
        confirm: Box::new(FixedAnswer(answer)),
    }
}

/// Parse `args` (without the program name) and run the command
pub async fn run(session: &mut Session, args: &[&str]) -> Result<Output> {
    let argv = std::iter::once("clicli").chain(args.iter().copied());
    let cli = Cli::try_parse_from(argv)?;
    commands::run(cli.command, session).await
}

/// Unwrap structured output
pub fn data(output: Output) -> Value {
    match output {
        Output::Data(value) => value,
        other => panic!("expected data output, got {:?}", other),
    }
}

/// `count` tasks with ids starting at `first`
pub fn tasks(first: usize, count: usize) -> Value {
    let tasks: Vec<Value> = (first..first + count)
        .map(|i| json!({"id": format!("t{}", i), "name": format!("Task {}", i)}))
        .collect();
    json!({ "tasks": tasks })
}
