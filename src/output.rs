//! Output Rendering
//!
//! Serializes command results for stdout and writes styled diagnostics to
//! stderr.

use anyhow::{Context, Result};
use clap::ValueEnum;
use crossterm::style::Stylize;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Result of running a command
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Structured response data
    Data(Value),
    /// Plain text (config values, file contents)
    Text(String),
    /// Nothing to print
    Empty,
}

impl Output {
    /// Convert any serializable record into `Output::Data`.
    /// Going through `Value` gives sorted keys.
    pub fn data<T: Serialize>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value).context("Failed to serialize output")?;
        Ok(Output::Data(value))
    }
}

/// Render an output for printing; `None` means nothing should be printed
pub fn render(output: &Output, format: OutputFormat) -> Result<Option<String>> {
    match output {
        Output::Data(value) => render_value(value, format).map(Some),
        Output::Text(text) => Ok(Some(text.clone())),
        Output::Empty => Ok(None),
    }
}

pub fn render_value(value: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_pretty_json(value),
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to render YAML"),
    }
}

/// JSON with a 4-space indent
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).context("Failed to render JSON")?;
    String::from_utf8(buf).context("Rendered JSON is not UTF-8")
}

pub fn error(message: &str) {
    eprintln!("{}: {}", "Error".red(), message);
}

pub fn warning(message: &str) {
    eprintln!("{}: {}", "Warning".yellow(), message);
}

pub fn success(message: &str) {
    eprintln!("{}", message.green());
}

/// Echo a request URL before it is sent
pub fn echo_url(url: &str) {
    eprintln!("{}", url.blue());
}
