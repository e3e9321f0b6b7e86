//! Command results and how they are printed.

use anyhow::Result;
use clap::ValueEnum;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

/// Structured data for `--output json` plus the human-readable rendering.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub data: Value,
    pub text: String,
}

impl CommandOutput {
    pub fn new(data: Value, text: impl Into<String>) -> Self {
        Self {
            data,
            text: text.into(),
        }
    }
}

pub fn print_output(format: OutputFormat, output: &CommandOutput) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output.data)?),
        OutputFormat::Pretty => {
            let text = output.text.trim_end();
            if !text.is_empty() {
                println!("{text}");
            }
        }
    }
    Ok(())
}
