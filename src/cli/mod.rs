// src/cli/mod.rs
// Command-line interface: serve (default) and list

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::time::Duration;

use crate::config::{
    AppConfig, GeminiConfig, ServerConfig, DEFAULT_DATABASE_URL, DEFAULT_GEMINI_BASE_URL,
    DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_TIMEOUT_SECS, DEFAULT_HOST, DEFAULT_PORT,
};
use crate::tasks::{Task, TaskStore};

#[derive(Parser, Debug)]
#[command(name = "taskquip", version)]
#[command(about = "Task list server that comments on your progress")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL, global = true)]
    pub database_url: String,

    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Print all tasks, newest first
    List,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, global = true, env = "TASKQUIP_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, global = true, env = "TASKQUIP_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Gemini API key; empty disables generated comments
    #[arg(long, global = true, env = "GEMINI_API_KEY", default_value = "", hide_env_values = true)]
    pub gemini_api_key: String,

    /// Gemini model name
    #[arg(long, global = true, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    /// Seconds to wait for Gemini before using a fallback line
    #[arg(long, global = true, env = "GEMINI_TIMEOUT_SECS", default_value_t = DEFAULT_GEMINI_TIMEOUT_SECS)]
    pub gemini_timeout_secs: u64,

    /// Gemini API base URL
    #[arg(long, global = true, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }

    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: self.serve.host.clone(),
                port: self.serve.port,
            },
            database_url: self.database_url.clone(),
            gemini: GeminiConfig {
                api_key: self.serve.gemini_api_key.clone(),
                model: self.serve.gemini_model.clone(),
                base_url: self.serve.gemini_base_url.clone(),
                timeout: Duration::from_secs(self.serve.gemini_timeout_secs),
            },
        }
    }
}

/// One line per task: `id | status | created_at | title`
pub fn format_task_line(task: &Task) -> String {
    format!(
        "{} | {} | {} | {}",
        task.id,
        task.status,
        task.created_at.format("%Y-%m-%d %H:%M:%S"),
        task.title
    )
}

/// Write the task listing, or `No tasks.` when there are none
pub async fn run_list(store: &TaskStore, out: &mut impl Write) -> Result<()> {
    let tasks = store.list().await?;
    if tasks.is_empty() {
        writeln!(out, "No tasks.")?;
        return Ok(());
    }
    for task in &tasks {
        writeln!(out, "{}", format_task_line(task))?;
    }
    Ok(())
}
