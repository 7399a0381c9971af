//! Command-line arguments for the `persona-agent` binary.
//!
//! | Option | Env | Default |
//! |--------|-----|---------|
//! | `--listen` | `PERSONA_LISTEN_ADDR` | `0.0.0.0:3000` |
//! | `--log-format` | `PERSONA_LOG_FORMAT` | `text` |
//!
//! Provider credentials and runtime settings are read from the
//! environment (and `.env`) by `AgentConfig::from_env`.

use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

/// Trading-persona agent tool server
#[derive(Debug, Parser)]
#[command(name = "persona-agent", author, version, about = "Trading-persona agent tool server")]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "PERSONA_LISTEN_ADDR", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// Log output format
    #[arg(long, env = "PERSONA_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
