// Author: Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tempo",
    version = env!("CARGO_PKG_VERSION"),
    about = "Tempo time-tracking client"
)]
pub struct Args {
    /// Backend base URL (overrides config file and TEMPO_SERVER).
    #[arg(short, long, value_name = "URL")]
    pub server: Option<String>,

    /// Bearer token for the backend (overrides config file and TEMPO_TOKEN).
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Resync interval in seconds for watch mode.
    #[arg(long, value_name = "SECONDS")]
    pub poll: Option<u64>,

    #[arg(short, long, action)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "List projects sorted by end date")]
    Projects,

    #[command(about = "Show recorded sessions with durations")]
    Sessions,

    #[command(about = "Start tracking time against a project")]
    Start {
        project: String,
    },

    #[command(about = "Stop the running session")]
    Stop,

    #[command(about = "Show the running session, if any")]
    Status,

    #[command(about = "Watch the running session with a live timer (default)")]
    Watch,
}
