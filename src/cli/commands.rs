use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "convoview", version, about = "Archived chat conversation viewer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file path globally
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve,

    /// Probe database connectivity and exit
    Check,

    /// Print the client roll-up without starting the server
    Clients,
}
