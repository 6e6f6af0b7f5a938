pub mod commands;

use crate::cli::commands::Commands;
use crate::config::AppConfig;
use crate::db::service::DbService;

pub fn run_cli(command: Commands, config_path: String) {
    let config = AppConfig::load(&config_path).expect("Failed to load config");

    match command {
        Commands::Serve => {
            panic!("Serve command should be intercepted by main.rs to boot actix-web");
        }
        Commands::Check => {
            if DbService::ping(&config.database) {
                println!("database: connected");
            } else {
                eprintln!("database: disconnected");
                std::process::exit(1);
            }
        }
        Commands::Clients => {
            let clients = DbService::client_rollup(&config.database);

            if clients.is_empty() {
                println!("No clients found.");
            } else {
                println!("{:<24} | {:>8} | {:>9}", "Client", "Numbers", "Messages");
                println!("{:-<24}-+-{:-<8}-+-{:-<9}", "", "", "");
                for c in clients {
                    println!(
                        "{:<24} | {:>8} | {:>9}",
                        c.client, c.number_count, c.message_count
                    );
                }
            }
        }
    }
}
