pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::models::Category;
use crate::views::{Confirmer, FixedAnswer, TerminalConfirmer};

#[derive(Parser)]
#[command(name = "budgets")]
#[command(about = "Budgets CLI - set, list and delete monthly per-category budgets")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show current budgets")]
    List,

    #[command(about = "Set the monthly budget for a category")]
    Set {
        #[arg(help = "Monthly amount, must be a positive number", allow_hyphen_values = true)]
        amount: String,
        #[arg(long, short, default_value_t = Category::default(), value_parser = parse_category, help = "Expense category")]
        category: Category,
    },

    #[command(about = "Delete a budget by id")]
    Delete {
        #[arg(help = "Budget ID")]
        id: String,
        #[arg(long, short, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    #[command(about = "List the expense categories a budget can be set for")]
    Categories,
}

fn parse_category(value: &str) -> Result<Category, String> {
    value.parse::<Category>().map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let credentials = config::CliCredentialStore::from_env();
    let ctx = commands::budgets::CommandContext {
        config: crate::config::config(),
        credentials: &credentials,
        navigator: &config::TerminalNavigator,
        output_format: OutputFormat::from_cli(&cli),
    };
    let mut out = std::io::stdout();

    match cli.command {
        Commands::List => commands::budgets::list(&ctx, &mut out).await,
        Commands::Set { amount, category } => {
            commands::budgets::set(&ctx, &mut out, category, amount).await
        }
        Commands::Delete { id, yes } => {
            let confirmer: Box<dyn Confirmer> = if yes {
                Box::new(FixedAnswer(true))
            } else {
                Box::new(TerminalConfirmer)
            };
            commands::budgets::delete(&ctx, &mut out, confirmer.as_ref(), id).await
        }
        Commands::Categories => commands::categories::handle(&mut out, ctx.output_format),
    }
}
