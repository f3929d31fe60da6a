mod commands;
mod form;
mod seed;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use recipebox_core::{Recipe, RecipeClient};
use tracing_subscriber::EnvFilter;

use crate::form::FormArgs;

#[derive(Parser)]
#[command(name = "recipebox")]
#[command(about = "Recipe box CLI", long_about = None)]
struct Cli {
    /// API base URL
    #[arg(
        long,
        global = true,
        env = "RECIPEBOX_API_URL",
        default_value = "http://localhost:5000/api"
    )]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all recipes, newest first
    List,
    /// Show one recipe in full
    Show { id: String },
    /// Add a new recipe
    Add(FormArgs),
    /// Edit an existing recipe; only the given fields change
    Edit {
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a recipe
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Fill an empty collection with sample recipes
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let client = RecipeClient::new(&cli.server)?;
    let mut out = io::stdout();

    match cli.command {
        Commands::List => commands::list(&client, &mut out).await?,
        Commands::Show { id } => commands::show(&client, &id, &mut out).await?,
        Commands::Add(form) => {
            commands::add(&client, &form, &mut out).await?;
        }
        Commands::Edit { id, form } => {
            commands::edit(&client, &id, &form, &mut out).await?;
        }
        Commands::Delete { id, yes } => {
            let confirm = |recipe: &Recipe| if yes { Ok(true) } else { prompt_delete(recipe) };
            commands::delete(&client, &id, confirm, &mut out).await?;
        }
        Commands::Seed => {
            seed::seed(&client, &mut out).await?;
        }
    }

    Ok(())
}

fn prompt_delete(recipe: &Recipe) -> Result<bool> {
    print!("Delete \"{}\"? This cannot be undone. [y/N] ", recipe.title);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
