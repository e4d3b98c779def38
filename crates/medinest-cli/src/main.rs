use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use medinest_core::session::UserType;

mod commands;

use commands::utils::{Attribute, parse_attribute};

#[derive(Parser)]
#[command(name = "medinest")]
#[command(about = "MediNest portal shell - sign in and move between portal screens", long_about = None)]
struct Cli {
    /// Directory holding config.toml and the session storage file
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Keep the session in memory only (nothing is read or written)
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the session and the screen the portal would display
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sign in as a patient or doctor
    Login {
        /// Account type: patient or doctor
        #[arg(long = "type", value_name = "TYPE")]
        user_type: UserType,
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Extra profile attributes as key=value
        #[arg(value_parser = parse_attribute)]
        attributes: Vec<Attribute>,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Merge key=value attributes into the signed-in profile
    Update {
        #[arg(value_parser = parse_attribute, required = true)]
        attributes: Vec<Attribute>,
    },
    /// List every portal screen and who may see it
    Views,
    /// Start an interactive session (default)
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = commands::Context::new(cli.storage_dir, cli.ephemeral, cli.verbose)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Status { json } => commands::status::run(&context, json)?,
        Commands::Login {
            user_type,
            id,
            name,
            email,
            attributes,
        } => {
            let user = commands::utils::build_user(id, name, email, attributes);
            commands::session::login(&context, user, user_type)?
        }
        Commands::Logout => commands::session::logout(&context)?,
        Commands::Update { attributes } => commands::session::update(&context, attributes)?,
        Commands::Views => commands::views::run(),
        Commands::Shell => commands::shell::run(&context)?,
    }

    Ok(())
}
