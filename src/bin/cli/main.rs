mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "signcoach-cli", about = "Sign-language flashcards for kids", version)]
struct Cli {
    /// Directory holding library.json and profile.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/signcoach/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep everything in memory; nothing is saved
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// Search text and category selection shared by the viewing commands
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Case-insensitive search in word, meaning and tip
    #[arg(long, short, default_value = "")]
    query: String,
    /// Category name, or "all"
    #[arg(long, short, default_value = "all")]
    category: String,
}

/// Card fields accepted by `add` and `edit`
#[derive(Args, Debug, Clone, Default)]
pub struct CardArgs {
    /// What the sign means
    #[arg(long)]
    meaning: Option<String>,
    /// Category (blank becomes "Custom")
    #[arg(long)]
    category: Option<String>,
    /// Easy, Medium, Hard or any label (blank becomes "Easy")
    #[arg(long)]
    difficulty: Option<String>,
    /// How to make the sign
    #[arg(long)]
    note: Option<String>,
    /// Picture of the sign
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// List cards (the Manage view)
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List categories
    Categories,

    /// Show one card (the Learn view)
    Show {
        #[command(flatten)]
        filter: FilterArgs,
        /// Position in the filtered list, starting at 1
        #[arg(long, default_value = "1")]
        index: usize,
        /// Pick a random card instead
        #[arg(long)]
        shuffle: bool,
    },

    /// Draw random cards for recall practice
    Practice {
        #[command(flatten)]
        filter: FilterArgs,
        /// Number of draws
        #[arg(long, default_value = "1")]
        count: usize,
        /// Print the answers too
        #[arg(long)]
        reveal: bool,
    },

    /// Add a card
    Add {
        /// The word to sign
        #[arg(long)]
        word: String,
        #[command(flatten)]
        fields: CardArgs,
    },

    /// Edit a card; omitted fields keep their value
    Edit {
        /// Card id
        id: String,
        /// New word
        #[arg(long)]
        word: Option<String>,
        #[command(flatten)]
        fields: CardArgs,
    },

    /// Delete a card
    Remove {
        /// Card id
        id: String,
    },

    /// Replace the library with the default cards
    Reset {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },

    /// Write the library as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Replace the library with a JSON export
    Import {
        /// JSON file to read ("-" for stdin)
        path: PathBuf,
    },

    /// Child profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Launch interactive TUI
    #[cfg(feature = "tui")]
    Tui,
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Show the saved profile
    Show,

    /// Save the name and optionally a new photo
    Set {
        /// Child's name
        #[arg(long, default_value = "")]
        name: String,
        /// Photo file; the previous photo is kept when omitted
        #[arg(long)]
        photo: Option<PathBuf>,
    },

    /// Delete the profile
    Clear,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let options = app::AppOptions {
        data_dir: cli.data_dir.clone(),
        config: cli.config.clone(),
        ephemeral: cli.ephemeral,
    };

    match cli.command {
        None => {
            // No subcommand → launch TUI
            #[cfg(feature = "tui")]
            {
                tui::run(&options)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        Some(Command::List { filter }) => {
            let mut app = app::App::new(&options)?;
            commands::list::run(&mut app, &filter, &cli.format, use_color)?;
        }
        Some(Command::Categories) => {
            let app = app::App::new(&options)?;
            commands::list::run_categories(&app, &cli.format)?;
        }
        Some(Command::Show { filter, index, shuffle }) => {
            let mut app = app::App::new(&options)?;
            commands::show::run(&mut app, &filter, index, shuffle, &cli.format, use_color)?;
        }
        Some(Command::Practice { filter, count, reveal }) => {
            let mut app = app::App::new(&options)?;
            commands::practice::run(&mut app, &filter, count, reveal, &cli.format, use_color)?;
        }
        Some(Command::Add { word, fields }) => {
            let mut app = app::App::new(&options)?;
            commands::manage::run_add(&mut app, word, fields, &cli.format, use_color)?;
        }
        Some(Command::Edit { id, word, fields }) => {
            let mut app = app::App::new(&options)?;
            commands::manage::run_edit(&mut app, &id, word, fields, &cli.format, use_color)?;
        }
        Some(Command::Remove { id }) => {
            let mut app = app::App::new(&options)?;
            commands::manage::run_remove(&mut app, &id, &cli.format)?;
        }
        Some(Command::Reset { yes }) => {
            let mut app = app::App::new(&options)?;
            commands::manage::run_reset(&mut app, yes, &cli.format)?;
        }
        Some(Command::Export { output }) => {
            let app = app::App::new(&options)?;
            commands::manage::run_export(&app, output.as_deref())?;
        }
        Some(Command::Import { path }) => {
            let mut app = app::App::new(&options)?;
            commands::manage::run_import(&mut app, &path, &cli.format)?;
        }
        Some(Command::Profile(subcmd)) => {
            let mut app = app::App::new(&options)?;
            match subcmd {
                ProfileCommand::Show => {
                    commands::profile::run_show(&app, &cli.format, use_color)?;
                }
                ProfileCommand::Set { name, photo } => {
                    commands::profile::run_set(&mut app, &name, photo, &cli.format, use_color)?;
                }
                ProfileCommand::Clear => {
                    commands::profile::run_clear(&mut app, &cli.format)?;
                }
            }
        }
        #[cfg(feature = "tui")]
        Some(Command::Tui) => {
            tui::run(&options)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}
