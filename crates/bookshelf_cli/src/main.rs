//! Command-line front end for the book catalog.
//!
//! Opens the configured SQLite catalog, runs one author or book command and
//! prints the result as pretty JSON.

mod settings;

use anyhow::Context;
use bookshelf_core::{author_service, book_service, BookDto, NewAuthor, Queryable};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use serde::Serialize;
use settings::Settings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(about = "Manage a SQLite-backed book catalog")]
#[command(version)]
struct Cli {
    /// Catalog database file; overrides the configured path.
    #[arg(long, short, env = "BOOKSHELF_DATABASE_PATH")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Author operations
    Author {
        #[command(subcommand)]
        command: AuthorCommands,
    },
    /// Book operations
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
}

#[derive(Subcommand)]
enum AuthorCommands {
    /// List all authors
    List,
    /// Show one author by ID
    Show { id: i64 },
    /// Add a new author
    Add {
        #[arg(long)]
        firstname: String,
        #[arg(long)]
        lastname: String,
        /// Birthday as YYYY-MM-DD
        #[arg(long)]
        birthday: String,
    },
}

#[derive(Subcommand)]
enum BookCommands {
    /// List all books with their authors
    List {
        /// Print id, title, year, summary and price only
        #[arg(long)]
        compact: bool,
    },
    /// Show one book by ID
    Show { id: i64 },
    /// Add a new book
    Add(BookArgs),
    /// Replace the fields of an existing book
    Update {
        id: i64,
        #[command(flatten)]
        book: BookArgs,
    },
    /// Remove a book by ID
    Remove { id: i64 },
}

impl Commands {
    /// Stable label used in `event=cli_command` log lines.
    fn label(&self) -> &'static str {
        match self {
            Self::Author { command } => match command {
                AuthorCommands::List => "author_list",
                AuthorCommands::Show { .. } => "author_show",
                AuthorCommands::Add { .. } => "author_add",
            },
            Self::Book { command } => match command {
                BookCommands::List { .. } => "book_list",
                BookCommands::Show { .. } => "book_show",
                BookCommands::Add(_) => "book_add",
                BookCommands::Update { .. } => "book_update",
                BookCommands::Remove { .. } => "book_remove",
            },
        }
    }
}

#[derive(Args)]
struct BookArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    release_year: i32,
    #[arg(long, default_value = "")]
    summary: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    author_id: i64,
}

impl From<BookArgs> for BookDto {
    fn from(args: BookArgs) -> Self {
        Self {
            title: args.title,
            release_year: args.release_year,
            summary: args.summary,
            price: args.price,
            author_id: args.author_id,
        }
    }
}

#[derive(Serialize)]
struct Created {
    id: i64,
}

#[derive(Serialize)]
struct Done {
    ok: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load()?;

    if let Some(log_dir) = settings.log_dir.as_deref() {
        bookshelf_core::init_logging(&settings.log_level, log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    let database = cli.database.unwrap_or(settings.database_path);
    let conn = bookshelf_core::open_db(&database)
        .with_context(|| format!("failed to open catalog `{}`", database.display()))?;

    run(cli.command, &conn)
}

fn run(command: Commands, conn: &impl Queryable) -> anyhow::Result<()> {
    let label = command.label();
    let result = dispatch(command, conn);

    match &result {
        Ok(()) => info!("event=cli_command module=cli status=ok command={label}"),
        Err(_) => error!("event=cli_command module=cli status=error command={label}"),
    }
    result
}

fn dispatch(command: Commands, conn: &impl Queryable) -> anyhow::Result<()> {
    match command {
        Commands::Author { command } => match command {
            AuthorCommands::List => print_json(&author_service::list_authors(conn)?),
            AuthorCommands::Show { id } => print_json(&author_service::find_author(id, conn)?),
            AuthorCommands::Add {
                firstname,
                lastname,
                birthday,
            } => {
                let input = NewAuthor {
                    firstname,
                    lastname,
                    birthday,
                };
                let id = author_service::create_author(&input, conn)?;
                print_json(&Created { id })
            }
        },
        Commands::Book { command } => match command {
            BookCommands::List { compact: false } => print_json(&book_service::list(conn)?),
            BookCommands::List { compact: true } => {
                print_json(&book_service::list_simple(conn)?)
            }
            BookCommands::Show { id } => print_json(&book_service::find(id, conn)?),
            BookCommands::Add(args) => {
                let id = book_service::create(&args.into(), conn)?;
                print_json(&Created { id })
            }
            BookCommands::Update { id, book } => {
                book_service::update(id, &book.into(), conn)?;
                print_json(&Done { ok: true })
            }
            BookCommands::Remove { id } => {
                book_service::delete(id, conn)?;
                print_json(&Done { ok: true })
            }
        },
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
