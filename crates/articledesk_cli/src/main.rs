//! `articledesk` command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto the screen API and print each screen's message.
//! - Exit non-zero whenever a screen reports an error.

use anyhow::{Context, Result};
use articledesk_api::{
    AppContext, CreateScreen, ListScreen, SignInScreen, SignUpScreen, StatusMessage,
    UpdateScreen,
};
use articledesk_core::{core_version, AppConfig, Article, ArticleId};
use clap::{Parser, Subcommand};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "articledesk")]
#[command(about = "Manage articles kept in a local store")]
struct Cli {
    /// Store file (overrides ARTICLEDESK_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Log level (overrides ARTICLEDESK_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute log directory (overrides ARTICLEDESK_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all articles.
    List,
    /// Show one article.
    Show { id: String },
    /// Create an article.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value = "")]
        category: String,
        /// YYYY-MM-DD; defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// File whose name and size are recorded. Contents are not stored.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Edit an article; omitted options keep their current value.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an article.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Create an account with the auth service.
    Signup {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Sign in and cache the session locally.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the cached session.
    Whoami,
    /// Print the version.
    Version,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Show { .. } => "show",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Signup { .. } => "signup",
            Self::Login { .. } => "login",
            Self::Whoami => "whoami",
            Self::Version => "version",
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("articledesk: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if let Command::Version = cli.command {
        println!("articledesk {}", core_version());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = AppConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = Some(log_dir);
    }

    let ctx = AppContext::open(&config)
        .with_context(|| format!("cannot open store `{}`", config.db_path.display()))?;
    let command = cli.command.name();
    let succeeded = dispatch(&ctx, cli.command)?;
    let status = if succeeded { "ok" } else { "error" };
    info!("event=cli_command module=cli command={command} status={status}");
    ctx.close().context("cannot close store")?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Runs one command; `false` when a screen reported an error.
fn dispatch(ctx: &AppContext, command: Command) -> Result<bool> {
    let succeeded = match command {
        Command::List => {
            let screen = ListScreen::load(ctx);
            match screen.articles() {
                Some([]) => println!("No articles yet."),
                Some(articles) => articles.iter().for_each(print_summary),
                None => {}
            }
            report(screen.status())
        }
        Command::Show { id } => {
            let screen = UpdateScreen::load(ctx, ArticleId::from(id));
            if let Some(article) = screen.article() {
                print_article(article);
            }
            report(screen.status())
        }
        Command::Create {
            title,
            author,
            content,
            category,
            date,
            file,
        } => {
            let mut screen = CreateScreen::new();
            screen.form.title = title;
            screen.form.author = author;
            screen.form.content = content;
            screen.form.category = category;
            if let Some(date) = date {
                screen.form.date = date;
            }
            if let Some(path) = file {
                let (name, size) = file_metadata(&path)?;
                if !screen.attach_file(name, size) {
                    return Ok(report(screen.status()));
                }
            }
            if let Some(article) = screen.submit(ctx) {
                println!("id: {}", article.id);
            }
            report(screen.status())
        }
        Command::Update {
            id,
            title,
            author,
            content,
            category,
            date,
        } => {
            let mut screen = UpdateScreen::load(ctx, ArticleId::from(id));
            if let Some(form) = screen.form.as_mut() {
                apply(&mut form.title, title);
                apply(&mut form.author, author);
                apply(&mut form.content, content);
                apply(&mut form.category, category);
                apply(&mut form.date, date);
                screen.submit(ctx);
            }
            report(screen.status())
        }
        Command::Delete { id, yes } => {
            let id = ArticleId::from(id);
            let confirmed = yes || confirm("Are you sure you want to delete this article?")?;
            let mut screen = ListScreen::load(ctx);
            if screen.articles().is_some() && !screen.delete(ctx, &id, confirmed) && !confirmed {
                println!("Cancelled.");
            }
            report(screen.status())
        }
        Command::Signup {
            full_name,
            email,
            password,
            confirm_password,
        } => {
            let mut screen = SignUpScreen::new();
            screen.form.full_name = full_name;
            screen.form.email = email;
            screen.form.password = password;
            screen.form.confirm_password = confirm_password;
            screen.submit(ctx);
            report(screen.status())
        }
        Command::Login { email, password } => {
            let mut screen = SignInScreen::new();
            screen.form.email = email;
            screen.form.password = password;
            screen.submit(ctx);
            report(screen.status())
        }
        Command::Whoami => {
            match ctx.current_session().context("cannot read cached session")? {
                Some(session) => println!(
                    "{} (id {}) signed in at {}",
                    session.email,
                    session.id,
                    session.login_time.to_rfc3339()
                ),
                None => println!("Not signed in."),
            }
            true
        }
        Command::Version => {
            println!("articledesk {}", core_version());
            true
        }
    };
    Ok(succeeded)
}

fn apply(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn file_metadata(path: &Path) -> Result<(String, u64)> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("cannot read attachment `{}`", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("attachment path `{}` has no file name", path.display()))?;
    Ok((name, metadata.len()))
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES"))
}

/// Prints the screen message, if any; `false` for errors.
fn report(status: Option<&StatusMessage>) -> bool {
    match status {
        Some(status) if status.is_error() => {
            eprintln!("{}: {}", status.kind.as_str(), status.message);
            false
        }
        Some(status) => {
            println!("{}: {}", status.kind.as_str(), status.message);
            true
        }
        None => true,
    }
}

fn print_summary(article: &Article) {
    println!(
        "{}  [{}]  {}  by {}  ({})",
        article.id,
        article
            .category
            .map_or("Uncategorized", |category| category.label()),
        article.title,
        article.author,
        date_label(article)
    );
}

fn date_label(article: &Article) -> String {
    article
        .date
        .map_or_else(|| "undated".to_string(), |date| date.to_string())
}

fn print_article(article: &Article) {
    println!("id:       {}", article.id);
    println!("title:    {}", article.title);
    println!("author:   {}", article.author);
    println!(
        "category: {}",
        article
            .category
            .map_or("Uncategorized", |category| category.label())
    );
    println!("date:     {}", date_label(article));
    if let Some(attachment) = article.attachment() {
        println!(
            "file:     {} ({:.2} KB)",
            attachment.name,
            attachment.size as f64 / 1024.0
        );
    }
    println!();
    println!("{}", article.content);
}
