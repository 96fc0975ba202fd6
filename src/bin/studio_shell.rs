//! Interactive terminal client for a running tshirt-studio server.
//!
//! Drives the same generation endpoint as the browser page through the typed
//! client module: guarded generate, capped history, re-display, and image
//! download. Failures print as transient notices and never touch the
//! session's history.

use anyhow::Result as AnyResult;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tshirt_studio::client::{download_filename, StudioApiClient, StudioSession};
use tshirt_studio::models::Animal;

#[derive(Debug, Parser)]
#[command(name = "studio_shell")]
#[command(about = "Talk to a tshirt-studio server from the terminal")]
struct CliArgs {
    /// Base URL of the studio server.
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server_url: String,

    /// Directory for downloaded images.
    #[arg(long, default_value = ".")]
    downloads_dir: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Animals,
    Generate { animal: Animal, phrase: String },
    History,
    Show { index: usize },
    Download,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Ok(None);
    };

    let command = match head {
        "animals" => Command::Animals,
        "history" => Command::History,
        "download" => Command::Download,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "generate" => {
            let animal = tokens
                .next()
                .ok_or("Usage: generate <animal> <phrase>")?
                .parse::<Animal>()
                .map_err(|e| e.to_string())?;
            let phrase = tokens.collect::<Vec<_>>().join(" ");
            if phrase.is_empty() {
                return Err("Usage: generate <animal> <phrase>".to_string());
            }
            Command::Generate { animal, phrase }
        }
        "show" => {
            let index: usize = tokens
                .next()
                .ok_or("Usage: show <entry number>")?
                .parse()
                .map_err(|_| "Usage: show <entry number>".to_string())?;
            if index == 0 {
                return Err("History entries are numbered from 1".to_string());
            }
            Command::Show { index }
        }
        other => return Err(format!("Unknown command: {}", other)),
    };

    Ok(Some(command))
}

fn print_help() {
    println!("Commands:");
    println!("  animals                     list the supported animals");
    println!("  generate <animal> <phrase>  photograph an animal in a slogan t-shirt");
    println!("  history                     list this session's generations (newest first)");
    println!("  show <n>                    re-display history entry n");
    println!("  download                    save the displayed image next to you");
    println!("  quit                        leave the studio");
}

async fn run_command(
    command: Command,
    session: &mut StudioSession,
    api: &StudioApiClient,
    downloads_dir: &Path,
) {
    match command {
        Command::Animals => {
            let names: Vec<&str> = Animal::ALL.iter().map(Animal::as_str).collect();
            println!("{}", names.join(", "));
        }
        Command::Generate { animal, phrase } => {
            if !session.can_generate(&phrase, Some(animal)) {
                eprintln!("Cannot generate right now; a request may already be in flight");
                return;
            }
            if !session.try_begin() {
                eprintln!("A generation is already in flight");
                return;
            }

            println!("Generating a {} photo...", animal);
            match api.generate(&phrase, animal).await {
                Ok(url) => {
                    session.complete_success(phrase, animal, url.clone());
                    println!("Done: {}", url);
                }
                Err(e) => {
                    session.complete_failure();
                    eprintln!("Generation failed: {}", e);
                }
            }
        }
        Command::History => {
            if session.history_len() == 0 {
                println!("No generations yet this session");
                return;
            }
            for (i, entry) in session.history().enumerate() {
                println!(
                    "{:>2}. [{}] {} {:?} ({})",
                    i + 1,
                    entry.created_at.format("%H:%M:%S"),
                    entry.animal,
                    entry.phrase,
                    entry.url
                );
            }
        }
        Command::Show { index } => {
            let id = session.entry(index - 1).map(|entry| entry.id);
            match id {
                Some(id) => {
                    session.select(id);
                    // select only fails for unknown ids, and this one came
                    // from the history itself.
                    if let Some(url) = session.displayed_url() {
                        println!("Displaying: {}", url);
                    }
                }
                None => eprintln!("No history entry {}", index),
            }
        }
        Command::Download => {
            let Some((url, filename)) = session
                .displayed_entry()
                .map(|entry| (entry.url.clone(), download_filename(entry.animal, &entry.phrase)))
            else {
                eprintln!("Nothing is displayed; generate or show an entry first");
                return;
            };

            match api.download_image(&url, downloads_dir, &filename).await {
                Ok(path) => println!("Saved {}", path.display()),
                Err(e) => eprintln!("Download failed: {}", e),
            }
        }
        Command::Help => print_help(),
        Command::Quit => unreachable!("handled by the main loop"),
    }
}

#[tokio::main]
async fn main() -> AnyResult<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studio_shell=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let api = StudioApiClient::new(args.server_url.clone());
    let mut session = StudioSession::new();

    println!("tshirt-studio shell (type 'help' for commands)");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => {
                run_command(command, &mut session, &api, &args.downloads_dir).await
            }
            Err(message) => eprintln!("{}", message),
        }
    }

    Ok(())
}
