//! CB-011: CLI subcommands: list, show, schedule, validate, schema, completions.

use crate::core::book::{self, Book};
use crate::core::{parser, scheduler, types};
use crate::shelf::navigation::{decode_fragment, MemoryNavigation};
use crate::shelf::Shelf;
use crate::source::{self, DEFAULT_LISTING_URL};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "cookbook",
    version,
    about = "Page-turning cookbook reader: recipe step graphs scheduled into cooking timelines"
)]
pub struct Cli {
    /// Recipe source: a contents API URL or a local directory
    #[arg(long, global = true, env = "COOKBOOK_SOURCE", default_value = DEFAULT_LISTING_URL)]
    pub source: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the recipes on the shelf
    List,

    /// Open a recipe and read it page by page
    Show {
        /// Recipe name or fragment (`pancakes` or `#pancakes`)
        name: String,

        /// Print only this page (0 = cover)
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// Print the cooking timeline of a local recipe file
    Schedule {
        /// Path to a recipe YAML file
        file: PathBuf,

        /// Emit the time frames as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a local recipe file
    Validate {
        /// Path to a recipe YAML file
        file: PathBuf,
    },

    /// Print the JSON Schema of the recipe format
    Schema,

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

/// Dispatch a CLI command.
pub async fn dispatch(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::List => cmd_list(&cli.source).await,
        Commands::Show { name, page } => cmd_show(&cli.source, &name, page).await,
        Commands::Schedule { file, json } => cmd_schedule(&file, json),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Schema => cmd_schema(),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

async fn cmd_list(location: &str) -> Result<(), String> {
    let source = source::open(location)?;
    let entries = source.list().await?;
    info!(source = source.location(), recipes = entries.len(), "listing fetched");

    if entries.is_empty() {
        println!("No recipes found at {}", source.location());
        return Ok(());
    }

    let mut shelf = Shelf::new(MemoryNavigation::default());
    shelf.set_listing(entries);
    for spine in shelf.spines() {
        let indent = " ".repeat((spine.margin_left / 2.0) as usize);
        println!(
            "{}{}  [{} → {}]",
            indent, spine.title, spine.colour.0, spine.colour.1
        );
    }
    Ok(())
}

async fn cmd_show(location: &str, name: &str, page: Option<usize>) -> Result<(), String> {
    let source = source::open(location)?;
    let mut shelf = Shelf::new(MemoryNavigation::new(name));
    shelf.set_listing(source.list().await?);

    let ticket = shelf.begin_load().ok_or_else(|| {
        format!(
            "no recipe named '{}' at {}",
            decode_fragment(name),
            source.location()
        )
    })?;
    let entry = shelf
        .selected_entry()
        .ok_or_else(|| "no recipe selected".to_string())?
        .clone();
    let recipe = source::load_recipe(source.as_ref(), &entry).await?;
    let mut book = shelf
        .open_book(&ticket, recipe)
        .ok_or_else(|| "selection changed while loading".to_string())?;

    print_book(&mut book, page)
}

/// Print one page, or every page in order.
fn print_book(book: &mut Book, page: Option<usize>) -> Result<(), String> {
    let count = book.page_count();
    if let Some(page) = page {
        if page >= count {
            return Err(format!("page {} out of range (0..{})", page, count));
        }
        book.turn_to(page);
        print_page(book);
        return Ok(());
    }

    print_page(book);
    while book.forward() {
        println!();
        print_page(book);
    }
    Ok(())
}

fn print_page(book: &Book) {
    let page = book.current_page();
    println!("=== Page {} of {} ===", page + 1, book.page_count());
    if let Some(text) = book.render_page(page) {
        print!("{}", text);
    }
}

fn cmd_schedule(file: &Path, json: bool) -> Result<(), String> {
    let recipe = parser::parse_recipe_file(file)?;
    let schedule = scheduler::schedule(&recipe);

    for d in &schedule.diagnostics {
        eprintln!("  WARNING: {} (dropped from the timeline)", d);
    }

    if json {
        let out = serde_json::to_string_pretty(&schedule.frames)
            .map_err(|e| format!("JSON serialize error: {}", e))?;
        println!("{}", out);
        return Ok(());
    }

    println!(
        "Timeline: {} ({} frames)",
        recipe.info.name,
        schedule.frames.len()
    );
    for (i, frame) in schedule.frames.iter().enumerate() {
        println!();
        println!("[{}]", i + 1);
        print!("{}", book::render_frame(frame));
    }
    Ok(())
}

fn cmd_validate(file: &Path) -> Result<(), String> {
    let recipe = parser::parse_recipe_file(file)?;
    let errors = parser::validate_recipe(&recipe);

    if errors.is_empty() {
        println!(
            "OK: {} ({} step groups, {} time frames)",
            recipe.info.name,
            recipe.steps.len(),
            scheduler::create_time_frames(&recipe).len()
        );
        Ok(())
    } else {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        Err(format!("{} validation error(s)", errors.len()))
    }
}

fn cmd_schema() -> Result<(), String> {
    let schema = schemars::schema_for!(types::Recipe);
    let out = serde_json::to_string_pretty(&schema)
        .map_err(|e| format!("JSON serialize error: {}", e))?;
    println!("{}", out);
    Ok(())
}

fn cmd_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "cookbook", &mut std::io::stdout());
}
