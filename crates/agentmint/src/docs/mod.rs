use crate::prelude::{eprintln, println, *};
use agentmint_core::docs::{builtin_library, render_result, Block, DocLibrary, RenderableResult};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub mod search;
pub mod show;
pub mod term;

#[derive(Debug, clap::Parser)]
#[command(name = "docs")]
#[command(about = "Built-in or local marketplace documentation")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List documentation sections in sidebar order
    #[clap(name = "list")]
    List(ListOptions),

    /// Render one documentation section
    #[clap(name = "show")]
    Show(show::ShowOptions),

    /// Search titles and bodies, best matches first
    #[clap(name = "search")]
    Search(search::SearchOptions),

    /// Print the headings of one section
    #[clap(name = "toc")]
    Toc(show::TocOptions),
}

/// Where to read the documentation from
#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone, Default)]
pub struct LibraryOptions {
    /// JSON file holding `[{ "id", "title", "body" }]` sections; defaults to the built-in docs
    #[arg(long = "docs", env = "AGENTMINT_DOCS", value_name = "PATH")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    #[clap(flatten)]
    pub library: LibraryOptions,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// A resolved docs view together with the blocks it renders to
#[derive(Debug, Serialize)]
pub struct RenderedDoc {
    #[serde(flatten)]
    pub result: RenderableResult,
    pub blocks: Vec<Block>,
}

impl From<RenderableResult> for RenderedDoc {
    fn from(result: RenderableResult) -> Self {
        let blocks = render_result(&result);
        Self { result, blocks }
    }
}

#[derive(Debug, Serialize)]
struct SectionSummary<'a> {
    id: &'a str,
    title: &'a str,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::List(options) => list(options, global),
        Commands::Show(options) => show::run_show(options, global),
        Commands::Search(options) => search::run(options, global),
        Commands::Toc(options) => show::run_toc(options, global),
    }
}

/// Load the documentation library: a JSON file when given, the built-in docs otherwise.
pub fn load_library(path: Option<&Path>) -> Result<DocLibrary> {
    let Some(path) = path else {
        return Ok(builtin_library().clone());
    };

    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| f!("Failed to read docs file {}", path.display()))?;

    let library = DocLibrary::from_json(&json).map_err(|e| Error::InvalidDocs {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    if library.is_empty() {
        log::warn!("Docs file {} has no sections", path.display());
    }
    log::debug!("Loaded {} docs sections from {}", library.len(), path.display());

    Ok(library)
}

fn list(options: ListOptions, global: crate::Global) -> Result<()> {
    let library = load_library(options.library.path.as_deref())?;

    if global.verbose {
        eprintln!("{} documentation sections", library.len());
    }

    if options.json {
        let sections: Vec<SectionSummary> = library
            .iter()
            .map(|s| SectionSummary {
                id: &s.id,
                title: &s.title,
            })
            .collect();
        let json = to_pretty_json(&sections)?;
        println!("{}", json);
    } else {
        print!("{}", format_list_text(&library));
    }

    Ok(())
}

fn format_list_text(library: &DocLibrary) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        "AGENTMINT DOCUMENTATION".bright_cyan().bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    if library.is_empty() {
        result.push_str(&f!("\n{}\n", "No sections.".yellow()));
        return result;
    }

    let mut table = new_table();
    table.set_titles(prettytable::row!["#", "Id", "Title"]);
    for (idx, section) in library.iter().enumerate() {
        table.add_row(prettytable::row![idx + 1, section.id, section.title]);
    }
    result.push('\n');
    result.push_str(&table.to_string());

    result.push_str(&f!("\n{}:\n", "To read a section".bright_white().bold()));
    result.push_str(&f!("  {}\n", "agentmint docs show <id>".cyan()));
    if let Some(first) = library.first() {
        result.push_str(&f!(
            "  {}: {}\n",
            "Example".green(),
            f!("agentmint docs show {}", first.id).cyan()
        ));
    }
    result.push_str(&f!("\n{}:\n", "To search".bright_white().bold()));
    result.push_str(&f!("  {}\n\n", "agentmint docs search <query>".cyan()));

    result
}
