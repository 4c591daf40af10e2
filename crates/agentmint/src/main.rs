use crate::prelude::*;
use clap::Parser;

mod catalog;
mod config;
mod docs;
mod error;
mod mcp;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse the AgentMint agent store, tools, MCP services and docs"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Marketplace backend base URL
    #[clap(
        long,
        env = "AGENTMINT_API_URL",
        global = true,
        default_value = config::DEFAULT_API_URL
    )]
    api_url: String,

    /// HTTP request timeout in seconds
    #[clap(long, env = "AGENTMINT_TIMEOUT", global = true, default_value = "30")]
    timeout: u64,

    /// Whether to display additional information.
    #[clap(long, env = "AGENTMINT_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Agent store, tools and MCP service catalogs
    Catalog(crate::catalog::App),

    /// Built-in or local marketplace documentation
    Docs(crate::docs::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Catalog(sub_app) => crate::catalog::run(sub_app, app.global).await,
        SubCommands::Docs(sub_app) => crate::docs::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
