use crate::docs::{load_library, RenderedDoc};
use crate::prelude::{eprintln, *};
use agentmint_core::docs::{render, search, Block, DocLibrary, DEFAULT_SECTION};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;

use super::{parse_arguments, text_result, JsonRpcError, INTERNAL_ERROR};

const DOCS_ENV: &str = "AGENTMINT_DOCS";

#[derive(Debug, Deserialize)]
struct DocsSearchArgs {
    query: String,
    section: Option<String>,
    docs: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct DocsRenderArgs {
    id: Option<String>,
    body: Option<String>,
    docs: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RenderedBody {
    blocks: Vec<Block>,
}

/// The docs file named in the call, then the one in `AGENTMINT_DOCS`, then
/// the built-in docs.
fn library(path: Option<PathBuf>, env: Option<OsString>) -> Result<DocLibrary, JsonRpcError> {
    let path = path.or_else(|| env.map(PathBuf::from));

    load_library(path.as_deref())
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, f!("Tool execution error: {e}")))
}

fn search_docs(args: &DocsSearchArgs, library: &DocLibrary) -> RenderedDoc {
    let section = args.section.as_deref().unwrap_or(DEFAULT_SECTION);
    RenderedDoc::from(search(&args.query, section, library))
}

fn render_section(args: &DocsRenderArgs, library: &DocLibrary) -> RenderedDoc {
    let id = args.id.as_deref().unwrap_or(DEFAULT_SECTION);
    RenderedDoc::from(search("", id, library))
}

pub fn handle_docs_search(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: DocsSearchArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling docs_search: query={:?}, section={:?}",
            args.query, args.section
        );
    }

    let library = library(args.docs.clone(), std::env::var_os(DOCS_ENV))?;
    text_result(&search_docs(&args, &library))
}

pub fn handle_docs_render(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: DocsRenderArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling docs_render: id={:?}, inline body={}",
            args.id,
            args.body.is_some()
        );
    }

    if let Some(body) = &args.body {
        let rendered = RenderedBody {
            blocks: render(body).collect(),
        };
        return text_result(&rendered);
    }

    let library = library(args.docs.clone(), std::env::var_os(DOCS_ENV))?;
    text_result(&render_section(&args, &library))
}
