mod outline;

use std::process::ExitCode;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ferrite_db::{File, RootDatabase, check_file};
use ferrite_errors::Renderer;
use ferrite_yellow::KindRegistry;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(version, about = "Inspect the syntax tree of a source file")]
enum Options {
    /// Print the full syntax tree, trivia included.
    Dump { path: Utf8PathBuf },
    /// Report syntax problems; exits with 1 when there are any.
    Check { path: Utf8PathBuf },
    /// List the items of the file, nested by module.
    Outline { path: Utf8PathBuf },
    /// List every node of a production or category, e.g. `TuplePat` or `Pat`.
    Query {
        path: Utf8PathBuf,
        #[arg(long)]
        kind: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let db = RootDatabase::default();
    let options = Options::parse();
    let file = match &options {
        Options::Dump { path }
        | Options::Check { path }
        | Options::Outline { path }
        | Options::Query { path, .. } => load(&db, path)?,
    };

    match options {
        Options::Dump { .. } => {
            print!("{}", file.parse(&db).debug_dump());
        }
        Options::Check { .. } => {
            let diagnostics = check_file(&db, file);
            let renderer = Renderer::styled();
            let path = file.path(&db).as_str();
            let text = file.text(&db);

            for diagnostic in diagnostics {
                eprintln!("{}", diagnostic.render(&renderer, path, text));
            }
            if !diagnostics.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Options::Outline { .. } => {
            let line_index = file.line_index(&db);
            for entry in outline::outline(file.parse(&db).source_file()) {
                let pos = line_index.line_col(entry.range.start());
                println!(
                    "{}{} {} {}:{}",
                    "  ".repeat(entry.depth),
                    entry.keyword,
                    entry.name,
                    pos.line + 1,
                    pos.col + 1
                );
            }
        }
        Options::Query { kind, .. } => {
            let registry = KindRegistry::new();
            let kinds = registry.resolve(&kind).context("invalid `--kind`")?;
            let line_index = file.line_index(&db);

            for node in file.parse(&db).syntax_node().descendants() {
                if !kinds.contains(node.kind()) {
                    continue;
                }
                let pos = line_index.line_col(node.trimmed_range().start());
                let text = node.text_trimmed();
                let text = text.lines().next().unwrap_or_default();
                println!(
                    "{}:{} {} {text}",
                    pos.line + 1,
                    pos.col + 1,
                    registry.name_of(node.kind())
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load(db: &RootDatabase, path: &Utf8Path) -> anyhow::Result<File> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
    tracing::debug!(%path, len = text.len(), "loaded file");
    Ok(File::new(db, path.to_owned(), text))
}

/// Logs go to stderr, filtered by `FERRITE_LOG` (`warn` when unset).
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("FERRITE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
