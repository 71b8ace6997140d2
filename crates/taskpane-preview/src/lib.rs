pub mod cli;
pub mod table;

use std::ffi::OsString;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use taskpane_core::filter::FilterState;
use taskpane_core::render::{ListSurface, MarkupSurface};
use taskpane_core::{Config, Settings, TaskBoard, TaskStore};
use tracing::{debug, info};

use crate::cli::{Format, PreviewCli};
use crate::table::TableSurface;

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = PreviewCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting taskpane preview"
    );

    let mut cfg = Config::load(cli.rc_file.as_deref())?;
    cfg.apply_overrides(
        cli.rc_overrides
            .iter()
            .map(|kv| (kv.key.clone(), kv.value.clone())),
    );
    let settings = Settings::from_config(&cfg).context("invalid taskpane settings")?;
    debug!(?settings, "resolved settings");

    let store = load_store(&cli.seed)?;
    let filters = FilterState::from_controls(&cli.search, &cli.status, &cli.priority);

    let mut out = io::stdout().lock();
    match cli.format {
        Format::Markup => {
            let board = run_pipeline(store, settings, filters, MarkupSurface::new());
            writeln!(out, "<ul id=\"taskList\">")?;
            write!(out, "{}", board.surface().as_str())?;
            writeln!(out, "</ul>")?;
        }
        Format::Table => {
            let color = settings.color && io::stdout().is_terminal();
            let board = run_pipeline(store, settings, filters, TableSurface::new(color));
            board.surface().write_to(&mut out)?;
        }
    }

    info!("done");
    Ok(())
}

fn run_pipeline<S: ListSurface>(
    store: TaskStore,
    settings: Settings,
    filters: FilterState,
    surface: S,
) -> TaskBoard<S> {
    let mut board = TaskBoard::new(store, settings, surface);
    let visible = board.set_filters(filters);
    info!(
        visible,
        total = board.store().len(),
        "rendered preview"
    );
    board
}

#[tracing::instrument]
fn load_store(seed: &Path) -> anyhow::Result<TaskStore> {
    let text = if seed == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read tasks from stdin")?;
        buf
    } else {
        fs::read_to_string(seed)
            .with_context(|| format!("failed to read {}", seed.display()))?
    };

    TaskStore::from_json(&text)
        .with_context(|| format!("invalid task list in {}", seed.display()))
}
