// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Qlvt CLI entrypoint.
//!
//! Every command loads the data file; mutating commands apply one op batch and save it back.
//! Positions are the ones printed by `list`.

use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use qlvt::import::{clean_rows, read_rows_json};
use qlvt::model::{Item, Workspace};
use qlvt::ops::{apply_ops, ApplyResult, Op};
use qlvt::query::{SearchSession, SearchView};
use qlvt::store::{DataFile, StoreError, WriteDurability, DEFAULT_DATA_FILENAME};
use qlvt::ui::{copy_item_code, display_label, visible_rows, StreamClipboard};

#[derive(Debug, Parser)]
#[command(name = "qlvt", version, about = "Personal materials catalog")]
struct Cli {
    /// Data file holding the catalog and bookmarks.
    #[arg(long, env = "QLVT_DATA", default_value = DEFAULT_DATA_FILENAME, global = true)]
    data: PathBuf,

    /// Flush writes to stable storage (fsync where supported).
    #[arg(long, global = true)]
    durable_writes: bool,

    /// Log more (repeatable). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Command {
    /// Replace the catalog with rows from a JSON array export of the spreadsheet.
    Import { rows: PathBuf },
    /// Print the catalog in order.
    List,
    /// Print the bookmarks in order.
    Bookmarks,
    /// Print items whose code or name contains QUERY.
    Search { query: String },
    /// Append an item.
    Add { code: String, name: String },
    /// Replace the code and name of the item at POSITION.
    Edit {
        position: usize,
        code: String,
        name: String,
    },
    /// Remove the item at POSITION.
    Remove { position: usize },
    /// Move an item. With --query, FROM and TO are rows of that search's results.
    Move {
        from: usize,
        to: usize,
        #[arg(long)]
        query: Option<String>,
    },
    /// Toggle the bookmark on CODE.
    Bookmark { code: String },
    /// Reorder the bookmarks.
    BookmarkMove { from: usize, to: usize },
    /// Write CODE to stdout for piping into a clipboard tool.
    Copy { code: String },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("qlvt={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn data_file(cli: &Cli) -> DataFile {
    let durability = if cli.durable_writes {
        WriteDurability::Durable
    } else {
        WriteDurability::BestEffort
    };
    DataFile::new(&cli.data).with_durability(durability)
}

fn print_items<'a>(items: impl IntoIterator<Item = (usize, &'a Item)>) {
    for (position, item) in items {
        println!("{position:>5}  {}", display_label(item));
    }
}

fn evaluate(workspace: &Workspace, query: &str) -> SearchView {
    let mut session = SearchSession::new();
    session.on_query_changed(query, Instant::now());
    session.evaluate(workspace.catalog()).clone()
}

fn commit(
    data: &DataFile,
    workspace: &mut Workspace,
    ops: &[Op],
) -> Result<ApplyResult, Box<dyn Error>> {
    let base_rev = workspace.rev();
    let result = apply_ops(workspace, base_rev, ops)?;
    data.save(workspace)?;
    Ok(result)
}

/// Loads the workspace `command` runs against.
///
/// `import` replaces the catalog anyway, so an unreadable document does not block it.
fn load_for(command: &Command, data: &DataFile) -> Result<Workspace, StoreError> {
    match data.load_or_default() {
        Err(StoreError::Document { path, source }) if matches!(command, Command::Import { .. }) => {
            tracing::warn!(
                path = %path.display(),
                error = %source,
                "data file is unreadable; import will replace it"
            );
            Ok(Workspace::new())
        }
        other => other,
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let data = data_file(&cli);
    let mut workspace = load_for(&cli.command, &data)?;

    match cli.command {
        Command::List => {
            print_items(workspace.catalog().snapshot().iter().enumerate());
        }
        Command::Bookmarks => {
            print_items(workspace.bookmarks().entries().iter().enumerate());
        }
        Command::Search { query } => {
            let view = evaluate(&workspace, &query);
            for row in visible_rows(&workspace, &view) {
                let mark = if row.bookmarked { '*' } else { ' ' };
                println!("{:>5} {mark} {}", row.position, row.label);
            }
        }
        Command::Copy { code } => {
            let catalog = workspace.catalog();
            let item = catalog
                .position_of(&code)
                .and_then(|position| catalog.get(position))
                .ok_or_else(|| format!("no item with code {code:?}"))?;
            copy_item_code(&mut StreamClipboard::new(io::stdout()), item);
        }
        Command::Import { rows } => {
            let cleaned = clean_rows(read_rows_json(&rows)?);
            let dropped = cleaned.dropped;
            let result = commit(&data, &mut workspace, &[Op::Import {
                items: cleaned.items,
            }])?;
            eprintln!(
                "imported {} items ({} rows skipped, {} added, {} removed, {} updated)",
                workspace.catalog().len(),
                dropped,
                result.delta.added.len(),
                result.delta.removed.len(),
                result.delta.updated.len(),
            );
        }
        Command::Add { code, name } => {
            commit(&data, &mut workspace, &[Op::Add { code, name }])?;
        }
        Command::Edit {
            position,
            code,
            name,
        } => {
            commit(&data, &mut workspace, &[Op::Edit {
                position,
                code,
                name,
            }])?;
        }
        Command::Remove { position } => {
            commit(&data, &mut workspace, &[Op::Remove { position }])?;
        }
        Command::Move { from, to, query } => {
            let (from, to) = match query {
                Some(query) => {
                    evaluate(&workspace, &query).resolve_move(workspace.catalog(), from, to)?
                }
                None => (from, to),
            };
            commit(&data, &mut workspace, &[Op::Move { from, to }])?;
        }
        Command::Bookmark { code } => {
            let was_bookmarked = workspace.is_bookmarked(&code);
            if !was_bookmarked && !workspace.catalog().contains_code(&code) {
                return Err(format!("no item with code {code:?}").into());
            }
            commit(&data, &mut workspace, &[Op::ToggleBookmark { code }])?;
        }
        Command::BookmarkMove { from, to } => {
            commit(&data, &mut workspace, &[Op::MoveBookmark { from, to }])?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("qlvt: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::{CommandFactory, Parser};
    use qlvt::store::{DataFile, StoreError};

    use super::{load_for, Cli, Command};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_move_with_query_and_global_flags() {
        let cli = Cli::try_parse_from([
            "qlvt", "move", "2", "0", "--query", "bolt", "--data", "x.json", "-vv",
        ])
        .expect("parse");
        assert_eq!(
            cli.command,
            Command::Move {
                from: 2,
                to: 0,
                query: Some("bolt".to_owned())
            }
        );
        assert_eq!(cli.data.to_str(), Some("x.json"));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.durable_writes);
    }

    #[test]
    fn parses_kebab_case_subcommand() {
        let cli = Cli::try_parse_from(["qlvt", "--durable-writes", "bookmark-move", "1", "0"])
            .expect("parse");
        assert_eq!(cli.command, Command::BookmarkMove { from: 1, to: 0 });
        assert!(cli.durable_writes);
    }

    #[test]
    fn rejects_negative_positions() {
        assert!(Cli::try_parse_from(["qlvt", "remove", "-1"]).is_err());
    }

    #[test]
    fn import_loads_past_an_unreadable_data_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"[{"code": "A1", "name": "Bolt"}, {"code": "A1", "name": "Bolt M8"}]"#,
        )
        .expect("write");
        let data = DataFile::new(&path);

        assert!(matches!(
            load_for(&Command::List, &data),
            Err(StoreError::Document { .. })
        ));
        let import = Command::Import {
            rows: "rows.json".into(),
        };
        let workspace = load_for(&import, &data).expect("import starts empty");
        assert!(workspace.catalog().is_empty());
    }

    #[test]
    fn import_still_reports_io_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data = DataFile::new(dir.path());
        let import = Command::Import {
            rows: "rows.json".into(),
        };
        assert!(matches!(
            load_for(&import, &data),
            Err(StoreError::Io { .. })
        ));
    }
}
