//! Custom Bangs CLI
//!
//! Command-line tool for viewing, importing, exporting and editing custom
//! search bangs stored in a JSON file.

mod logging;

use bang_core::actions::{ADD_ROW_BUTTON, EXPORT_BUTTON, HELP_BUTTON, IMPORT_BUTTON, SAVE_BUTTON, SET_DEFAULT_BUTTON};
use bang_core::table::HEADER;
use bang_core::{
    mapping_to_csv, BangEditor, BangMapping, BangRow, BangStore, DirtyState, Effect, EditorConfig,
    Field, FileDefaults, ImportFile, ImportOutcome, JsonFileStore, Notice, RowId, Surface,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

#[derive(Parser)]
#[command(name = "bangs")]
#[command(about = "Custom search bang editor", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file holding the stored bangs
    #[arg(short, long, global = true, default_value = "bangs-store.json")]
    store: PathBuf,

    /// JSON file holding the default bangs
    #[arg(short, long, global = true, default_value = bang_core::defaults::DEFAULT_DEFAULTS_PATH)]
    defaults: PathBuf,

    /// Editor config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the stored bangs
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },

    /// Export the stored bangs to custombangs.json
    Export {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Import bangs from a JSON file, merged over the stored bangs
    Import {
        /// Path to the file to import
        #[arg(short, long)]
        file: PathBuf,

        /// Save the merged result
        #[arg(long)]
        save: bool,
    },

    /// Replace the bangs with the defaults
    RestoreDefaults {
        /// Save the defaults
        #[arg(long)]
        save: bool,
    },

    /// Add or replace a single bang and save
    Add {
        /// Bang shortcut
        #[arg(short, long)]
        bang: String,

        /// URL template
        #[arg(short, long)]
        url: String,
    },

    /// Remove a bang and save
    Remove {
        /// Bang shortcut
        #[arg(short, long)]
        bang: String,
    },

    /// Edit the bangs interactively
    Session,
}

/// Surface printing state changes to the terminal
#[derive(Default)]
struct TerminalSurface {
    quiet: bool,
}

impl Surface for TerminalSurface {
    fn row_added(&mut self, row: &BangRow) {
        debug!(row = %row.id, shortcut = %row.shortcut, "Row added");
    }

    fn row_changed(&mut self, row: &BangRow) {
        if !self.quiet && !row.is_filled() {
            println!("  ! row {} is incomplete and will be dropped on save", row.id);
        }
    }

    fn row_removed(&mut self, id: RowId) {
        debug!(row = %id, "Row removed");
    }

    fn dirty_changed(&mut self, state: DirtyState) {
        if !self.quiet {
            println!("[{}]", state);
        }
    }

    fn notice_raised(&mut self, notice: &Notice) {
        if let Some(line) = self.notice_line(notice) {
            eprintln!("{}", line);
        }
    }
}

impl TerminalSurface {
    /// Quiet one-shot commands report a rejected import through their error,
    /// so the notice is not printed as well.
    fn notice_line<'a>(&self, notice: &'a Notice) -> Option<&'a str> {
        (!self.quiet).then_some(notice.message.as_str())
    }
}

type Editor = BangEditor<JsonFileStore, FileDefaults, TerminalSurface>;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> bang_core::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Commands::Show { format } => cmd_show(&cli.store, &config, format).await,
        Commands::Session => {
            let editor = open_editor(&cli.store, &cli.defaults, config, false).await?;
            cmd_session(editor).await
        }
        command => {
            let editor = open_editor(&cli.store, &cli.defaults, config, true).await?;
            match command {
                Commands::Export { output } => cmd_export(&editor, &output).await,
                Commands::Import { file, save } => cmd_import(editor, &file, save).await,
                Commands::RestoreDefaults { save } => cmd_restore_defaults(editor, save).await,
                Commands::Add { bang, url } => cmd_add(editor, &bang, &url).await,
                Commands::Remove { bang } => cmd_remove(editor, &bang).await,
                Commands::Show { .. } | Commands::Session => unreachable!("handled above"),
            }
        }
    }
}

async fn open_editor(
    store: &Path,
    defaults: &Path,
    config: EditorConfig,
    quiet: bool,
) -> bang_core::Result<Editor> {
    BangEditor::load(
        config,
        JsonFileStore::new(store),
        FileDefaults::new(defaults),
        TerminalSurface { quiet },
    )
    .await
}

async fn cmd_show(store: &Path, config: &EditorConfig, format: Format) -> bang_core::Result<()> {
    let mapping = JsonFileStore::new(store)
        .get(&config.storage_key)
        .await?
        .unwrap_or_default();

    match format {
        Format::Table => print_mapping(&mapping),
        Format::Json => println!("{}", serde_json::to_string_pretty(&mapping)?),
        Format::Csv => print!("{}", mapping_to_csv(&mapping)?),
    }

    Ok(())
}

async fn cmd_export(editor: &Editor, output: &Path) -> bang_core::Result<()> {
    let artifact = editor.export().await?;
    let path = artifact.write_to_dir(output).await?;
    println!("Exported stored bangs to {}", path.display());
    Ok(())
}

async fn cmd_import(mut editor: Editor, file: &Path, save: bool) -> bang_core::Result<()> {
    let import = ImportFile::from_path(file).await?;

    match editor.import(&import).await? {
        ImportOutcome::Merged { imported, total } => {
            println!("Imported {} bangs ({} total after merge)", imported, total);
        }
        ImportOutcome::Rejected(reason) => {
            return Err(bang_core::Error::InvalidImportFile(reason));
        }
    }

    finish(editor, save).await
}

async fn cmd_restore_defaults(mut editor: Editor, save: bool) -> bang_core::Result<()> {
    let count = editor.restore_defaults().await?;
    println!("Loaded {} default bangs", count);
    finish(editor, save).await
}

async fn cmd_add(mut editor: Editor, bang: &str, url: &str) -> bang_core::Result<()> {
    editor.add_row_with(bang, url);
    let report = editor.save().await?;
    if report.discarded > 0 {
        println!("Bang or URL was empty, nothing added");
    } else {
        println!("Saved {} bangs", report.saved);
    }
    Ok(())
}

async fn cmd_remove(mut editor: Editor, bang: &str) -> bang_core::Result<()> {
    let ids: Vec<RowId> = editor
        .rows()
        .iter()
        .filter(|r| r.shortcut.trim() == bang)
        .map(|r| r.id)
        .collect();

    if ids.is_empty() {
        println!("No bang '{}' stored", bang);
        return Ok(());
    }

    for id in ids {
        editor.delete_row(id)?;
    }
    let report = editor.save().await?;
    println!("Removed '{}', {} bangs left", bang, report.saved);
    Ok(())
}

async fn finish(mut editor: Editor, save: bool) -> bang_core::Result<()> {
    if save {
        let report = editor.save().await?;
        println!("Saved {} bangs", report.saved);
    } else {
        print_rows(editor.rows());
        println!();
        println!("Not saved. Re-run with --save to keep these changes.");
    }
    Ok(())
}

const SESSION_HELP: &str = "\
Commands:
  list                        show the table
  add [bang url]              append a row (placeholder if omitted)
  edit <row> bang|url <text>  change a cell (empty text clears it)
  delete <row>                remove a row
  save                        save the table
  import <path>               merge a JSON file over the saved bangs
  export [dir]                write the saved bangs to custombangs.json
  defaults                    replace the table with the defaults
  status                      show whether there are unsaved changes
  help                        show this help
  docs                        show the documentation link
  quit                        leave the session";

async fn cmd_session(mut editor: Editor) -> bang_core::Result<()> {
    print_rows(editor.rows());
    println!();
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut confirm_quit = false;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        if command == "quit" || command == "exit" {
            if editor.is_dirty() && !confirm_quit {
                println!("There are unsaved changes. Type 'quit' again to discard them.");
                confirm_quit = true;
                continue;
            }
            break;
        }
        confirm_quit = false;

        if let Err(e) = session_command(&mut editor, command, rest).await {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

async fn session_command(editor: &mut Editor, command: &str, rest: &str) -> bang_core::Result<()> {
    match command {
        "list" | "ls" => print_rows(editor.rows()),
        "status" => println!("{}", editor.dirty_state()),
        "help" => println!("{}", SESSION_HELP),
        "add" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(bang), Some(url)) => {
                    let id = editor.add_row_with(bang, url);
                    println!("Added row {}", display_index(editor, id));
                }
                (None, _) => {
                    if let Effect::RowAdded(id) = editor.dispatch(ADD_ROW_BUTTON).await? {
                        println!("Added row {}", display_index(editor, id));
                    }
                }
                (Some(_), None) => println!("Usage: add [bang url]"),
            }
        }
        "edit" => {
            let mut parts = rest.splitn(3, ' ');
            let row = parts.next().unwrap_or_default();
            let field = parts.next().unwrap_or_default();
            let text = parts.next().unwrap_or_default();

            let Some(id) = row_by_index(editor, row) else {
                println!("Usage: edit <row> bang|url <text>");
                return Ok(());
            };
            match field.parse::<Field>() {
                Ok(field) => {
                    editor.edit_row(id, field, text)?;
                }
                Err(message) => println!("{}", message),
            }
        }
        "delete" | "rm" => match row_by_index(editor, rest) {
            Some(id) => {
                let row = editor.delete_row(id)?;
                println!("Deleted '{}'", row.shortcut);
            }
            None => println!("Usage: delete <row>"),
        },
        "import" => {
            if rest.is_empty() {
                println!("Usage: import <path>");
                return Ok(());
            }
            if editor.dispatch(IMPORT_BUTTON).await? == Effect::PickImportFile {
                let file = ImportFile::from_path(rest).await?;
                if let ImportOutcome::Merged { imported, total } = editor.import(&file).await? {
                    println!("Imported {} bangs ({} rows)", imported, total);
                }
            }
        }
        "save" => {
            if let Effect::Saved(report) = editor.dispatch(SAVE_BUTTON).await? {
                println!("Saved {} bangs", report.saved);
                if report.discarded > 0 {
                    println!("Dropped {} incomplete rows", report.discarded);
                }
            }
        }
        "export" => {
            if let Effect::Download(artifact) = editor.dispatch(EXPORT_BUTTON).await? {
                let dir = if rest.is_empty() { "." } else { rest };
                let path = artifact.write_to_dir(dir).await?;
                println!("Exported saved bangs to {}", path.display());
            }
        }
        "defaults" => {
            if let Effect::DefaultsRestored(count) = editor.dispatch(SET_DEFAULT_BUTTON).await? {
                println!("Loaded {} default bangs", count);
            }
        }
        "docs" => {
            if let Effect::OpenUrl(url) = editor.dispatch(HELP_BUTTON).await? {
                println!("{}", url);
            }
        }
        other => println!("Unknown command '{}'. Type 'help' for commands.", other),
    }
    Ok(())
}

/// Resolve a 1-based row number as shown by `list`
fn row_by_index(editor: &Editor, text: &str) -> Option<RowId> {
    let index: usize = text.trim().parse().ok()?;
    editor.table().row_at(index.checked_sub(1)?).map(|r| r.id)
}

fn display_index(editor: &Editor, id: RowId) -> usize {
    editor
        .rows()
        .iter()
        .position(|r| r.id == id)
        .map_or(0, |i| i + 1)
}

fn print_rows(rows: &[BangRow]) {
    println!("#\t{}\t{}", HEADER[0], HEADER[1]);
    println!("{}", "-".repeat(40));
    for (i, row) in rows.iter().enumerate() {
        let marker = if row.is_filled() { "" } else { "  <-- incomplete" };
        println!("{}\t{}\t{}{}", i + 1, row.shortcut, row.url, marker);
    }
    if rows.is_empty() {
        println!("(no bangs)");
    }
}

fn print_mapping(mapping: &BangMapping) {
    println!("{}\t{}", HEADER[0], HEADER[1]);
    println!("{}", "-".repeat(40));
    for (shortcut, url) in mapping.iter() {
        println!("{}\t{}", shortcut, url);
    }
    println!();
    println!("{} bangs", mapping.len());
}
