//! # sheetport-cli
//!
//! Command-line interface for the sheetport spreadsheet helper.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use comfy_table::{Cell, Table};
use sheetport_core::config::HOME_ENV;
use sheetport_core::{
    encode_dataset, field_text, import_file, normalize, CellValue, Dataset, ExportOptions,
    ExportPlan, Field, FileFormat, FileStorage, GroupSelection, HelperConfig, ImportOptions,
    KeyMode, MatchMode, Persistence, Predicate, Row, SortDirection, Workspace, ID_FIELD,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Name of the settings file looked up in the storage directory.
const CONFIG_FILE: &str = "config.yaml";

/// sheetport - import, search, group and export spreadsheet tables
#[derive(Parser)]
#[command(name = "sheetport")]
#[command(author, version, about = "Spreadsheet import/export helper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Settings file (default: <storage dir>/config.yaml)
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Directory holding the saved snapshot
    #[arg(long = "storage-dir", value_name = "DIR", global = true)]
    storage_dir: Option<PathBuf>,

    /// Output format (json, csv, table)
    #[arg(short = 'f', long = "format", default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the table
    Show {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the rows matching every condition
    Search {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// List the distinct values of a field with their row counts
    Groups {
        #[command(flatten)]
        source: SourceArgs,
        /// Field to group by
        #[arg(long, value_name = "FIELD")]
        by: String,
    },
    /// Write the table, or parts of it, to .xlsx/.csv files
    Export(ExportArgs),
    /// Save the current table, replacing any saved one
    Save {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Print the saved table
    Restore,
    /// Delete the saved table
    Clear,
    /// Show where the snapshot lives and whether one is saved
    Status,
}

/// Where the table comes from.
#[derive(Args, Debug)]
struct SourceArgs {
    /// .csv or .xlsx file to import
    #[arg(
        value_name = "FILE",
        required_unless_present = "restore",
        conflicts_with = "restore"
    )]
    file: Option<PathBuf>,

    /// Rename a source column (repeat for every column)
    #[arg(long = "rename", value_name = "OLD=NEW")]
    renames: Vec<String>,

    /// Use the saved snapshot instead of a file
    #[arg(long)]
    restore: bool,

    /// Read numbers and booleans from CSV text
    #[arg(long)]
    infer_types: bool,

    /// CSV field delimiter
    #[arg(long, value_name = "CHAR")]
    delimiter: Option<char>,
}

/// Conditions narrowing the current view.
#[derive(Args, Debug)]
struct SearchArgs {
    /// Condition on a field (repeatable)
    #[arg(long = "where", value_name = "FIELD=VALUE")]
    conditions: Vec<String>,

    /// Match by containment instead of equality
    #[arg(long)]
    fuzzy: bool,

    /// Match by equality, overriding a fuzzy default from the settings
    #[arg(long, conflicts_with = "fuzzy")]
    exact: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    search: SearchArgs,

    /// What to export
    #[arg(long, default_value = "current")]
    plan: PlanKind,

    /// File name without extension (ignored for grouped exports)
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// File type
    #[arg(long = "type")]
    file_type: Option<ExportType>,

    /// Sort a full export by this field
    #[arg(long, value_name = "FIELD")]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Field to group a grouped export by
    #[arg(long, value_name = "FIELD")]
    by: Option<String>,

    /// Group values to export (default: all groups)
    #[arg(long, value_name = "KEY", num_args = 1.., requires = "by")]
    select: Vec<String>,

    /// Directory to write into
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
}

/// Output format for results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Pretty table output (default)
    #[default]
    Table,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum PlanKind {
    /// The rows currently shown
    Current,
    /// Every row
    Full,
    /// One file per group
    Grouped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum ExportType {
    Xlsx,
    Csv,
}

impl From<ExportType> for FileFormat {
    fn from(value: ExportType) -> Self {
        match value {
            ExportType::Xlsx => FileFormat::Xlsx,
            ExportType::Csv => FileFormat::Csv,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "✗".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let mut slot = open_slot(&config)?;
    let options = export_options(&config);

    match cli.command {
        Command::Show { source } => {
            let workspace = open_workspace(&source, &config, &slot)?;
            print_dataset(workspace.fields(), workspace.view(), cli.format, &options)
        }
        Command::Search { source, search } => {
            let mut workspace = open_workspace(&source, &config, &slot)?;
            apply_search(&mut workspace, &search)?;
            print_dataset(workspace.fields(), workspace.view(), cli.format, &options)
        }
        Command::Groups { source, by } => {
            let workspace = open_workspace(&source, &config, &slot)?;
            let groups = workspace.groups(&by)?;

            let columns = [Field::new("group"), Field::new(by.as_str()), Field::new("rows")];
            let rows: Dataset = groups
                .counts()
                .into_iter()
                .enumerate()
                .map(|(index, (key, count))| {
                    [
                        ("group".to_string(), CellValue::from(index + 1)),
                        (by.clone(), CellValue::from(key)),
                        ("rows".to_string(), CellValue::from(count)),
                    ]
                    .into_iter()
                    .collect::<Row>()
                })
                .collect();
            print_rows(&columns, &rows, cli.format, &options)
        }
        Command::Export(args) => {
            let mut workspace = open_workspace(&args.source, &config, &slot)?;
            apply_search(&mut workspace, &args.search)?;

            let plan = build_plan(&args)?;
            let format = args.file_type.map_or(config.default_format, FileFormat::from);
            let report = workspace.export(
                &plan,
                &args.out_dir,
                args.name.as_deref(),
                format,
                &options,
            )?;
            for file in &report.files {
                success(&format!("Exported {}", file.display()));
            }
            Ok(())
        }
        Command::Save { source, search } => {
            let mut workspace = open_workspace(&source, &config, &slot)?;
            apply_search(&mut workspace, &search)?;

            let (fields, view) = workspace.snapshot_parts();
            let snapshot = slot.save(fields, view).context("Failed to save the table")?;
            success(&format!(
                "Saved {} rows at {}",
                snapshot.data_source.len(),
                snapshot.time
            ));
            Ok(())
        }
        Command::Restore => {
            let Some(snapshot) = slot.load()? else {
                bail!("No saved record to restore");
            };
            success(&format!("Restored table saved at {}", snapshot.time));
            print_dataset(&snapshot.columns, &snapshot.data_source, cli.format, &options)
        }
        Command::Clear => {
            slot.clear().context("Failed to clear the saved table")?;
            success("Cleared saved record");
            Ok(())
        }
        Command::Status => {
            let snapshot = slot.load()?;
            match cli.format {
                OutputFormat::Json => {
                    let status = serde_json::json!({
                        "storage_dir": slot.storage().dir().display().to_string(),
                        "key": slot.key(),
                        "saved_at": snapshot.as_ref().map(|s| s.time.as_str()),
                        "rows": snapshot.as_ref().map(|s| s.data_source.len()),
                    });
                    println!("{}", serde_json::to_string_pretty(&status)?);
                }
                OutputFormat::Csv | OutputFormat::Table => {
                    println!("{} {}", "storage:".cyan(), slot.storage().dir().display());
                    println!("{} {}", "key:".cyan(), slot.key());
                    match snapshot {
                        Some(s) => println!(
                            "{} {} rows saved at {}",
                            "record:".cyan(),
                            s.data_source.len(),
                            s.time
                        ),
                        None => println!("{} {}", "record:".cyan(), "none".yellow()),
                    }
                }
            }
            Ok(())
        }
    }
}

/// Resolve settings: `--config`, else `<storage dir>/config.yaml`, else
/// defaults. `SHEETPORT_HOME` and `--storage-dir` then override the
/// storage directory, the flag winning.
fn resolve_config(cli: &Cli) -> Result<HelperConfig> {
    let config = match &cli.config {
        Some(path) => HelperConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => match cli
            .storage_dir
            .clone()
            .or_else(env_storage_dir)
            .or_else(default_storage_dir)
        {
            Some(dir) => HelperConfig::load_or_default(&dir.join(CONFIG_FILE))?,
            None => HelperConfig::default(),
        },
    };

    let mut config = config.with_env_overrides();
    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = Some(dir.clone());
    }
    if config.storage_dir.is_none() {
        config.storage_dir = default_storage_dir();
    }
    tracing::debug!(storage_dir = ?config.storage_dir, key = %config.storage_key, "resolved settings");
    Ok(config)
}

fn env_storage_dir() -> Option<PathBuf> {
    std::env::var_os(HOME_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Get the default storage directory.
fn default_storage_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("sheetport"))
}

fn open_slot(config: &HelperConfig) -> Result<Persistence<FileStorage>> {
    let dir = config
        .storage_dir
        .clone()
        .with_context(|| format!("No storage directory; pass --storage-dir or set {HOME_ENV}"))?;
    Ok(Persistence::with_key(
        FileStorage::new(dir),
        config.storage_key.clone(),
    ))
}

fn export_options(config: &HelperConfig) -> ExportOptions {
    ExportOptions::default()
        .with_sheet_name(&config.sheet_name)
        .with_default_file_name(&config.default_file_name)
}

/// Load the table named by `source` into a fresh workspace.
///
/// Every argument is validated before the file is read.
fn open_workspace(
    source: &SourceArgs,
    config: &HelperConfig,
    slot: &Persistence<FileStorage>,
) -> Result<Workspace> {
    let mut workspace = Workspace::with_mode(config.match_mode);

    if source.restore {
        let Some(snapshot) = slot.load()? else {
            bail!("No saved record to restore");
        };
        workspace.restore(snapshot);
        return Ok(workspace);
    }

    let file = source
        .file
        .as_ref()
        .context("No input: pass a FILE or --restore")?;

    let mode = if source.renames.is_empty() {
        KeyMode::Default
    } else {
        KeyMode::Custom(parse_pairs(&source.renames)?.into_iter().collect())
    };

    let mut options =
        ImportOptions::default().with_type_inference(config.infer_csv_types || source.infer_types);
    if let Some(delimiter) = source.delimiter {
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("Delimiter must be a single ASCII character, got '{delimiter}'"))?;
        options = options.with_delimiter(delimiter);
    }

    let raw = import_file(file, &options)
        .with_context(|| format!("Failed to import {}", file.display()))?;
    let normalized = normalize(raw, &mode)?;
    workspace.load(normalized);

    success(&format!(
        "Imported {} rows from {}",
        workspace.base().len(),
        file.display()
    ));
    Ok(workspace)
}

fn apply_search(workspace: &mut Workspace, search: &SearchArgs) -> Result<()> {
    let predicate: Predicate = parse_pairs(&search.conditions)?.into_iter().collect();
    if search.fuzzy {
        workspace.set_mode(MatchMode::Fuzzy);
    } else if search.exact {
        workspace.set_mode(MatchMode::Exact);
    }
    if !predicate.is_empty() {
        workspace.search(&predicate)?;
    }
    Ok(())
}

/// Turn the export flags into a plan, rejecting flags the plan would ignore.
fn build_plan(args: &ExportArgs) -> Result<ExportPlan> {
    if args.plan != PlanKind::Full && args.sort.is_some() {
        bail!("--sort only applies to --plan full");
    }
    if args.plan != PlanKind::Grouped && args.by.is_some() {
        bail!("--by only applies to --plan grouped");
    }
    let plan = match args.plan {
        PlanKind::Current => ExportPlan::CurrentView,
        PlanKind::Full => {
            let direction = if args.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            };
            ExportPlan::Full {
                sort: args.sort.clone().map(|field| (field, direction)),
            }
        }
        PlanKind::Grouped => {
            let field = args
                .by
                .clone()
                .context("A grouped export needs --by FIELD")?;
            let selection = if args.select.is_empty() {
                GroupSelection::All
            } else {
                GroupSelection::Selected(args.select.clone())
            };
            ExportPlan::Grouped { field, selection }
        }
    };
    Ok(plan)
}

/// Split `KEY=VALUE` arguments.
fn parse_pairs(pairs: &[String]) -> Result<Vec<(String, String)>> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair.split_once('=').with_context(|| {
                format!("Invalid argument: '{pair}'. Expected KEY=VALUE format")
            })?;
            let key = key.trim();
            if key.is_empty() {
                bail!("Invalid argument: '{pair}'. Key is empty");
            }
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Print a dataset with its synthetic id shown first in table output.
fn print_dataset(
    fields: &[Field],
    data: &Dataset,
    format: OutputFormat,
    options: &ExportOptions,
) -> Result<()> {
    if format == OutputFormat::Table {
        let mut columns = vec![Field::new(ID_FIELD)];
        columns.extend(fields.iter().filter(|f| f.key != ID_FIELD).cloned());
        return print_rows(&columns, data, format, options);
    }
    print_rows(fields, data, format, options)
}

/// Print rows in the specified format.
fn print_rows(
    columns: &[Field],
    data: &Dataset,
    format: OutputFormat,
    options: &ExportOptions,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("(empty table)");
            } else {
                println!("{}", render_table(columns, data));
                println!("{} rows", data.len());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Csv => {
            let bytes = encode_dataset(data, columns, FileFormat::Csv, options)?;
            print!("{}", String::from_utf8_lossy(&bytes));
        }
    }
    Ok(())
}

/// Render rows as a boxed text table, one column per field.
fn render_table(columns: &[Field], data: &Dataset) -> String {
    let mut table = Table::new();
    table.load_preset("||--+-++|    ++++++");
    table.set_header(columns.iter().map(|f| Cell::new(&f.title)));
    for row in data.iter() {
        table.add_row(columns.iter().map(|f| Cell::new(field_text(row, &f.key))));
    }
    table.to_string()
}

/// Print a success notification.
fn success(message: &str) {
    println!("{} {message}", "✓".green().bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use unicode_width::UnicodeWidthStr;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), CellValue::from(*v)))
            .collect()
    }

    // ========================================================================
    // Argument parsing
    // ========================================================================

    #[test]
    fn test_cli_parse_show() {
        let cli = Cli::parse_from(["sheetport", "show", "data.csv"]);
        match cli.command {
            Command::Show { source } => {
                assert_eq!(source.file, Some(PathBuf::from("data.csv")));
                assert!(!source.restore);
            }
            _ => panic!("expected show"),
        }
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn test_cli_parse_search() {
        let cli = Cli::parse_from([
            "sheetport", "search", "data.csv", "--where", "name=a", "--where", "city=x",
            "--fuzzy", "-f", "json",
        ]);
        match cli.command {
            Command::Search { search, .. } => {
                assert_eq!(search.conditions, vec!["name=a", "city=x"]);
                assert!(search.fuzzy);
            }
            _ => panic!("expected search"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from([
            "sheetport", "export", "--restore", "--plan", "grouped", "--by", "team",
            "--select", "red", "blue", "--type", "csv",
        ]);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert!(args.source.restore);
        assert_eq!(args.plan, PlanKind::Grouped);
        assert_eq!(args.file_type, Some(ExportType::Csv));
        assert_eq!(
            build_plan(&args).unwrap(),
            ExportPlan::Grouped {
                field: "team".to_string(),
                selection: GroupSelection::Selected(vec!["red".to_string(), "blue".to_string()]),
            }
        );
    }

    #[test]
    fn test_cli_parse_full_export_sort() {
        let cli = Cli::parse_from([
            "sheetport", "export", "data.xlsx", "--plan", "full", "--sort", "age", "--desc",
        ]);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(
            build_plan(&args).unwrap(),
            ExportPlan::Full {
                sort: Some(("age".to_string(), SortDirection::Desc)),
            }
        );
    }

    #[test]
    fn test_cli_rejects_file_with_restore() {
        assert!(Cli::try_parse_from(["sheetport", "show", "data.csv", "--restore"]).is_err());
        assert!(Cli::try_parse_from(["sheetport", "show"]).is_err());
    }

    #[test]
    fn test_grouped_plan_needs_field() {
        let cli = Cli::parse_from(["sheetport", "export", "data.csv", "--plan", "grouped"]);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert!(build_plan(&args).is_err());
    }

    #[test]
    fn test_plan_rejects_ignored_flags() {
        let export_args = |args: &[&str]| {
            let cli = Cli::parse_from(["sheetport", "export", "data.csv"].iter().chain(args));
            let Command::Export(args) = cli.command else {
                panic!("expected export");
            };
            args
        };

        let err = build_plan(&export_args(&["--sort", "age", "--desc"])).unwrap_err();
        assert!(err.to_string().contains("--plan full"));
        assert!(build_plan(&export_args(&["--plan", "grouped", "--by", "team", "--sort", "age"])).is_err());

        let err = build_plan(&export_args(&["--plan", "full", "--by", "team"])).unwrap_err();
        assert!(err.to_string().contains("--plan grouped"));
        assert!(build_plan(&export_args(&["--by", "team", "--select", "red"])).is_err());

        assert_eq!(
            build_plan(&export_args(&["--plan", "full", "--sort", "age"])).unwrap(),
            ExportPlan::Full {
                sort: Some(("age".to_string(), SortDirection::Asc)),
            }
        );
    }

    #[test]
    fn test_exact_overrides_fuzzy_setting() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("people.csv");
        std::fs::write(&file, "name\nAda\nAdam\n").unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "match_mode: fuzzy\n").unwrap();

        let cli = Cli::parse_from([
            "sheetport",
            "--storage-dir",
            dir.path().to_str().unwrap(),
            "search",
            file.to_str().unwrap(),
            "--where",
            "name=ada",
            "--exact",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.match_mode, MatchMode::Fuzzy);
        let Command::Search { source, search } = cli.command else {
            panic!("expected search");
        };
        let slot = open_slot(&config).unwrap();
        let mut workspace = open_workspace(&source, &config, &slot).unwrap();
        apply_search(&mut workspace, &search).unwrap();
        assert_eq!(workspace.view().ids(), vec![1]);

        assert!(Cli::try_parse_from(["sheetport", "search", "a.csv", "--fuzzy", "--exact"]).is_err());
    }

    #[test]
    fn test_parse_pairs() {
        let pairs = parse_pairs(&["a=1".to_string(), " b =x=y".to_string()]).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "x=y".to_string())
            ]
        );
        assert!(parse_pairs(&["novalue".to_string()]).is_err());
        assert!(parse_pairs(&["=1".to_string()]).is_err());
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    #[test]
    fn test_render_table() {
        let data = Dataset::from_rows(vec![
            row(&[("name", "Ada"), ("city", "Oslo")]),
            row(&[("name", "Bo")]),
        ]);
        let columns = [Field::new("name"), Field::renamed("Town", "city")];

        let rendered = render_table(&columns, &data);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "+------+------+");
        assert_eq!(lines[1], "| name | Town |");
        assert_eq!(lines[3], "| Ada  | Oslo |");
        assert_eq!(lines[4], "| Bo   |      |");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_render_table_aligns_wide_characters() {
        let data = Dataset::from_rows(vec![
            row(&[("city", "北京"), ("note", "capital")]),
            row(&[("city", "Oslo"), ("note", "東京より北")]),
        ]);
        let columns = [Field::new("city"), Field::new("note")];

        let rendered = render_table(&columns, &data);
        let widths: Vec<_> = rendered.lines().map(UnicodeWidthStr::width).collect();
        assert_eq!(widths.len(), 6);
        assert!(widths.iter().all(|w| *w == widths[0]), "{rendered}");
        assert!(rendered.contains("| 北京 | capital    |"));
    }

    // ========================================================================
    // Commands
    // ========================================================================

    #[test]
    fn test_save_restore_clear() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("store");
        let file = dir.path().join("people.csv");
        std::fs::write(&file, "name,team\nAda,red\nBob,blue\n").unwrap();
        let store_arg = store.to_str().unwrap();
        let file_arg = file.to_str().unwrap();

        run(Cli::parse_from([
            "sheetport", "--storage-dir", store_arg, "save", file_arg, "--where", "team=red",
        ]))
        .unwrap();
        assert!(store.join("EXCEL_HELPER.json").exists());

        run(Cli::parse_from(["sheetport", "--storage-dir", store_arg, "restore"])).unwrap();
        run(Cli::parse_from(["sheetport", "--storage-dir", store_arg, "clear"])).unwrap();
        assert!(run(Cli::parse_from(["sheetport", "--storage-dir", store_arg, "restore"])).is_err());
        assert!(run(Cli::parse_from([
            "sheetport", "--storage-dir", store_arg, "show", "--restore",
        ]))
        .is_err());
    }

    #[test]
    fn test_export_command_writes_files() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("people.csv");
        std::fs::write(&file, "name,team\nAda,red\nBob,blue\nCy,red\n").unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();

        run(Cli::parse_from([
            "sheetport",
            "--storage-dir",
            dir.path().join("store").to_str().unwrap(),
            "export",
            file.to_str().unwrap(),
            "--plan",
            "grouped",
            "--by",
            "team",
            "--type",
            "csv",
            "--out-dir",
            out.to_str().unwrap(),
        ]))
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(out.join("1.csv")).unwrap(),
            "name,team\nBob,blue\n"
        );
        assert_eq!(
            std::fs::read_to_string(out.join("2.csv")).unwrap(),
            "name,team\nAda,red\nCy,red\n"
        );
    }

    #[test]
    fn test_unknown_where_field_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("people.csv");
        std::fs::write(&file, "name\nAda\n").unwrap();

        let result = run(Cli::parse_from([
            "sheetport",
            "--storage-dir",
            dir.path().to_str().unwrap(),
            "search",
            file.to_str().unwrap(),
            "--where",
            "city=Oslo",
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_storage_dir() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "default_format: csv\nstorage_key: slot\n")
            .unwrap();

        let cli = Cli::parse_from([
            "sheetport",
            "--storage-dir",
            dir.path().to_str().unwrap(),
            "status",
        ]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.default_format, FileFormat::Csv);
        assert_eq!(config.storage_key, "slot");
        assert_eq!(config.storage_dir, Some(dir.path().to_path_buf()));
    }
}
