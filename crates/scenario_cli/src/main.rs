//! Command-line front end over the SQLite-backed scenario stores.
//!
//! # Responsibility
//! - Map subcommands onto store operations and read-only projections.
//! - Stand in for the editor's file dialogs: export/import by path.

use std::io::Read;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use log::info;
use scenario_core::collection::partition_index;
use scenario_core::{
    export_file_name, init_from_config, kanban_columns, markdown_preview, render_markdown,
    split_list, tag_universe, timeline, total_minutes, Act, CoreConfig, EntityId, Memo, MemoPatch,
    MemoStore, Scene, SceneFilter, ScenePatch, SceneStore, SqliteKeyValueStore,
};

#[derive(Parser)]
#[command(name = "scenario", version, about = "Scenario planning board")]
struct Cli {
    /// SQLite database path (or set SCENARIO_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error (or set SCENARIO_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute log directory (or set SCENARIO_LOG_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scene board operations
    #[command(subcommand)]
    Scenes(SceneCommands),
    /// Memo board operations
    #[command(subcommand)]
    Memos(MemoCommands),
    /// Write the scene collection as an export document
    Export(ExportArgs),
    /// Replace the scene collection from an export document or scene array
    Import(ImportArgs),
    /// Render Markdown from a file (or stdin) to sanitized HTML
    Render(RenderArgs),
}

#[derive(Subcommand)]
enum SceneCommands {
    /// Show the board, one column per act
    List(FilterArgs),
    /// Create a scene at the front
    Add(SceneAddArgs),
    Remove(IdArg),
    Duplicate(IdArg),
    /// Reorder inside one act column
    Move(MoveArgs),
    /// Move a scene to another act
    Act(ActArgs),
    /// Show cumulative timeline intervals
    Timeline(FilterArgs),
    /// List every distinct tag
    Tags,
    /// Delete every scene
    Clear,
}

#[derive(Subcommand)]
enum MemoCommands {
    List,
    Add(MemoAddArgs),
    Remove(IdArg),
    /// Expand or collapse a memo
    Toggle(IdArg),
    /// Reorder the board
    Move(IndexMoveArgs),
}

#[derive(Args)]
struct FilterArgs {
    /// Whitespace-separated search terms
    #[arg(long, default_value = "")]
    query: String,
    /// Exact tag, compared case-insensitively
    #[arg(long)]
    tag: Option<String>,
}

#[derive(Args)]
struct SceneAddArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    summary: Option<String>,
    /// Comma separated (`,` or `、`)
    #[arg(long)]
    tags: Option<String>,
    /// Comma separated (`,` or `、`)
    #[arg(long)]
    characters: Option<String>,
    #[arg(long)]
    minutes: Option<f64>,
    #[arg(long, value_parser = parse_act)]
    act: Option<Act>,
}

#[derive(Args)]
struct MemoAddArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    body: Option<String>,
}

#[derive(Args)]
struct IdArg {
    id: String,
}

#[derive(Args)]
struct MoveArgs {
    #[arg(value_parser = parse_act)]
    act: Act,
    from: usize,
    to: usize,
}

#[derive(Args)]
struct IndexMoveArgs {
    from: usize,
    to: usize,
}

#[derive(Args)]
struct ActArgs {
    id: String,
    #[arg(value_parser = parse_act)]
    act: Act,
}

#[derive(Args)]
struct ExportArgs {
    /// Output file or directory (default: scenario-YYYY-MM-DD.json)
    path: Option<PathBuf>,
}

#[derive(Args)]
struct ImportArgs {
    path: PathBuf,
}

#[derive(Args)]
struct RenderArgs {
    path: Option<PathBuf>,
    /// Print the one-line preview instead of HTML
    #[arg(long)]
    preview: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = resolve_config(&cli).and_then(|config| {
        init_from_config(&config)?;
        match cli.command {
            Commands::Scenes(command) => run_scenes(&config, command),
            Commands::Memos(command) => run_memos(&config, command),
            Commands::Export(args) => run_export(&config, args),
            Commands::Import(args) => run_import(&config, args),
            Commands::Render(args) => run_render(args),
        }
    });

    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig, String> {
    let mut config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(db) = &cli.db {
        config = config.with_db_path(db);
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level).map_err(|err| err.to_string())?;
    }
    if let Some(dir) = &cli.log_dir {
        config = config.with_log_dir(dir).map_err(|err| err.to_string())?;
    }
    Ok(config)
}

fn open_storage(config: &CoreConfig) -> Result<SqliteKeyValueStore, String> {
    SqliteKeyValueStore::open(&config.db_path)
        .map_err(|err| format!("failed to open `{}`: {err}", config.db_path.display()))
}

fn parse_act(raw: &str) -> Result<Act, String> {
    Act::parse(&raw.trim().to_ascii_uppercase())
        .ok_or_else(|| format!("unknown act `{raw}`; expected ACT1|ACT2|ACT3"))
}

fn filter_from(args: &FilterArgs) -> SceneFilter {
    let filter = SceneFilter::new(args.query.clone());
    match &args.tag {
        Some(tag) => filter.with_tag(tag.clone()),
        None => filter,
    }
}

fn require(changed: bool, what: &str, id: &str) -> Result<(), String> {
    if changed {
        Ok(())
    } else {
        Err(format!("{what} `{id}` not found or unchanged"))
    }
}

fn run_scenes(config: &CoreConfig, command: SceneCommands) -> Result<(), String> {
    let mut store = SceneStore::open(open_storage(config)?);
    match command {
        SceneCommands::List(args) => {
            for column in kanban_columns(store.scenes(), &filter_from(&args)) {
                println!(
                    "== {} ({} scenes, {} min)",
                    column.act,
                    column.count(),
                    column.total_minutes()
                );
                for (row, scene) in column.scenes.iter().enumerate() {
                    // Column position among all scenes of the act, as `scenes move` expects.
                    let index = partition_index(store.scenes(), &scene.id).unwrap_or(row);
                    println!(
                        "{index:>3}  {}  {}  [{}]  {} min",
                        scene.id,
                        scene.title,
                        scene.tags.join(", "),
                        scene.minutes()
                    );
                    let preview = markdown_preview(&scene.summary);
                    if !preview.is_empty() {
                        println!("       {preview}");
                    }
                }
            }
            println!("total={} min", total_minutes(store.scenes()));
        }
        SceneCommands::Add(args) => {
            let mut scene = Scene::new();
            ScenePatch {
                title: args.title,
                summary: args.summary,
                tags: args.tags.as_deref().map(split_list),
                characters: args.characters.as_deref().map(split_list),
                duration: args.minutes,
                act: args.act,
                ..ScenePatch::default()
            }
            .apply_to(&mut scene);
            let id = scene.id.clone();
            store.add(scene);
            println!("{id}");
        }
        SceneCommands::Remove(arg) => {
            require(store.remove(&EntityId::from(arg.id.as_str())), "scene", &arg.id)?;
        }
        SceneCommands::Duplicate(arg) => {
            let copy = store
                .duplicate(&EntityId::from(arg.id.as_str()))
                .ok_or_else(|| format!("scene `{}` not found", arg.id))?;
            println!("{copy}");
        }
        SceneCommands::Move(args) => {
            let changed = store.move_within_act(args.act, args.from, args.to);
            require(changed, "column position", &args.from.to_string())?;
        }
        SceneCommands::Act(args) => {
            let changed = store.change_act(&EntityId::from(args.id.as_str()), args.act);
            require(changed, "scene", &args.id)?;
        }
        SceneCommands::Timeline(args) => {
            let line = timeline(store.scenes(), &filter_from(&args));
            for bar in &line.bars {
                println!(
                    "[{:>6.1}, {:>6.1})  {:>5.1}%  {}  {}",
                    bar.start,
                    bar.end,
                    line.width_fraction(bar) * 100.0,
                    bar.act,
                    bar.title
                );
            }
            let [start, middle, end] = line.axis_labels();
            println!("axis: {start} / {middle} / {end} min");
        }
        SceneCommands::Tags => {
            for tag in tag_universe(store.scenes()) {
                println!("{tag}");
            }
        }
        SceneCommands::Clear => {
            store.clear();
        }
    }
    Ok(())
}

fn run_memos(config: &CoreConfig, command: MemoCommands) -> Result<(), String> {
    let mut store = MemoStore::open(open_storage(config)?);
    match command {
        MemoCommands::List => {
            for (index, memo) in store.memos().iter().enumerate() {
                let marker = if memo.open { "v" } else { ">" };
                println!("{index:>3} {marker} {}  {}", memo.id, memo.display_title());
                if memo.open {
                    for line in memo.body.lines() {
                        println!("      {line}");
                    }
                }
            }
        }
        MemoCommands::Add(args) => {
            let mut memo = Memo::new();
            MemoPatch {
                title: args.title,
                body: args.body,
                open: None,
            }
            .apply_to(&mut memo);
            let id = memo.id.clone();
            store.add(memo);
            println!("{id}");
        }
        MemoCommands::Remove(arg) => {
            require(store.remove(&EntityId::from(arg.id.as_str())), "memo", &arg.id)?;
        }
        MemoCommands::Toggle(arg) => {
            require(
                store.toggle_open(&EntityId::from(arg.id.as_str())),
                "memo",
                &arg.id,
            )?;
        }
        MemoCommands::Move(args) => {
            let changed = store.move_item(args.from, args.to);
            require(changed, "memo position", &args.from.to_string())?;
        }
    }
    Ok(())
}

fn run_export(config: &CoreConfig, args: ExportArgs) -> Result<(), String> {
    let store = SceneStore::open(open_storage(config)?);
    let now = Utc::now();
    let file_name = export_file_name(now.date_naive());
    let path = match args.path {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path,
        None => PathBuf::from(file_name),
    };

    let document = store.export(now).map_err(|err| format!("failed to encode export: {err}"))?;
    std::fs::write(&path, document)
        .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
    info!(
        "event=scene_export module=cli status=ok scenes={}",
        store.scenes().len()
    );
    println!("{}", path.display());
    Ok(())
}

fn run_import(config: &CoreConfig, args: ImportArgs) -> Result<(), String> {
    let mut store = SceneStore::open(open_storage(config)?);
    let ticket = store.begin_import();
    let text = std::fs::read_to_string(&args.path)
        .map_err(|err| format!("failed to read `{}`: {err}", args.path.display()))?;
    let count = store
        .finish_import(ticket, &text)
        .map_err(|err| err.to_string())?;
    println!("imported {count} scenes");
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<(), String> {
    let text = match &args.path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed to read stdin: {err}"))?;
            buffer
        }
    };

    if args.preview {
        println!("{}", markdown_preview(&text));
    } else {
        print!("{}", render_markdown(&text));
    }
    Ok(())
}
