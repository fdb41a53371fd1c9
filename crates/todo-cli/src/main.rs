use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use todo_core::app::StorageKind;
use todo_core::{
    AppConfig, NewTodo, Priority, Todo, TodoId, TodoPatch, TodoService, TodoServiceBuilder,
    TodoStatus,
};

/// Personal todo list.
#[derive(Debug, Parser)]
#[command(name = "todo", version)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store todos in this JSON file
    #[arg(long, global = true, conflicts_with = "memory")]
    data: Option<PathBuf>,

    /// Keep todos in memory only (nothing is saved)
    #[arg(long, global = true)]
    memory: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// More logging (-v: info, -vv: debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new active todo
    Add(AddArgs),
    /// List todos
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<TodoStatus>,
    },
    /// Show one todo
    Show { id: TodoId },
    /// Change fields of a todo
    Update(UpdateArgs),
    /// Toggle active <-> completed
    Complete { id: TodoId },
    /// Toggle active <-> archived
    Archive { id: TodoId },
    /// Delete a todo
    Delete { id: TodoId },
}

#[derive(Debug, Args)]
struct AddArgs {
    title: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, value_parser = parse_date)]
    due: Option<NaiveDate>,
    #[arg(long, value_parser = parse_priority)]
    priority: Option<Priority>,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    id: TodoId,
    #[arg(long)]
    title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    description: Option<String>,
    #[arg(long)]
    clear_description: bool,
    #[arg(long, value_parser = parse_date, conflicts_with = "clear_due")]
    due: Option<NaiveDate>,
    #[arg(long)]
    clear_due: bool,
    #[arg(long, value_parser = parse_status)]
    status: Option<TodoStatus>,
    #[arg(long, value_parser = parse_priority)]
    priority: Option<Priority>,
}

impl UpdateArgs {
    fn patch(&self) -> TodoPatch {
        TodoPatch {
            title: self.title.clone(),
            description: clearable(self.description.clone(), self.clear_description),
            due_date: clearable(self.due, self.clear_due),
            status: self.status,
            priority: self.priority,
        }
    }
}

fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear { Some(None) } else { value.map(Some) }
}

fn parse_status(s: &str) -> Result<TodoStatus, String> {
    s.parse().map_err(|e: todo_core::TodoError| e.to_string())
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    let value: i64 = s.parse().map_err(|e| format!("{e}"))?;
    Priority::new(value).map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(data) = &cli.data {
        config.storage = StorageKind::Json;
        config.data_path = Some(data.clone());
    }
    if cli.memory {
        config.storage = StorageKind::Memory;
    }
    match cli.verbose {
        0 => {}
        1 => config.log = "info".to_string(),
        _ => config.log = "debug".to_string(),
    }
    Ok(config)
}

fn log_filter(config: &AppConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(&config.log).with_context(|| format!("invalid log filter {:?}", config.log))
}

fn init_tracing(config: &AppConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(config)?)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

struct Printer {
    json: bool,
}

impl Printer {
    fn one(&self, todo: &Todo) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(todo)?);
        } else {
            println!("{}", line(todo));
        }
        Ok(())
    }

    fn many(&self, todos: &[Todo]) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(todos)?);
        } else {
            for todo in todos {
                println!("{}", line(todo));
            }
        }
        Ok(())
    }
}

fn line(todo: &Todo) -> String {
    let priority = todo
        .priority()
        .map(|p| format!("p{p}"))
        .unwrap_or_else(|| "-".to_string());
    let due = todo
        .due_date
        .map(|d| format!("  due {d}"))
        .unwrap_or_default();
    format!(
        "{:>8}  {:<9}  {:>4}  {}{}",
        todo.id.to_string(),
        todo.status().as_str(),
        priority,
        todo.title,
        due
    )
}

/// `None` は not-found（終了コード 1）
async fn run(service: &TodoService, command: Command, out: &Printer) -> Result<Option<()>> {
    let found = match command {
        Command::Add(args) => {
            let mut new = NewTodo::new(args.title);
            new.description = args.description;
            new.due_date = args.due;
            new.priority = args.priority;
            Some(service.create(new).await?)
        }
        Command::List { status } => {
            let todos = match status {
                Some(status) => service.list_by_status(status).await?,
                None => service.list().await?,
            };
            out.many(&todos)?;
            return Ok(Some(()));
        }
        Command::Show { id } => service.get(id).await?,
        Command::Update(args) => service.update(args.id, args.patch()).await?,
        Command::Complete { id } => service.toggle_completed(id).await?,
        Command::Archive { id } => service.toggle_archived(id).await?,
        Command::Delete { id } => {
            return Ok(service.delete(id).await?.then(|| println!("deleted {id}")));
        }
    };
    match found {
        Some(todo) => {
            out.one(&todo)?;
            Ok(Some(()))
        }
        None => Ok(None),
    }
}

fn target_id(command: &Command) -> Option<TodoId> {
    match command {
        Command::Show { id }
        | Command::Complete { id }
        | Command::Archive { id }
        | Command::Delete { id } => Some(*id),
        Command::Update(args) => Some(args.id),
        Command::Add(_) | Command::List { .. } => None,
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config)?;
    tracing::debug!(?config, "configuration loaded");

    let service = TodoServiceBuilder::from_config(&config)?.build()?;
    let out = Printer { json: cli.json };
    let id = target_id(&cli.command);

    match run(&service, cli.command, &out).await? {
        Some(()) => Ok(ExitCode::SUCCESS),
        None => {
            if let Some(id) = id {
                eprintln!("{id} not found");
            }
            Ok(ExitCode::from(1))
        }
    }
}
