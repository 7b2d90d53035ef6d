use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use media_catalog::cli_style::{
    get_prompt, get_styles, print_error, print_goodbye, print_help, print_result_set,
    print_success, print_warning, print_welcome,
};
use media_catalog::commands::{CommandDefinition, CommandRegistry};
use media_catalog::config::{AppConfig, CliConfig, FileConfig};
use media_catalog::{Catalog, Session};

use rustyline::{
    completion::Completer,
    highlight::Highlighter,
    history::FileHistory,
    validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Catalog files to load at startup.
    #[clap(value_parser = parse_path)]
    pub files: Vec<PathBuf>,

    /// Path to a TOML config file. Its values override the flags below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory where `save` and `save-search` write relative file names.
    #[clap(long, value_parser = parse_path)]
    pub export_dir: Option<PathBuf>,

    /// File used to persist the command history between runs.
    #[clap(long, value_parser = parse_path)]
    pub history_file: Option<PathBuf>,

    /// Log filter used when LOG_LEVEL is not set, e.g. "debug".
    #[clap(long)]
    pub log_level: Option<String>,
}

#[derive(Parser)]
#[command(styles=get_styles(), name = "", disable_help_subcommand = true)]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Load catalog files.
    Load {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List every file, or the files holding any of the given values.
    List {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List the files holding any of the given key/value pairs.
    ListMeta {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Add key/value pairs to a file of the last result.
    Add {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Replace the values of existing keys on a file of the last result.
    Set {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Delete keys from a file of the last result.
    Del {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Delete key/value pairs from every file.
    DelAll {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Save the whole catalog.
    Save {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Save the files of the last result.
    SaveSearch {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show the available commands.
    Help,

    /// Clear the screen.
    Clear,

    /// Close this program.
    #[command(alias = "exit")]
    Quit,
}

/// Commands handled by the loop itself rather than the registry.
const REPL_COMMANDS: [CommandDefinition; 3] = [
    CommandDefinition {
        name: "help",
        args: "",
        description: "show this help",
    },
    CommandDefinition {
        name: "clear",
        args: "",
        description: "clear the screen",
    },
    CommandDefinition {
        name: "quit",
        args: "",
        description: "close this program (also 'exit')",
    },
];

enum CommandExecutionResult {
    Ok,
    Clear,
    Exit,
    Error(String),
}

fn print_load_summary(catalog: &Catalog) {
    let skipped = catalog.last_load().skipped.len();
    if skipped == 0 {
        print_success(&format!("{} file(s) in the catalog", catalog.len()));
    } else {
        print_warning(&format!(
            "{} file(s) in the catalog, {} skipped",
            catalog.len(),
            skipped
        ));
    }
}

fn run_catalog_command(
    session: &mut Session,
    name: &str,
    args: Vec<String>,
) -> CommandExecutionResult {
    if let Err(err) = session.execute(name, &args) {
        return CommandExecutionResult::Error(err.to_string());
    }
    match name {
        "load" => print_load_summary(session.catalog()),
        "save" | "save-search" => print_success("Saved"),
        _ => print_result_set(session.last_result(), session.catalog()),
    }
    CommandExecutionResult::Ok
}

fn execute_command(line: &str, session: &mut Session) -> CommandExecutionResult {
    if line.trim().is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    match cli {
        Ok(cli) => match cli.command {
            InnerCommand::Load { args } => run_catalog_command(session, "load", args),
            InnerCommand::List { args } => run_catalog_command(session, "list", args),
            InnerCommand::ListMeta { args } => run_catalog_command(session, "list-meta", args),
            InnerCommand::Add { args } => run_catalog_command(session, "add", args),
            InnerCommand::Set { args } => run_catalog_command(session, "set", args),
            InnerCommand::Del { args } => run_catalog_command(session, "del", args),
            InnerCommand::DelAll { args } => run_catalog_command(session, "del-all", args),
            InnerCommand::Save { args } => run_catalog_command(session, "save", args),
            InnerCommand::SaveSearch { args } => {
                run_catalog_command(session, "save-search", args)
            }
            InnerCommand::Help => {
                let mut definitions = session.definitions();
                definitions.extend(REPL_COMMANDS);
                print_help(&definitions);
                CommandExecutionResult::Ok
            }
            InnerCommand::Clear => CommandExecutionResult::Clear,
            InnerCommand::Quit => CommandExecutionResult::Exit,
        },
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            CommandExecutionResult::Ok
        }
    }
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let mut commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();
        commands_names.push("exit".to_string());

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        files: cli_args.files,
        export_dir: cli_args.export_dir,
        history_file: cli_args.history_file,
        log_level: cli_args.log_level,
    };
    let app_config = AppConfig::resolve(&cli_config, file_config)?;

    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new(&app_config.log_level))
        .context("Invalid log filter")?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("Could not install the log subscriber")?;

    let mut session = Session::new(CommandRegistry::with_defaults(&app_config.export_dir));

    if !app_config.preload.is_empty() {
        let files: Vec<String> = app_config
            .preload
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        info!("Preloading {} file(s)", files.len());
        match session.execute("load", &files) {
            Ok(_) => print_load_summary(session.catalog()),
            Err(err) => print_warning(&format!("Preload failed: {}", err)),
        }
    }

    print_welcome(&app_config.export_dir, session.catalog().len());

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<MyHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(MyHelper::new()));
    if let Some(history) = &app_config.history_file {
        if rl.load_history(history).is_err() {
            info!("No history at {}", history.display());
        }
    }

    loop {
        let readline = rl.readline(&get_prompt(session.last_result().len()));

        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                match execute_command(&line, &mut session) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Clear => {
                        let _ = rl.clear_screen();
                    }
                    CommandExecutionResult::Exit => {
                        break;
                    }
                    CommandExecutionResult::Error(err) => {
                        print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("{:?}", e));
                break;
            }
        }
    }

    if let Some(history) = &app_config.history_file {
        if let Err(err) = rl.save_history(history) {
            warn!("Could not save history to {}: {}", history.display(), err);
        }
    }
    print_goodbye();
    Ok(())
}
