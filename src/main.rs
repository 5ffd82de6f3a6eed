//! Pili streaming demo CLI
//!
//! Entry point for the `pili-demo` command-line tool.

use clap::{Parser, Subcommand};
use pili_demo::config::{unset_empty_file_paths, StartupConfig};
use pili_demo::logging::init_logging;
use pili_demo::{session, ConfigPath, ConfigStore, Platform, Screen, StaticGate, TracingEngine};
use serde_json::Value;
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "pili-demo")]
#[command(about = "Pili streaming demo: inspect and patch the streaming configuration", version)]
struct Cli {
    /// Target platform for platform-specific defaults
    #[arg(long, global = true, default_value = "android")]
    platform: Platform,

    /// Config file layered over the built-in defaults (.toml or .json)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Override a value, e.g. --set profile.quicEnable=true (repeatable)
    #[arg(long = "set", global = true, value_name = "PATH=VALUE")]
    overrides: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the startup configuration
    Show {
        /// Compact JSON instead of pretty-printed
        #[arg(long)]
        json: bool,

        /// Also print the contributing config sources
        #[arg(long)]
        sources: bool,
    },

    /// Print the value at a dot-separated path (null when absent)
    Get {
        path: String,
    },

    /// Write a value at a path and print the resulting configuration
    Set {
        path: String,

        /// JSON value; anything that is not valid JSON is taken as a string
        value: String,
    },

    /// Deep-merge a JSON object patch and print the resulting configuration
    Patch {
        text: String,
    },

    /// List the screen's controls with their current values
    Controls,

    /// Drive the screen from stdin, one event per line
    Session {
        /// Simulate the user denying the permission request
        #[arg(long)]
        deny_permission: bool,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let startup = match StartupConfig::build(cli.platform, cli.config.as_deref(), &cli.overrides) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Show { json, sources } => run_show(&startup, json, sources),
        Commands::Get { path } => run_get(&startup, &path),
        Commands::Set { path, value } => run_set(startup, &path, &value),
        Commands::Patch { text } => run_patch(startup, &text),
        Commands::Controls => run_controls(startup),
        Commands::Session { deny_permission } => run_session(startup, deny_permission),
    }
}

fn run_show(startup: &StartupConfig, compact: bool, show_sources: bool) {
    if compact {
        println!("{}", startup.config);
    } else {
        println!("{:#}", startup.config);
    }

    if show_sources {
        eprintln!("Sources ({}):", startup.platform);
        for source in &startup.sources {
            match (&source.path, &source.digest) {
                (Some(path), Some(digest)) => {
                    eprintln!("  {:?}: {} (sha256 {})", source.origin, path, digest)
                }
                _ => eprintln!("  {:?}", source.origin),
            }
        }
    }
}

fn run_get(startup: &StartupConfig, path: &str) {
    let store = ConfigStore::new(startup.config.clone());
    println!("{:#}", store.read(&ConfigPath::parse(path)));
}

fn run_set(startup: StartupConfig, path: &str, raw: &str) {
    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    let mut store = ConfigStore::new(startup.config);
    store.write(&ConfigPath::parse(path), value);
    unset_empty_file_paths(&mut store);
    println!("{:#}", store.current());
}

fn run_patch(startup: StartupConfig, text: &str) {
    let mut store = ConfigStore::new(startup.config);
    if let Err(e) = store.apply_raw_patch(text) {
        eprintln!("{}", e);
        process::exit(1);
    }
    unset_empty_file_paths(&mut store);
    println!("{:#}", store.current());
}

fn run_controls(startup: StartupConfig) {
    let store = ConfigStore::new(startup.config);
    let controls = pili_demo::screen_controls(startup.platform);

    for (index, binding) in controls.iter().enumerate() {
        println!(
            "[{:2}] {:<26} {:<6} {} = {}",
            index,
            binding.label,
            binding.kind.name(),
            binding.path,
            binding.value(&store)
        );
        if let pili_demo::InputKind::Choice(options) = binding.kind {
            println!("     options: {}", options.join(", "));
        }
    }
}

fn run_session(startup: StartupConfig, deny_permission: bool) {
    let mut screen = Screen::new(startup.platform, startup.config, TracingEngine::new());

    let mut gate = if deny_permission {
        StaticGate::denying()
    } else {
        StaticGate::granting()
    };
    screen.start(&mut gate);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = session::run(&mut screen, stdin.lock(), &mut out) {
        eprintln!("Session error: {}", e);
        process::exit(1);
    }
}
