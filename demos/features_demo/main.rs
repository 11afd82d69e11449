//! # featurefig demo application
//!
//! A sample CLI tool that wires featurefig into a clap app. It exists to
//! demonstrate and manually verify the features commands against a real file.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example features_demo -- features list
//! cargo run --example features_demo -- features set icon_style nerd-fonts
//! cargo run --example features_demo -- features toggle icon_style
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                  | How to exercise it                                                   |
//! |--------------------------|----------------------------------------------------------------------|
//! | Compiled defaults        | `features list` with no config file present                          |
//! | Alias normalization      | `features set icon_style Nerd-Fonts`                                 |
//! | Unrecognized fallback    | `features set icon_style sparkles`                                   |
//! | Icon style cycle         | `features toggle icon_style` three times                             |
//! | Nested flag by leaf name | `features toggle warn_85`                                            |
//! | Legacy boolean on disk   | Write `icon_style = false` under `[features]`, then `features list`  |
//! | JSON store               | `--file features-demo.json features set auto_ultrathink off`         |
//! | Debug logging            | `RUST_LOG=featurefig=debug cargo run --example features_demo -- ...` |

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use featurefig::{FeaturesArgs, FeaturesEngine, FileStore, SearchPath};

const APP_NAME: &str = "features-demo";

/// featurefig demo: manage feature flags stored in a local config file.
#[derive(Parser, Debug)]
#[command(name = "features-demo")]
struct Cli {
    /// Config file to use instead of `features-demo.toml` in the working directory.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Ignore keys the schema doesn't know instead of failing.
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect or change feature flags (list, set, toggle).
    Features(FeaturesArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store = match cli.file {
        Some(path) => FileStore::new(path),
        None => FileStore::locate(&SearchPath::Cwd, "features-demo.toml", APP_NAME)
            .unwrap_or_else(|e| {
                eprintln!("Config error:\n{e}");
                std::process::exit(1);
            }),
    }
    .strict(!cli.lenient);

    let engine = FeaturesEngine::new(store);

    match cli.command {
        Commands::Features(args) => {
            let action = args.into_action();
            engine.handle_and_print(&action).unwrap_or_else(|e| {
                eprintln!("Features error:\n{e}");
                std::process::exit(1);
            });
        }
    }
}
