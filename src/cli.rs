//! CLI: discover inputs → (generate scheme files | inspect parsed interfaces)
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::discover::{self, FilePredicate};
use crate::ir::Source;
use crate::settings::Settings;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate zod scheme files from TypeScript interface declarations
#[derive(Parser, Debug)]
#[command(name = "zodgen", version)]
pub struct CommandLineInterface {
    /// log pipeline steps to stderr (same as RUST_LOG=debug)
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// write `schemes/<name>.scheme.ts` next to every matched input
    Generate(GenerateOut),
    /// parse inputs and print the extracted interfaces as JSON
    Inspect(InspectOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// directory to search for inputs
    #[arg(long = "workingDir", default_value = ".")]
    working_dir: PathBuf,

    /// descend into subdirectories of the working directory
    #[arg(long, default_value_t = false)]
    recursive: bool,

    /// glob selecting inputs by file name or by path relative to the working
    /// directory; repeatable (default: `*.ts`)
    #[arg(long = "files", visible_alias = "file", value_name = "GLOB")]
    files: Vec<String>,

    /// JSON settings file (camelCase keys)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// start every generated file with `import { z } from 'zod';`
    #[arg(long, default_value_t = false)]
    zod_import: bool,

    /// emit plain `../` relative imports instead of the `./../` form
    #[arg(long, default_value_t = false)]
    keep_leading_dot: bool,

    /// print generated files to stdout instead of writing them
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(clap::Parser, Debug)]
struct InspectOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn settings(&self) -> anyhow::Result<Settings> {
        match self.config.as_ref() {
            Some(path) => Ok(Settings::from_file(path)?),
            None => Ok(Settings::default()),
        }
    }

    fn load_sources(&self, settings: &Settings) -> anyhow::Result<Vec<Source>> {
        let predicate = FilePredicate::new(&self.files, settings)?;
        let paths = discover::find_sources(&self.working_dir, self.recursive, &predicate)
            .with_context(|| format!("failed to search {}", self.working_dir.display()))?;
        if paths.is_empty() {
            tracing::warn!(dir = %self.working_dir.display(), "no input files matched");
        }
        Ok(crate::read_sources(&paths)?)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                let mut settings = target.input_settings.settings()?;
                settings.zod_import |= target.zod_import;
                if target.keep_leading_dot {
                    settings.strip_leading_dot = false;
                }

                // 1) discover + read
                let sources = target.input_settings.load_sources(&settings)?;

                // 2) parse → sort → emit → group → render, all in memory
                let rendered = crate::generate(&sources, &settings)?;

                // 3) write (or print)
                if target.dry_run {
                    for (path, text) in &rendered {
                        eprintln!("{} {}", "==>".cyan().bold(), path);
                        print!("{text}");
                    }
                    return Ok(());
                }
                for path in crate::writer::write_outputs(&rendered)? {
                    eprintln!("{} {}", "wrote".green().bold(), path.display());
                }
                tracing::info!(files = rendered.len(), "generation finished");
            }
            Command::Inspect(target) => {
                let settings = target.input_settings.settings()?;
                let sources = target.input_settings.load_sources(&settings)?;
                let parsed = crate::parse(&sources)?;
                let json = serde_json::to_string_pretty(&parsed)?;
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &json)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    println!("{json}");
                }
            }
        }
        Ok(())
    }
}
