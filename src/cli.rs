//! Minimal CLI: infer → (rust | csharp | kotlin | schema)
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::emit::Target;
use crate::error::{parse_document, Error};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a typed schema from one JSON document and emit data model source code
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit serde-ready Rust structs
    Rust(EmitSettings),
    /// emit System.Text.Json-ready C# classes
    Csharp(EmitSettings),
    /// emit Gson-ready Kotlin data classes
    Kotlin(EmitSettings),
    /// print the inferred type graph as JSON (debug view)
    Schema(SchemaSettings),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON document to read, or '-' for stdin
    #[arg(long, short, default_value = "-")]
    input: String,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct EmitSettings {
    #[command(flatten)]
    input_settings: InputSettings,

    /// top-level type name
    #[arg(long, default_value = "Root")]
    root_name: String,
}

#[derive(Args, Debug, Clone)]
struct SchemaSettings {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> anyhow::Result<serde_json::Value> {
        let source = if self.input == "-" {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| Error::ReadInput { path: PathBuf::from("<stdin>"), source })?;
            buffer
        } else {
            let path = PathBuf::from(&self.input);
            std::fs::read_to_string(&path)
                .map_err(|source| Error::ReadInput { path, source })?
        };
        Ok(parse_document(&source)?)
    }

    fn write(&self, text: &str) -> anyhow::Result<()> {
        match &self.out {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|source| Error::WriteOutput {
                        path: path.clone(),
                        source,
                    })?;
                }
                std::fs::write(path, text).map_err(|source| Error::WriteOutput {
                    path: path.clone(),
                    source,
                })?;
            }
            None => print!("{text}"),
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Rust(settings) => emit(settings, Target::Rust),
            Command::Csharp(settings) => emit(settings, Target::CSharp),
            Command::Kotlin(settings) => emit(settings, Target::Kotlin),
            Command::Schema(settings) => {
                let value = settings.input_settings.load()?;
                let graph = crate::infer::infer(&value);
                let mut text = serde_json::to_string_pretty(&graph)
                    .context("serializing the inferred type graph")?;
                text.push('\n');
                settings.input_settings.write(&text)
            }
        }
    }
}

fn emit(settings: &EmitSettings, target: Target) -> anyhow::Result<()> {
    let value = settings.input_settings.load()?;
    let text = crate::generate(&value, target, &settings.root_name);
    settings.input_settings.write(&text)
}
