//! Command-line interface for wsdl-builder

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use wsdl_builder::manifest::ServiceManifest;
#[cfg(feature = "cli")]
use wsdl_builder::namespaces::WELL_KNOWN;
#[cfg(feature = "cli")]
use wsdl_builder::options::GeneratorOptions;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "wsdl-builder")]
#[command(author, version, about = "Generate WSDL documents from service manifests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a WSDL 1.1 document from a JSON service manifest
    Generate {
        /// Path to the JSON manifest
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write everything on one line
        #[arg(long)]
        compact: bool,

        /// Spaces per indentation level
        #[arg(long, default_value_t = 4)]
        indent: usize,
    },

    /// List the well-known namespace prefixes
    Namespaces {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            manifest,
            output,
            compact,
            indent,
        } => cmd_generate(manifest, output, compact, indent),
        Commands::Namespaces { json } => cmd_namespaces(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_generate(
    manifest_path: PathBuf,
    output: Option<PathBuf>,
    compact: bool,
    indent: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(&manifest_path)?;
    let manifest = ServiceManifest::from_json(&text)?;
    let wsdl = manifest.to_wsdl()?;

    let options = if compact {
        GeneratorOptions::compact()
    } else {
        GeneratorOptions::pretty(indent)
    };
    let xml = wsdl.generate_with(&options)?;

    if let Some(output_path) = output {
        fs::write(output_path, &xml)?;
    } else {
        println!("{}", xml);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_namespaces(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        use serde_json::{Map, Value};

        let map: Map<String, Value> = WELL_KNOWN
            .iter()
            .map(|(prefix, uri)| (prefix.to_string(), Value::String(uri.to_string())))
            .collect();
        println!("{}", serde_json::to_string_pretty(&Value::Object(map))?);
    } else {
        let width = WELL_KNOWN.iter().map(|(p, _)| p.len()).max().unwrap_or(0);
        for (prefix, uri) in WELL_KNOWN {
            println!("  {:width$}  {}", prefix, uri, width = width);
        }
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
