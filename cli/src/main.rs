use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use fieldgen_core::{Schema, SchemaView};
use fieldgen_loader::{DefinitionSet, GeneratorConfig};
use tracing::{info, warn};

mod render;

/// Output format for `inspect`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum InspectFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "fieldgen")]
#[command(about = "Generate code from field definition documents")]
struct Cli {
    /// Log assembly details to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a template against the assembled schema.
    Generate(GenerateArgs),
    /// Print the assembled schema as JSON or YAML.
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
struct SchemaArgs {
    /// Definition files and/or directories containing *.yml documents.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Schema version (required unless set in --config).
    #[arg(long)]
    version: Option<String>,
    /// Field path or base field name to exclude (repeatable).
    #[arg(short = 'e', long = "exclude")]
    exclude: Vec<String>,
    /// YAML generator config; command-line options take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Template file used to generate the code.
    #[arg(long)]
    template: Option<PathBuf>,
    /// Target package name (default: ecs).
    #[arg(long)]
    pkg: Option<String>,
    /// Output file (default: stdout).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct InspectArgs {
    #[command(flatten)]
    schema: SchemaArgs,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: InspectFormat,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Inspect(args) => run_inspect(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let overlay = GeneratorConfig {
        package: args.pkg,
        template: args.template,
        output: args.out,
        ..GeneratorConfig::default()
    };
    let config = resolve_config(&args.schema, overlay)?;

    let template_path = config
        .template
        .clone()
        .ok_or_else(|| "no template file configured (use --template)".to_string())?;
    let schema = assemble_schema(&args.schema.inputs, &config)?;

    let template = fs::read_to_string(&template_path).map_err(|err| {
        format!(
            "failed to read template file '{}': {err}",
            template_path.display()
        )
    })?;
    let contents = render::render(&template, config.package_name(), &schema)?;

    match &config.output {
        Some(path) => {
            write_output(path, &contents)?;
            info!(output = %path.display(), bytes = contents.len(), "Wrote generated code");
        }
        None => println!("{contents}"),
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<(), String> {
    let config = resolve_config(&args.schema, GeneratorConfig::default())?;
    let schema = assemble_schema(&args.schema.inputs, &config)?;
    let view = SchemaView::new(&schema);

    let raw = match args.format {
        InspectFormat::Json => serde_json::to_string_pretty(&view)
            .map_err(|e| format!("JSON serialization failed: {e}"))?,
        InspectFormat::Yaml => {
            serde_yaml::to_string(&view).map_err(|e| format!("YAML serialization failed: {e}"))?
        }
    };
    println!("{raw}");
    Ok(())
}

/// Loads `--config` (if any) and overlays the command-line options on it.
fn resolve_config(args: &SchemaArgs, overlay: GeneratorConfig) -> Result<GeneratorConfig, String> {
    let base = match &args.config {
        Some(path) => GeneratorConfig::load(path).map_err(|e| e.to_string())?,
        None => GeneratorConfig::default(),
    };

    let overlay = GeneratorConfig {
        version: args.version.clone(),
        exclude: args.exclude.clone(),
        ..overlay
    };
    Ok(base.merge(overlay))
}

fn assemble_schema(inputs: &[PathBuf], config: &GeneratorConfig) -> Result<Schema, String> {
    let version = config
        .version
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| "--version is required".to_string())?;

    let set = DefinitionSet::load(inputs).map_err(|e| format!("failed to load schema: {e}"))?;
    if set.is_empty() {
        warn!(inputs = inputs.len(), "No field definitions found in inputs");
    }
    let schema = set
        .assemble(version, &config.exclude_set(), &config.type_table())
        .map_err(|e| format!("failed to load schema: {e}"))?;

    info!(
        documents = set.sources().len(),
        namespaces = schema.namespaces().len(),
        values = schema.values().len(),
        "Assembled schema"
    );
    Ok(schema)
}

fn write_output(path: &Path, contents: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .map_err(|err| format!("failed to write file '{}': {err}", path.display()))?;
    file.write_all(contents.as_bytes())
        .map_err(|err| format!("failed to write file '{}': {err}", path.display()))
}
