use area_canvas::client::ApiClient;
use area_canvas::config::StoredSettings;
use area_canvas::prelude::*;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line companion of the AREA canvas editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional editor settings JSON (grid size, snap radius, ...)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a canvas file into a workflow document
    Convert {
        /// Path to the canvas JSON file
        canvas: PathBuf,
        /// Workflow name; the id is derived from it
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a workflow document
    Validate {
        /// Path to the workflow JSON file
        workflow: PathBuf,
    },
    /// Print the routed SVG path of every edge of a canvas
    Route {
        canvas: PathBuf,
    },
    /// Print the viewport that fits every node of a canvas
    Fit {
        canvas: PathBuf,
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 720.0)]
        height: f64,
    },
    /// Convert, validate and submit a canvas to the backend
    Submit {
        canvas: PathBuf,
        #[arg(short, long)]
        name: String,
        /// Backend base URL, overriding stored settings and AREA_API_URL
        #[arg(long)]
        api_url: Option<String>,
        /// Stored client settings file
        #[arg(long, default_value = "area-settings.json")]
        settings: PathBuf,
        /// Bearer token for the backend
        #[arg(long, env = "AREA_API_TOKEN")]
        token: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EditorConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => EditorConfig::default(),
    };

    let outcome = match cli.command {
        Command::Convert {
            canvas,
            name,
            description,
            output,
        } => run_convert(&canvas, &name, description, output.as_deref()),
        Command::Validate { workflow } => run_validate(&workflow),
        Command::Route { canvas } => run_route(&canvas, &config),
        Command::Fit {
            canvas,
            width,
            height,
        } => run_fit(&canvas, ViewportSize::new(width, height), &config),
        Command::Submit {
            canvas,
            name,
            api_url,
            settings,
            token,
        } => run_submit(&canvas, &name, api_url.as_deref(), &settings, token),
    };

    if let Err(e) = outcome {
        exit_with_error(&e.to_string());
    }
}

fn load_canvas(path: &Path) -> Result<Canvas> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read canvas file '{}': {}", path.display(), e))?;
    let canvas = Canvas::from_json(&json)?;
    info!(
        nodes = canvas.nodes.len(),
        edges = canvas.edges.len(),
        "loaded canvas from '{}'",
        path.display()
    );
    Ok(canvas)
}

fn print_report(report: &ValidationReport) {
    for warning in &report.warnings {
        println!("  warning: {}", warning);
    }
    for error in &report.errors {
        println!("  error: {}", error);
    }
}

fn run_convert(
    canvas_path: &Path,
    name: &str,
    description: Option<String>,
    output: Option<&Path>,
) -> Result<()> {
    let canvas = load_canvas(canvas_path)?;
    let mut converter = WorkflowConverter::new(name);
    if let Some(description) = description {
        converter = converter.with_description(description);
    }
    let doc = converter.convert(&canvas);
    let report = validate_workflow(&doc);
    print_report(&report);

    let json = doc.to_json_pretty()?;
    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!("Wrote workflow '{}' to '{}'", doc.id, path.display());
        }
        None => println!("{}", json),
    }

    if !report.valid {
        return Err("workflow is not valid".into());
    }
    Ok(())
}

fn run_validate(path: &Path) -> Result<()> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read workflow file '{}': {}", path.display(), e))?;
    let doc = WorkflowDocument::from_json(&json)?;
    let report = validate_workflow(&doc);
    print_report(&report);
    if !report.valid {
        return Err(format!("'{}' failed validation", path.display()).into());
    }
    match doc.execution_order() {
        Ok(order) => println!("Valid. Execution order: {}", order.join(" -> ")),
        Err(e) => println!("Valid, but {}", e),
    }
    Ok(())
}

fn run_route(canvas_path: &Path, config: &EditorConfig) -> Result<()> {
    let canvas = load_canvas(canvas_path)?;
    for (id, path) in canvas.route_all(config)? {
        let kind = match path {
            ConnectionPath::Straight { .. } => "straight",
            ConnectionPath::Bezier { .. } => "bezier",
            ConnectionPath::Orthogonal { .. } => "orthogonal",
        };
        println!("{} [{}]: {}", id, kind, path.to_svg_path());
    }
    Ok(())
}

fn run_fit(canvas_path: &Path, size: ViewportSize, config: &EditorConfig) -> Result<()> {
    let canvas = load_canvas(canvas_path)?;
    let Some(bounds) = canvas.bounds() else {
        println!("Canvas has no nodes, nothing to fit.");
        return Ok(());
    };
    let target = Viewport::fit_bounds(bounds, size, config.recenter_padding);
    println!(
        "offset: {}  scale: {:.3}  (bounds {}x{} at {})",
        target.offset,
        target.scale,
        bounds.width,
        bounds.height,
        Point::new(bounds.x, bounds.y)
    );
    Ok(())
}

fn run_submit(
    canvas_path: &Path,
    name: &str,
    api_url: Option<&str>,
    settings_path: &Path,
    token: Option<String>,
) -> Result<()> {
    let canvas = load_canvas(canvas_path)?;
    let doc = convert_canvas_to_workflow(&canvas, name);

    let stored = StoredSettings::load(settings_path)?;
    let client_config = ClientConfig::resolve(api_url, &stored)?;
    info!(url = %client_config.api_base_url, "submitting workflow");

    let mut client = ApiClient::new(client_config);
    if let Some(token) = token {
        client = client.with_token(token);
    }
    match client.save_workflow(&doc) {
        Ok(response) => {
            println!("Saved workflow '{}': {}", doc.id, response);
            Ok(())
        }
        Err(e) => {
            error!("submission failed");
            Err(e.into())
        }
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
