use area_canvas::prelude::*;
use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

/// Generates random canvas files for exercising the connection router
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated canvas JSON to
    #[arg(short, long, default_value = "generated_canvas.json")]
    output: String,

    /// Number of action nodes placed after the trigger
    #[arg(short, long, default_value_t = 12)]
    actions: usize,

    /// Width and height of the square area nodes are scattered over
    #[arg(long, default_value_t = 1600.0)]
    spread: f64,

    /// Grid size nodes are snapped to
    #[arg(long, default_value_t = 20.0)]
    grid: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.spread <= 0.0 {
        eprintln!("Error: --spread must be positive");
        std::process::exit(1);
    }

    println!(
        "Generating canvas with 1 trigger and {} actions over {}x{}...",
        cli.actions, cli.spread, cli.spread
    );

    let catalog = demo_catalog();
    let mut canvas = Canvas::new(cli.grid)?;

    let trigger = catalog.instantiate("timer", "n0", "Schedule", random_point(&mut rng, cli.spread))?;
    canvas.add_node_snapped(trigger)?;

    for i in 1..=cli.actions {
        let module = if rng.random_bool(0.5) { "debug" } else { "mail" };
        let node = catalog.instantiate(
            module,
            format!("n{}", i),
            format!("Step {}", i),
            random_point(&mut rng, cli.spread),
        )?;
        canvas.add_node_snapped(node)?;

        // Each action hangs off a random earlier node, so the graph stays acyclic.
        let parent = rng.random_range(0..i);
        canvas.connect(
            PortRef::new(format!("n{}", parent), Side::Right, 0.0),
            PortRef::new(format!("n{}", i), Side::Left, 0.0),
        )?;
    }

    fs::write(&cli.output, canvas.to_json_pretty()?)?;
    println!(
        "Successfully generated {} nodes and {} edges to '{}'",
        canvas.nodes.len(),
        canvas.edges.len(),
        cli.output
    );
    Ok(())
}

fn random_point(rng: &mut ThreadRng, spread: f64) -> Point {
    Point::new(rng.random_range(0.0..spread), rng.random_range(0.0..spread))
}

fn demo_catalog() -> ModuleCatalog {
    let module = |name: &str, triggers: &[&str], actions: &[&str]| {
        let map = |keys: &[&str]| {
            keys.iter()
                .map(|k| (k.to_string(), serde_json::json!({})))
                .collect::<ValueMap>()
        };
        ModuleDescriptor {
            name: name.to_string(),
            triggers: map(triggers),
            actions: map(actions),
            ..ModuleDescriptor::default()
        }
    };
    ModuleCatalog::new(vec![
        module("timer", &["cron.schedule"], &[]),
        module("debug", &[], &["core.debug_print"]),
        module("mail", &[], &["gmail.send_email"]),
    ])
}
