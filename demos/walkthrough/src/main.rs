//! Walkthrough Example
//!
//! Loads a RON process definition and steps through it, printing the
//! fireable elements and the change delta after every firing.
//!
//! ```text
//! cargo run -p walkthrough -- demos/walkthrough/processes/order.ron review flow-approve
//! ```
//!
//! Set `RUST_LOG=stepthrough_core=debug` to see each firing.

use indexmap::IndexMap;
use std::process::ExitCode;
use stepthrough_core::{PlaceTransitionInterpreter, StepController, TransitionId};
use stepthrough_script::Loader;
use tracing::info;
use tracing_subscriber::EnvFilter;

type Controller = StepController<PlaceTransitionInterpreter>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: walkthrough <process.ron> [resource-id ...]");
        return ExitCode::FAILURE;
    };

    let (mut controller, names) = match load(&path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("failed to load {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };
    info!(path = %path, transitions = names.len(), "Process loaded");
    let name = |id: &TransitionId| names.get(id).cloned().unwrap_or_else(|| id.to_string());

    println!("=== Stepthrough Walkthrough ===\n");
    println!("Automation tier: {}", controller.automation_tier());
    print_state(&controller);

    for resource_id in args {
        println!("\n> fire {}", resource_id);
        match controller.fire_object(&resource_id) {
            Ok(report) => {
                let auto: Vec<String> = report.auto_fired().iter().map(name).collect();
                println!(
                    "  fired {} transition(s), {} invisible, auto: [{}]",
                    report.fired.len(),
                    report.invisible_fired,
                    auto.join(", ")
                );
                print_state(&controller);
                controller.clear_changed_objects();
            }
            Err(e) => println!("  {}", e),
        }
    }

    println!("\n=== Execution counts ===");
    for transition in controller.transitions() {
        println!("  {:<16} {}", name(&transition.id), transition.times_executed());
    }

    ExitCode::SUCCESS
}

fn load(path: &str) -> stepthrough_script::Result<(Controller, IndexMap<TransitionId, String>)> {
    let mut loader = Loader::new();
    loader.load_file(path)?;
    let library = loader.finish();
    let name = library.names().next().unwrap_or_default().to_string();
    let Some(def) = library.get(&name) else {
        return Err(stepthrough_script::Error::unknown("process", name));
    };
    let process = def.build()?;
    let names = process.transition_names.clone();
    Ok((process.into_controller()?, names))
}

fn print_state(controller: &Controller) {
    let fireable: Vec<String> = controller
        .fireable_elements()
        .iter()
        .filter_map(|e| e.resource_id.as_ref().map(ToString::to_string))
        .collect();
    println!("  fireable: [{}]", fireable.join(", "));
    println!("  changes:  {}", controller.changed_objects_as_string());
}
