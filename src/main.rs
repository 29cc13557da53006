// Entry point and high-level CLI flow.
//
// - Option [1] loads the project file (scored predictions when available,
//   otherwise the raw CSV) and recomputes the dashboard.
// - Option [2] prints the dashboard tables and exports them.
// - After generating, the user can go back to the menu or exit.
use chrono::Local;
use clap::Parser;
use once_cell::sync::Lazy;
use overrun_dashboard::loader::{self, Source};
use overrun_dashboard::settings::{self, JsonFileSettings, MemorySettings, SettingsStore};
use overrun_dashboard::{output, reports, util, Dashboard, Error, Record, Result};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Parser, Debug)]
#[command(name = "overrun_dashboard")]
#[command(about = "Cost and timeline overrun analytics for project records", long_about = None)]
#[command(version)]
struct Cli {
    /// Project CSV to load
    #[arg(default_value = "projects.csv")]
    csv: PathBuf,

    /// Prediction-service response (`{"rows": [...]}`) to prefer over the CSV
    #[arg(long)]
    predictions: Option<PathBuf>,

    /// Directory for exported reports
    #[arg(long, env = "DASHBOARD_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Preferences file
    #[arg(long, env = "DASHBOARD_SETTINGS", default_value = ".dashboard_settings.json")]
    settings: PathBuf,

    /// Load and generate once, without the menu
    #[arg(long)]
    batch: bool,
}

/// A loaded collection together with the views computed from it. Loading a
/// new file swaps in a fresh `Loaded`; an existing one is never mutated.
struct Loaded {
    records: Vec<Record>,
    dashboard: Dashboard,
}

struct AppState {
    data: Option<Arc<Loaded>>,
}

static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

fn current() -> Option<Arc<Loaded>> {
    let state = APP_STATE.lock().unwrap_or_else(|e| e.into_inner());
    state.data.clone()
}

fn replace(loaded: Loaded) {
    let mut state = APP_STATE.lock().unwrap_or_else(|e| e.into_inner());
    state.data = Some(Arc::new(loaded));
}

/// Next menu choice, or `None` once stdin is closed.
fn read_choice() -> Option<String> {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf).unwrap_or(0) == 0 {
            return false;
        }
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn print_intro() {
    println!("How to use (one-time)");
    println!("  Provide a CSV with columns such as ProjectID, ProjectType, Terrain,");
    println!("  EstimatedCost, EstimatedTimeline (baselines), TotalCost, Timeline.");
    println!("  Predicted_Cost/Predicted_Timeline are used when present, otherwise");
    println!("  the dashboard falls back to TotalCost/Timeline.");
    println!("  Pass --predictions with a scoring-service response to use scored rows.\n");
}

fn show_intro_once(path: &Path) {
    let mut store: Box<dyn SettingsStore> = match JsonFileSettings::open(path) {
        Ok(s) => Box::new(s),
        Err(e) => {
            log::warn!("Using in-memory settings: {}", e);
            Box::new(MemorySettings::default())
        }
    };
    if settings::intro_hidden(&*store) {
        return;
    }
    print_intro();
    if let Err(e) = settings::hide_intro(&mut *store) {
        log::warn!("Could not save settings: {}", e);
    }
}

fn handle_load(cli: &Cli) -> Result<()> {
    let (records, report, source) = loader::load(&cli.csv, cli.predictions.as_deref())?;
    match source {
        Source::Predictions => println!(
            "Processing dataset... ({} scored rows)",
            util::format_int(report.loaded_rows)
        ),
        Source::Csv => println!(
            "Processing dataset... ({} rows read, {} loaded)",
            util::format_int(report.total_rows),
            util::format_int(report.loaded_rows)
        ),
    }
    if report.parse_errors > 0 {
        println!(
            "Note: {} rows skipped due to parse errors.",
            util::format_int(report.parse_errors)
        );
    }
    println!();
    let dashboard = Dashboard::compute(&records);
    replace(Loaded { records, dashboard });
    Ok(())
}

#[derive(Serialize)]
struct Export<'a> {
    generated_at: String,
    dashboard: &'a Dashboard,
}

fn export<T: Serialize>(out_dir: &Path, file: &str, rows: &[T]) {
    let path = out_dir.join(file);
    if let Err(e) = output::write_csv(&path, rows) {
        eprintln!("Write error: {}", e);
    }
}

fn handle_generate(cli: &Cli) -> Result<()> {
    let loaded = current().ok_or(Error::NoData)?;
    let d = &loaded.dashboard;
    let out = cli.out_dir.as_path();

    if d.is_empty() {
        println!("No projects in the loaded file; nothing to chart.\n");
    }

    println!("Generating dashboard...\n");

    let summary = reports::summary_rows(d);
    output::preview_table("Summary", None, &summary, summary.len());

    let by_type = reports::project_type_rows(d);
    export(out, "project_type_summary.csv", &by_type);
    output::preview_table("Average Cost and Overrun by Project Type", None, &by_type, 5);

    let by_terrain = reports::terrain_rows(d);
    export(out, "terrain_summary.csv", &by_terrain);
    output::preview_table("Average Timeline by Terrain", None, &by_terrain, 5);

    let risk = reports::risk_rows(d);
    export(out, "risk_distribution.csv", &risk);
    output::preview_table("Risk Distribution", Some("by Overall_Risk"), &risk, risk.len());

    let top = reports::top_cost_rows(d);
    export(out, "top_cost_projects.csv", &top);
    output::preview_table("Top Cost Projects", None, &top, top.len());

    let details = reports::detail_rows(&loaded.records);
    export(out, "project_details.csv", &details);
    output::preview_table("Project Details", None, &details, 3);

    export(out, "trend_series.csv", &reports::trend_rows(&d.trends));
    export(out, "scatter_series.csv", &reports::scatter_rows(&d.scatter));

    let summary_path = out.join("summary.json");
    let doc = Export {
        generated_at: Local::now().to_rfc3339(),
        dashboard: d,
    };
    if let Err(e) = output::write_json(&summary_path, &doc) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full tables exported to {})\n", out.display());
    Ok(())
}

fn run_batch(cli: &Cli) -> Result<()> {
    handle_load(cli)?;
    handle_generate(cli)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    show_intro_once(&cli.settings);

    if cli.batch {
        if let Err(e) = run_batch(&cli) {
            eprintln!("Failed to process file: {}", e);
            std::process::exit(1);
        }
        return;
    }

    loop {
        println!("Project Overrun Dashboard:");
        println!("[1] Load the file");
        println!("[2] Generate Dashboard\n");
        let Some(choice) = read_choice() else {
            break;
        };
        match choice.as_str() {
            "1" => {
                if let Err(e) = handle_load(&cli) {
                    log::debug!("Load failed: {:?}", e);
                    eprintln!("Failed to load file: {}\n", e);
                }
            }
            "2" => {
                println!();
                match handle_generate(&cli) {
                    Err(Error::NoData) => {
                        println!("Error: No data loaded. Please load the file first (option 1).\n");
                        continue;
                    }
                    Err(e) => eprintln!("Failed to generate dashboard: {}\n", e),
                    Ok(()) => {}
                }
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
