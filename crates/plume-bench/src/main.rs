use std::path::PathBuf;
use std::process;

use plume_bench::report;
use plume_bench::runner::SceneRunner;
use plume_bench::scenes;
use plume_config::defaults::MATERIALS_RON;
use plume_config::{load_all_materials, load_config_from_str, validate_config, validate_materials, EngineConfig};
use plume_core::material::MaterialTable;
use plume_persist::{DirectoryStore, MemoryStore, PersistenceStore};

struct Args {
    steps: u32,
    config_path: Option<PathBuf>,
    material_paths: Vec<PathBuf>,
    seed: Option<u64>,
    output_path: Option<PathBuf>,
    baseline_path: Option<PathBuf>,
    save_dir: Option<PathBuf>,
    regression_threshold: f64,
    scene: Option<String>,
}

fn print_usage() {
    eprintln!("Usage: plume-runner [OPTIONS]");
    eprintln!("  --ticks <n>                    Simulation steps per scene (default: 200)");
    eprintln!("  --config <path>                Engine config (RON); defaults are used otherwise");
    eprintln!("  --materials <path>             Extra material table (RON), may repeat");
    eprintln!("  --seed <n>                     Override the config seed");
    eprintln!("  --scene <name>                 Run only the named scene");
    eprintln!("  --output <path>                Save results as a JSON baseline");
    eprintln!("  --baseline <path>              Compare against a saved JSON baseline");
    eprintln!("  --regression-threshold <pct>   Regression threshold percentage (default: 10)");
    eprintln!("  --save <dir>                   Persist each scene's sources under <dir>");
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} needs a value"))
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args {
        steps: 200,
        config_path: None,
        material_paths: Vec::new(),
        seed: None,
        output_path: None,
        baseline_path: None,
        save_dir: None,
        regression_threshold: 10.0,
        scene: None,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--ticks" => {
                i += 1;
                let v = value(args, i, flag)?;
                parsed.steps = v.parse().map_err(|_| format!("invalid --ticks value: {v}"))?;
            }
            "--config" => {
                i += 1;
                parsed.config_path = Some(PathBuf::from(value(args, i, flag)?));
            }
            "--materials" => {
                i += 1;
                parsed.material_paths.push(PathBuf::from(value(args, i, flag)?));
            }
            "--seed" => {
                i += 1;
                let v = value(args, i, flag)?;
                parsed.seed = Some(v.parse().map_err(|_| format!("invalid --seed value: {v}"))?);
            }
            "--scene" => {
                i += 1;
                parsed.scene = Some(value(args, i, flag)?.to_string());
            }
            "--output" => {
                i += 1;
                parsed.output_path = Some(PathBuf::from(value(args, i, flag)?));
            }
            "--baseline" => {
                i += 1;
                parsed.baseline_path = Some(PathBuf::from(value(args, i, flag)?));
            }
            "--regression-threshold" => {
                i += 1;
                let v = value(args, i, flag)?;
                parsed.regression_threshold = v
                    .parse()
                    .map_err(|_| format!("invalid --regression-threshold value: {v}"))?;
            }
            "--save" => {
                i += 1;
                parsed.save_dir = Some(PathBuf::from(value(args, i, flag)?));
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(parsed)
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig, String> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
    load_config_from_str(&text).map_err(|e| format!("{}: {e}", path.display()))
}

/// The built-in table followed by any extra tables, in order.
fn load_materials(paths: &[PathBuf]) -> Result<MaterialTable, String> {
    let mut texts = vec![MATERIALS_RON.to_string()];
    for path in paths {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read materials {}: {e}", path.display()))?;
        texts.push(text);
    }
    let sources: Vec<&str> = texts.iter().map(String::as_str).collect();
    let table = load_all_materials(&sources).map_err(|e| e.to_string())?;
    validate_materials(&table).map_err(|errors| {
        errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    })?;
    Ok(table)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let argv: Vec<String> = std::env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(1);
        }
    };

    let materials = match load_materials(&args.material_paths) {
        Ok(table) => table,
        Err(message) => {
            log::error!("material table rejected: {message}");
            process::exit(1);
        }
    };
    let mut config = match load_config(args.config_path.as_ref()) {
        Ok(config) => config,
        Err(message) => {
            log::error!("{message}");
            process::exit(1);
        }
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Err(errors) = validate_config(&config, &materials) {
        for e in &errors {
            log::error!("config: {e}");
        }
        process::exit(1);
    }

    let seed = config.seed;
    let runner = SceneRunner::new(config, materials, args.steps);
    let mut store: Box<dyn PersistenceStore> = match &args.save_dir {
        Some(dir) => {
            log::info!("Persisting scene sources under {}", dir.display());
            Box::new(DirectoryStore::new(dir))
        }
        None => Box::new(MemoryStore::new()),
    };

    let mut results = Vec::new();
    for scene in scenes::standard_scenes() {
        if args.scene.as_deref().is_some_and(|name| name != scene.name) {
            continue;
        }
        match runner.run_scene(&scene, store.as_mut()) {
            Ok(result) => results.push(result),
            Err(e) => {
                log::error!("scene '{}' failed: {e}", scene.name);
                process::exit(1);
            }
        }
    }
    if results.is_empty() {
        eprintln!("No scene matched {:?}", args.scene.unwrap_or_default());
        process::exit(1);
    }

    println!("\n## Smoke Scene Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = args.output_path {
        let baseline = report::Baseline {
            label: format!("plume-runner-{}", process::id()),
            seed,
            results: results.clone(),
        };
        match report::save_baseline(path, &baseline) {
            Ok(()) => log::info!("Saved baseline to {}", path.display()),
            Err(e) => {
                log::error!("failed to save baseline {}: {e}", path.display());
                process::exit(1);
            }
        }
    }

    if let Some(ref path) = args.baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions = report::compare(&results, &baseline, args.regression_threshold);
            println!("{}", report::format_comparison(&regressions, args.regression_threshold));
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Run complete.");
}
