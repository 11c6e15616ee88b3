//! Interactive line-based front end for modtrack.
//!
//! # Responsibility
//! - Wire up logging, preferences, and storage at startup.
//! - Forward one raw command line at a time to the core and render the
//!   result message plus the visible record lists.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use log::{info, warn};
use modtrack_core::{
    default_log_level, init_logging, load_prefs, load_records, save_prefs, AppService,
    MessageCatalog, RecordStore, StorageError,
};

fn main() {
    if let Err(message) = run() {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let app_dir = resolve_app_dir()?;
    init_logging(default_log_level(), &app_dir.join("logs"))?;

    let prefs_path = app_dir.join("prefs.json");
    let prefs = load_prefs(&prefs_path);
    let data_path = if prefs.data_file_path.is_absolute() {
        prefs.data_file_path.clone()
    } else {
        app_dir.join(&prefs.data_file_path)
    };

    let store = match load_records(&data_path) {
        Ok(Some(store)) => store,
        Ok(None) => {
            info!(
                "event=records_missing module=cli status=fresh path={}",
                data_path.display()
            );
            RecordStore::new()
        }
        Err(StorageError::Io(err)) => {
            return Err(format!(
                "failed to read data file {}: {err}",
                data_path.display()
            ));
        }
        Err(err) => {
            warn!(
                "event=records_rejected module=cli status=fallback path={} error={err}",
                data_path.display()
            );
            println!(
                "Data file {} could not be loaded ({err}); starting with an empty record book.",
                data_path.display()
            );
            RecordStore::new()
        }
    };

    let mut app = AppService::new(store, MessageCatalog::default(), data_path);
    println!(
        "modtrack {} (type `help` to list commands)",
        modtrack_core::core_version()
    );

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush().map_err(|err| err.to_string())?;

        input.clear();
        let read = stdin
            .lock()
            .read_line(&mut input)
            .map_err(|err| err.to_string())?;
        if read == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        match app.execute(line) {
            Ok(outcome) => {
                println!("{}", outcome.feedback);
                if outcome.show_help {
                    println!("\n{}", app.messages().command_summary());
                }
                if outcome.exit {
                    break;
                }
                render_views(&app);
            }
            Err(error) => println!("{error}"),
        }
    }

    if let Err(err) = save_prefs(&prefs_path, &prefs) {
        warn!(
            "event=prefs_save_failed module=cli status=error path={} error={err}",
            prefs_path.display()
        );
    }
    info!("event=app_exit module=cli status=ok");
    Ok(())
}

fn render_views(app: &AppService) {
    let persons = app.visible_persons();
    if !persons.is_empty() {
        println!("Persons:");
        for (position, person) in persons.iter().enumerate() {
            println!("  {}. {person}", position + 1);
        }
    }

    let modules = app.visible_modules();
    if !modules.is_empty() {
        println!("Modules:");
        for (position, module) in modules.iter().enumerate() {
            println!("  {}. {module}", position + 1);
            for (task_number, task) in module.tasks().iter().enumerate() {
                println!("     {}. {task}", task_number + 1);
            }
            for link in module.links() {
                println!("     {link} {}", link.url());
            }
        }
    }
}

fn resolve_app_dir() -> Result<PathBuf, String> {
    let dir = match std::env::var_os("MODTRACK_HOME") {
        Some(home) => PathBuf::from(home),
        None => std::env::current_dir()
            .map_err(|err| format!("cannot resolve working directory: {err}"))?
            .join("modtrack-data"),
    };
    if dir.is_absolute() {
        Ok(dir)
    } else {
        let cwd = std::env::current_dir()
            .map_err(|err| format!("cannot resolve working directory: {err}"))?;
        Ok(cwd.join(dir))
    }
}
