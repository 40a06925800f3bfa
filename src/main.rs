//! shortcut-engine - interactive driver for the shortcut engine
//!
//! Reads one command per line from stdin:
//!
//! ```text
//! ctrl+s                   dispatch a key-down for that combination
//! :context editor          switch the current context
//! :record                  capture the next combination typed
//! :cancel                  release Escape (cancels a recording)
//! :customize save ctrl+shift+s
//! :reset save | :enable save | :disable save
//! :scheme vim              load a stored scheme
//! :export default          print a scheme merged with customizations
//! :stats                   print usage and conflict statistics
//! :quit
//! ```

use std::cell::RefCell;
use std::io::BufRead;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context as _;
use clap::Parser;
use tracing::info;

use shortcut_engine::config::{default_config_path, load_config, save_config};
use shortcut_engine::logging;
use shortcut_engine::shortcuts::{
    Category, DispatchOutcome, KeyCombination, KeyEvent, Modifier, Shortcut, ShortcutAction,
    ShortcutEngine, ShortcutEvent,
};

#[derive(Parser, Debug)]
#[command(name = "shortcut-engine", about = "Drive the keyboard shortcut engine from stdin")]
struct Args {
    /// Config file to load on start and save on exit
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scheme JSON files to import (the last one is loaded)
    #[arg(long = "scheme")]
    schemes: Vec<PathBuf>,

    /// Initial context
    #[arg(long, default_value = "main")]
    context: String,

    /// Don't write the config back on exit
    #[arg(long)]
    no_save: bool,
}

fn demo_shortcuts() -> Vec<Shortcut> {
    let announce = |name: &'static str| ShortcutAction::infallible(move || println!("-> {}", name));

    vec![
        Shortcut::new("file.save", "Save", KeyCombination::new("s", [Modifier::Ctrl]))
            .with_context("editor")
            .with_category("file")
            .with_tags(["write", "disk"])
            .with_action(announce("save")),
        Shortcut::new("search.open", "Search", KeyCombination::new("f", [Modifier::Ctrl]))
            .with_context("global")
            .with_category("navigation")
            .with_action(announce("search")),
        Shortcut::new("modal.close", "Close dialog", KeyCombination::new("escape", []))
            .with_context("modal")
            .with_category("navigation")
            .with_action(announce("close")),
        Shortcut::new(
            "app.toggle",
            "Toggle window",
            KeyCombination::new("space", [Modifier::Cmd, Modifier::Shift]),
        )
        .global()
        .with_category("app")
        .with_action(announce("toggle")),
    ]
}

fn handle_command(engine: &mut ShortcutEngine, line: &str, recorded: &Rc<RefCell<Option<String>>>) -> anyhow::Result<bool> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(true);
    };

    match head {
        ":quit" | ":q" => return Ok(false),
        ":context" => {
            let name = parts.next().context("usage: :context <name>")?;
            engine.set_context(name);
        }
        ":record" => {
            let slot = recorded.clone();
            engine.start_recording(move |result| {
                *slot.borrow_mut() = Some(match result {
                    Some(combination) => format!("recorded {} ({})", combination.label(), combination.binding_key()),
                    None => "recording cancelled".to_string(),
                });
            });
            println!("press a combination...");
        }
        ":cancel" => {
            engine.dispatch(&KeyEvent::up("Escape"));
        }
        ":customize" => {
            let id = parts.next().context("usage: :customize <id> <combination>")?;
            let combination = KeyCombination::parse(parts.next().context("missing combination")?)?;
            engine.customize(id, combination)?;
        }
        ":reset" => engine.reset(parts.next().context("usage: :reset <id>")?)?,
        ":enable" => engine.enable(parts.next().context("usage: :enable <id>")?)?,
        ":disable" => engine.disable(parts.next().context("usage: :disable <id>")?)?,
        ":scheme" => engine.load_scheme(parts.next().context("usage: :scheme <id>")?)?,
        ":export" => println!("{}", engine.export_scheme(parts.next().unwrap_or("default"))?),
        ":stats" => println!("{}", serde_json::to_string_pretty(&engine.stats())?),
        _ => {
            let combination = KeyCombination::parse(line)?;
            let outcome = engine.dispatch(&KeyEvent::from_combination(&combination));
            let summary = match &outcome {
                DispatchOutcome::Triggered { shortcut_id } => format!("triggered {}", shortcut_id),
                DispatchOutcome::Recorded(step) => format!("recorder: {:?}", step),
                DispatchOutcome::Unmatched => "no match".to_string(),
                DispatchOutcome::Ignored => "ignored".to_string(),
            };
            logging::log_key_event(combination.key(), &combination.binding_key(), &summary);
            println!("{}", summary);
        }
    }

    if let Some(message) = recorded.borrow_mut().take() {
        println!("{}", message);
    }
    Ok(true)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = logging::init();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let mut engine = ShortcutEngine::new(load_config(&config_path));
    let events = engine.subscribe();

    for path in &args.schemes {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("reading scheme {}", path.display()))?;
        let id = engine.import_scheme(&input)?;
        engine.load_scheme(&id)?;
    }

    engine.add_category(Category::new("file", "File").with_order(0));
    engine.add_category(Category::new("navigation", "Navigation").with_order(1));
    engine.add_category(Category::new("app", "Application").with_order(2));
    for shortcut in demo_shortcuts() {
        if let Err(e) = engine.register(shortcut) {
            eprintln!("{}", e.user_message());
        }
    }
    engine.set_context(args.context.as_str());

    info!(
        event_type = "app_lifecycle",
        shortcuts = engine.shortcuts().len(),
        context = %engine.context(),
        "Ready for input"
    );

    let recorded = Rc::new(RefCell::new(None));
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match handle_command(&mut engine, line, &recorded) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("error: {:#}", e),
        }
        engine.run_pending_actions();

        while let Ok(event) = events.try_recv() {
            match event {
                ShortcutEvent::BindGlobal { label, .. } => println!("[os] would hook {}", label),
                ShortcutEvent::UnbindGlobal { label, .. } => println!("[os] would release {}", label),
                ShortcutEvent::ConflictDetected { conflicts, .. } => {
                    for conflict in conflicts {
                        println!("[conflict] {:?} with {}", conflict.severity, conflict.existing_id);
                    }
                }
                other => tracing::trace!(event = other.name(), "Event observed"),
            }
        }
    }

    if !args.no_save {
        save_config(&config_path, engine.config())?;
    }
    engine.destroy();
    Ok(())
}
