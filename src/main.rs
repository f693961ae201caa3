use gk_architect::{actions, commands, event, ui};

use anyhow::{Context, Result};
use gk_architect::app::AppState;
use gk_architect::config::{load_config, AppConfig, CliArgs};
use gk_architect::generation::Generations;
use gk_architect::session::Session;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = CliArgs::parse();

    // Load configuration
    let config = load_config(&args)?;

    if args.debug_config {
        println!("Configuration:");
        println!("{:#?}", config);
        return Ok(());
    }

    init_logging(&config)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting gk-architect");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let _guard = runtime.enter();

    let document = commands::initial_document(&config, args.import.as_deref())?;

    // Headless modes
    if let Some(ref dir) = args.export {
        let path = commands::export(&document, dir)?;
        println!("{}", path.display());
        return Ok(());
    }
    if let Some(kind) = args.generate {
        let generator = commands::build_generator(&config);
        let text = runtime.block_on(commands::generate_once(
            &config,
            generator.as_ref(),
            &document,
            kind,
        ))?;
        println!("{}", text);
        return Ok(());
    }

    // Create application state
    let session = Session::new(
        document,
        commands::snapshot_sink(&config),
        config.max_undo_steps,
    );
    let generations = Generations::new(
        commands::build_generator(&config),
        config.target_platform.clone(),
        config.generation_timeout(),
    );
    let export_dir = std::env::current_dir().context("Failed to read working directory")?;
    let mut app = AppState::new(session, generations, export_dir);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear the terminal
    terminal.clear()?;

    // Run the main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors from the main loop
    if let Err(err) = res {
        tracing::error!("Main loop failed: {:#}", err);
        eprintln!("Error: {}", err);
    }

    tracing::info!("Exiting");
    Ok(())
}

fn init_logging(config: &AppConfig) -> Result<()> {
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create {}", config.data_dir.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_file())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> Result<()> {
    while app.running {
        // Draw the UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if let Some(action) = event::handle_events(app)? {
            tracing::trace!(?action, "Executing action");
            actions::execute_action(action, app)?;
        }
    }

    Ok(())
}
