use wrap_label::config::{load_config, AppConfig, CliArgs};
use wrap_label::measure::CellMeasurer;
use wrap_label::{actions, event, logging, ui, AppState, WrapSelector};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Read};

const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog";

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

    if args.interactive {
        let text = args.label_text().unwrap_or_else(|| SAMPLE_TEXT.to_string());
        return run_interactive(config, text);
    }

    logging::init_log(args.verbose);

    // Label text from the arguments, or stdin when none were given
    let text = match args.label_text() {
        Some(text) => text,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read label text from stdin")?;
            input
        }
    };

    let font = config.font();
    let layout = WrapSelector::new(&CellMeasurer, config.wrap_options())
        .select(&text, config.max_width, &font, config.max_rows)
        .context("Failed to wrap label")?;

    println!("{}", ui::render_plain(&layout, &font));
    Ok(())
}

fn run_interactive(config: AppConfig, text: String) -> Result<()> {
    // Create application state
    let mut app = AppState::new(config, text)?;

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
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> Result<()> {
    // Fit the label to the terminal it starts in
    let size = terminal.size()?;
    actions::execute_action(actions::Action::Resize(size.width), app)?;

    while app.running {
        // Draw the UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if let Some(action) = event::handle_events()? {
            actions::execute_action(action, app)?;
        }
    }

    Ok(())
}
