use anyhow::Result;
use clap::Parser;
use tablepad::app::App;
use tablepad::cli::{print_error, Cli};
use tablepad::styles::init_theme;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = &cli.command {
        if let Err(e) = cli.execute(command) {
            print_error(&format!("{:#}", e));
            std::process::exit(1);
        }
        return Ok(());
    }

    setup_panic_hook();

    // Stdout belongs to the TUI, so logs go to a file
    let log_dir = tablepad::utils::get_log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("tablepad.log");

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::never(&log_dir, "tablepad.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    eprintln!("Logs are being written to: {:?}", log_file);

    let config = cli.load_config()?;
    init_theme(cli.theme_type(&config));

    let mut app = App::new(config)?;
    let result = app.run();

    drop(guard);
    result
}
