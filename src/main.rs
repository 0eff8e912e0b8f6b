use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    tty::IsTty,
};
use log::{info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use typetest::{
    app::{App, Control},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    duration::{parse_duration, TestDuration},
    logging,
    passage::{Corpus, DEFAULT_CORPUS},
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    session::TypingSession,
};

/// Longest the loop sleeps without a pending timer.
const IDLE_REDRAW_MS: u64 = 250;

/// minimal timed typing test with live wpm, accuracy and mistakes
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// test length in seconds (15, 30, 45 or 60); defaults to the last one used
    #[clap(short = 's', long, value_parser = parse_duration)]
    duration: Option<TestDuration>,

    /// write logs here instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        // logging is best effort; the test runs without it
        if let Err(e) = logging::init(&path) {
            eprintln!("logging disabled, cannot open {}: {e}", path.display());
        }
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    let duration = cli.duration.unwrap_or_else(|| config.duration());

    let corpus = Corpus::bundled(DEFAULT_CORPUS)?;
    info!(
        "starting {}s test with {} passages from `{}`",
        duration,
        corpus.len(),
        corpus.name()
    );
    let mut app = App::new(TypingSession::new(corpus, duration));

    let enhanced_keys = setup_terminal()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, &store, &mut config);

    restore_terminal(enhanced_keys)?;
    terminal.show_cursor()?;

    result
}

/// Raw mode, alternate screen, mouse clicks and bracketed paste. Returns
/// whether keyboard enhancement was pushed (needed for Caps Lock state).
fn setup_terminal() -> io::Result<bool> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    } else {
        info!("terminal does not report keyboard state, Caps Lock will read as off");
    }
    Ok(enhanced_keys)
}

fn restore_terminal(enhanced_keys: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    if enhanced_keys {
        execute!(stdout, PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        stdout,
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &impl ConfigStore,
    config: &mut Config,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(IDLE_REDRAW_MS)),
    );

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        let event = runner.step(app.next_wakeup(Instant::now()));
        if app.handle_event(event, Instant::now()) == Control::Quit {
            break;
        }

        let duration = app.session().duration();
        if config.duration_secs != duration.as_secs() {
            *config = Config::from(duration);
            if let Err(e) = store.save(config) {
                warn!("failed to save config: {e}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["typetest"]);

        assert_eq!(cli.duration, None);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_cli_duration() {
        let cli = Cli::parse_from(["typetest", "-s", "60"]);
        assert_eq!(cli.duration, Some(TestDuration::Sixty));

        let cli = Cli::parse_from(["typetest", "--duration", "15"]);
        assert_eq!(cli.duration, Some(TestDuration::Fifteen));
    }

    #[test]
    fn test_cli_rejects_unsupported_duration() {
        let err = Cli::try_parse_from(["typetest", "-s", "20"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_log_file() {
        let cli = Cli::parse_from(["typetest", "--log-file", "/tmp/t.log"]);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/t.log")));
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_app_draws_on_test_backend() {
        let corpus = Corpus::bundled(DEFAULT_CORPUS).unwrap();
        let app = App::new(TypingSession::new(corpus, TestDuration::Thirty));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        terminal
            .draw(|f| f.render_widget(&app, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let rendered: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(rendered.contains("Timer 30"));
    }
}
