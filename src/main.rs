//! sectile: select or copy a markdown section from its heading.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sectile::actions::SectionAction;
use sectile::app_state::{AppState, EditMode, View};
use sectile::buffer::Document;
use sectile::clipboard::SystemClipboard;
use sectile::settings::SettingsStore;
use sectile::{config, logging, ui};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "sectile")]
#[command(about = "Select or copy a markdown section from its heading", long_about = None)]
struct Args {
    /// Markdown file to open
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Section settings file (overrides the config file)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Start in the reading view
    #[arg(long)]
    reading: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let cfg = config::Config::load();

    if let Some(log_path) = cfg.log_path() {
        logging::init(&log_path)?;
    }

    let settings_path = args
        .settings
        .unwrap_or_else(|| PathBuf::from(&cfg.settings_file));
    let settings = SettingsStore::load(&settings_path);

    let document = Document::open(&args.path)?;

    let mut state = AppState::new(
        document,
        settings,
        Box::new(SystemClipboard::spawn()),
        cfg.notice_ttl(),
    );
    if args.reading {
        state.toggle_surface();
    }

    run_tui(state, &cfg)
}

fn run_tui(mut app: AppState, cfg: &config::Config) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    app.shutdown();

    if let Err(e) = result {
        tracing::error!("terminal loop failed: {e}");
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &config::Config,
) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(cfg.tick_rate())? {
            continue;
        }
        let quit = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
            Event::Mouse(mouse) => {
                handle_mouse(app, mouse);
                false
            }
            _ => false,
        };
        if quit {
            return Ok(());
        }
    }
}

/// Dispatches a key press by view. Returns whether to quit.
fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    match app.current_view {
        View::Editor => match app.mode {
            EditMode::Insert => handle_insert_key(app, key),
            EditMode::Normal => return handle_editor_key(app, key),
        },
        View::Reading => return handle_reading_key(app, key),
        View::Settings => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.move_settings_cursor(false),
            KeyCode::Down | KeyCode::Char('j') => app.move_settings_cursor(true),
            KeyCode::Char(' ') | KeyCode::Enter => app.toggle_setting(),
            KeyCode::Esc | KeyCode::Char('q' | ',') => app.close_overlay(),
            _ => {}
        },
        View::Command => match key.code {
            KeyCode::Char(c) => app.command_buffer.push(c),
            KeyCode::Backspace => {
                app.command_buffer.pop();
            }
            KeyCode::Enter => return app.execute_command(),
            KeyCode::Esc => app.close_overlay(),
            _ => {}
        },
    }
    false
}

fn handle_insert_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.mode = EditMode::Normal,
        KeyCode::Char(c) => app.document.insert_char(c),
        KeyCode::Enter => app.document.insert_newline(),
        KeyCode::Backspace => app.document.backspace(),
        KeyCode::Up => app.document.move_up(1),
        KeyCode::Down => app.document.move_down(1),
        KeyCode::Left => app.document.move_left(),
        KeyCode::Right => app.document.move_right(),
        _ => {}
    }
}

fn handle_editor_key(app: &mut AppState, key: KeyEvent) -> bool {
    let page = usize::from(app.content_area.height).max(1);
    match key.code {
        KeyCode::Char('q') => return app.request_quit(),
        KeyCode::Up | KeyCode::Char('k') => app.document.move_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.document.move_down(1),
        KeyCode::Left | KeyCode::Char('h') => app.document.move_left(),
        KeyCode::Right | KeyCode::Char('l') => app.document.move_right(),
        KeyCode::PageUp => app.document.move_up(page),
        KeyCode::PageDown => app.document.move_down(page),
        KeyCode::Char('i') => app.mode = EditMode::Insert,
        KeyCode::Char('s') => {
            app.act_on_focus(SectionAction::SELECT);
        }
        KeyCode::Char('y') => {
            app.act_on_focus(SectionAction::COPY);
        }
        KeyCode::Esc => app.document.clear_selection(),
        KeyCode::Tab => app.toggle_surface(),
        KeyCode::Char(',') => app.open_settings(),
        KeyCode::Char(':') => app.open_command(),
        _ => {}
    }
    false
}

fn handle_reading_key(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => return app.request_quit(),
        KeyCode::Up | KeyCode::Char('k') => app.reading.scroll_by(-1),
        KeyCode::Down | KeyCode::Char('j') => app.reading.scroll_by(1),
        KeyCode::Char('n') => app.reading.focus_next(),
        KeyCode::Char('p') => app.reading.focus_prev(),
        KeyCode::Char('s') => {
            app.act_on_focus(SectionAction::SELECT);
        }
        KeyCode::Char('y') => {
            app.act_on_focus(SectionAction::COPY);
        }
        KeyCode::Tab => app.toggle_surface(),
        KeyCode::Char(',') => app.open_settings(),
        _ => {}
    }
    false
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.click(mouse.column, mouse.row);
        }
        MouseEventKind::Moved => app.hover(mouse.column, mouse.row),
        MouseEventKind::ScrollUp => scroll(app, -3),
        MouseEventKind::ScrollDown => scroll(app, 3),
        _ => {}
    }
}

fn scroll(app: &mut AppState, delta: isize) {
    match app.current_view {
        View::Editor => {
            let count = app.document.lines().len();
            app.editor.scroll_by(delta, count);
            // Keep the cursor on screen, otherwise the next draw scrolls back to it.
            let view = app.editor.viewport();
            let cursor = app.document.cursor();
            let line = cursor.line.clamp(view.start, view.end.saturating_sub(1).max(view.start));
            if line != cursor.line {
                app.document.move_to(line, cursor.column);
            }
        }
        View::Reading => app.reading.scroll_by(delta),
        View::Settings | View::Command => {}
    }
}
