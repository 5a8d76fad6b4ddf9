mod app;
mod config;
mod error;
mod queue;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen};
use queue::{DeckStore, Mode, QueueManager};
use ui::components::card_panel::{CardPanel, CardView};
use ui::components::stats_line::StatsLine;

#[derive(Parser)]
#[command(
    name = "cardr",
    version,
    about = "Terminal flashcard trainer with a streak-based review queue"
)]
struct Cli {
    #[arg(short, long, help = "Deck directory holding the three question files")]
    deck: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Present cards in file order instead of shuffling")]
    ordered: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new();

    if let Some(deck) = cli.deck {
        app.config.deck_dir = deck.to_string_lossy().to_string();
        let mut manager = QueueManager::new(DeckStore::new(deck));
        manager.set_shuffle(app.config.shuffle);
        app.manager = manager;
    }
    if cli.ordered {
        app.config.shuffle = false;
        app.manager.set_shuffle(false);
    }
    if let Some(theme_name) = cli.theme {
        if let Some(theme) = ui::theme::Theme::load(&theme_name) {
            let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
            app.theme = theme;
            app.menu.theme = theme;
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let _ = app.config.save();

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match event::read()? {
            Event::Key(key) => handle_key(app, key),
            Event::Resize(_, _) => {}
            _ => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Study => handle_study_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.start_session(Mode::Old),
        KeyCode::Char('2') => app.start_session(Mode::New),
        KeyCode::Char('3') => app.start_session(Mode::All),
        KeyCode::Char('r') => app.toggle_shuffle(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => app.start_selected(),
        _ => {}
    }
}

fn handle_study_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Char('y') | KeyCode::Enter => app.answer_good(),
        KeyCode::Char('n') => app.answer_bad(),
        KeyCode::Char('s') => app.skip_card(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Study => render_study(frame, app),
    }
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let shuffle_state = if app.config.shuffle { "on" } else { "off" };
    let header_info = format!(" deck: {} | shuffle: {}", app.config.deck_dir, shuffle_state);
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " cardr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let menu_area = ui::layout::centered_rect(60, 70, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    let footer_text = match &app.status {
        Some(status) => format!(" {status}"),
        None => " [1-3] Start  [r] Toggle shuffle  [q] Quit ".to_string(),
    };
    let footer_style = if app.status.is_some() {
        Style::default().fg(colors.bad())
    } else {
        Style::default().fg(colors.muted())
    };
    let footer = Paragraph::new(Line::from(Span::styled(footer_text, footer_style)));
    frame.render_widget(footer, layout[2]);
}

fn render_study(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let mode_name = match app.manager.mode() {
        Some(Mode::Old) => "Review learned",
        Some(Mode::New) => "Learn new",
        Some(Mode::All) => "Study all",
        None => "",
    };
    let header = Paragraph::new(Line::from(Span::styled(
        format!(" {mode_name} "),
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout[0]);

    let view = match app.manager.current_card() {
        Some(text) => CardView::Question {
            text,
            retry: app.retry_hint,
        },
        None => CardView::Complete,
    };
    frame.render_widget(CardPanel::new(view, app.theme), layout[1]);

    let stats = StatsLine::new(
        app.manager.learned_count(),
        app.manager.in_process_count(),
        app.manager.unlearned_count(),
        app.theme,
    );
    frame.render_widget(stats, layout[2]);

    let footer_text = match &app.status {
        Some(status) => format!(" {status}"),
        None if app.manager.current_card().is_none() => " [ESC] Back to menu ".to_string(),
        None => " [y/Enter] Got it  [n] Missed  [s] Put off  [ESC] Menu ".to_string(),
    };
    let footer_style = if app.status.is_some() {
        Style::default().fg(colors.bad())
    } else {
        Style::default().fg(colors.muted())
    };
    let footer = Paragraph::new(Line::from(Span::styled(footer_text, footer_style)));
    frame.render_widget(footer, layout[3]);
}
