use crate::config::Config;
use crate::error::QueueError;
use crate::queue::{DeckStore, Mode, QueueManager};
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Study,
}

/// Composition root state. Owns the one `QueueManager` instance; every
/// mutation of queue state goes through the methods below so key handlers
/// stay thin.
pub struct App {
    pub screen: AppScreen,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub manager: QueueManager,
    pub should_quit: bool,
    /// Show the "try again" hint above the card after a wrong answer.
    pub retry_hint: bool,
    /// Last session-level error, rendered in the footer until the next
    /// action. An I/O error here means queue and deck files may disagree;
    /// starting a new session is the only recovery.
    pub status: Option<String>,
}

impl App {
    pub fn new() -> Self {
        let config = Config::load().unwrap_or_default();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let store = DeckStore::new(config.deck_dir.clone());
        let mut manager = QueueManager::new(store);
        manager.set_shuffle(config.shuffle);

        Self::with_parts(config, manager, theme)
    }

    pub fn with_parts(config: Config, manager: QueueManager, theme: &'static Theme) -> Self {
        Self {
            screen: AppScreen::Menu,
            menu: Menu::new(theme),
            theme,
            config,
            manager,
            should_quit: false,
            retry_hint: false,
            status: None,
        }
    }

    pub fn start_session(&mut self, mode: Mode) {
        let result = match mode {
            Mode::Old => self.manager.repeat_old(),
            Mode::New => self.manager.learn_new(),
            Mode::All => self.manager.repeat_all(),
        };
        match result {
            Ok(()) => {
                self.screen = AppScreen::Study;
                self.retry_hint = false;
                self.status = None;
            }
            Err(err) => self.report(err),
        }
    }

    pub fn start_selected(&mut self) {
        let mode = match self.menu.selected {
            0 => Mode::Old,
            1 => Mode::New,
            _ => Mode::All,
        };
        self.start_session(mode);
    }

    /// User answered the current card correctly.
    pub fn answer_good(&mut self) {
        if self.manager.current_card().is_none() {
            return;
        }
        self.retry_hint = false;
        if let Err(err) = self.manager.accept_current() {
            self.report(err);
        }
    }

    /// User could not answer the current card.
    pub fn answer_bad(&mut self) {
        if self.manager.current_card().is_none() {
            return;
        }
        self.retry_hint = true;
        if let Err(err) = self.manager.fail_current() {
            self.report(err);
        }
    }

    pub fn skip_card(&mut self) {
        if self.manager.current_card().is_none() {
            return;
        }
        self.retry_hint = false;
        if let Err(err) = self.manager.skip_current() {
            self.report(err);
        }
    }

    pub fn toggle_shuffle(&mut self) {
        self.config.shuffle = !self.config.shuffle;
        self.manager.set_shuffle(self.config.shuffle);
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
        self.retry_hint = false;
        self.status = None;
    }

    fn report(&mut self, err: QueueError) {
        self.status = Some(err.to_string());
    }
}
