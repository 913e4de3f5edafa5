mod alerts;
mod storage;
mod theme;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tempo_core::{RunState, TickEvent, TimerEngine, TimerMode};

use crate::storage::{Settings, SettingsStore};
use crate::theme::Theme;

const TICK_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Parser)]
#[command(name = "tempo", version, about = "Themed stopwatch and countdown timer")]
struct Args {
    /// Theme for this session (original, red, pink, puce); never persisted
    #[arg(short, long)]
    theme: Option<String>,

    /// Settings file location
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq)]
pub enum Screen {
    Timer,
    Settings,
}

/// One row of the settings form. The list is rebuilt on demand because the
/// stepper rows exist only while their toggle is on.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SettingsRow {
    ThemePick(Theme),
    Font,
    CountdownMode,
    StartTime,
    AutoStart,
    Animations,
    Notifications,
    NotifyLead,
}

pub fn settings_rows(settings: &Settings) -> Vec<SettingsRow> {
    let mut rows: Vec<SettingsRow> = Theme::ALL
        .iter()
        .copied()
        .map(SettingsRow::ThemePick)
        .collect();
    rows.push(SettingsRow::Font);
    rows.push(SettingsRow::CountdownMode);
    if settings.is_countdown_mode {
        rows.push(SettingsRow::StartTime);
    }
    rows.push(SettingsRow::AutoStart);
    rows.push(SettingsRow::Animations);
    rows.push(SettingsRow::Notifications);
    if settings.enable_notifications {
        rows.push(SettingsRow::NotifyLead);
    }
    rows
}

pub struct TempoApp {
    pub store: SettingsStore,
    pub theme: Theme,
    pub engine: TimerEngine,
    pub screen: Screen,
    pub settings_cursor: usize,
    pub anim_ticks: u64,
    pub should_quit: bool,
}

impl TempoApp {
    pub fn new(store: SettingsStore, theme: Theme) -> Self {
        let settings = store.get();
        let engine = TimerEngine::new(timer_mode(settings), settings.countdown_start_time);
        let mut app = Self {
            store,
            theme,
            engine,
            screen: Screen::Timer,
            settings_cursor: 0,
            anim_ticks: 0,
            should_quit: false,
        };
        app.on_timer_screen_appear();
        app
    }

    /// Runs at launch and on every return from the settings screen: a
    /// countdown reloads its start value and auto-start kicks in.
    fn on_timer_screen_appear(&mut self) {
        self.sync_engine();
        let settings = self.store.get();
        if settings.is_countdown_mode {
            self.engine.prime_countdown();
            if settings.auto_start {
                self.engine.start();
            }
        }
    }

    /// Mode and start-value edits reach the engine immediately, so a flip
    /// taken from the settings screen changes direction on the next tick.
    fn sync_engine(&mut self) {
        let settings = self.store.get();
        self.engine.set_mode(timer_mode(settings));
        self.engine.set_countdown_start(settings.countdown_start_time);
    }

    pub fn handle_tick(&mut self) {
        self.anim_ticks = self.anim_ticks.wrapping_add(1);
        if self.engine.tick() == Some(TickEvent::Finished) {
            alerts::fire_countdown_finished(self.store.get());
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.screen {
            Screen::Timer => self.handle_key_timer(key.code),
            Screen::Settings => self.handle_key_settings(key.code),
        }
    }

    fn handle_key_timer(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.engine.state == RunState::Running {
                    self.engine.stop();
                } else {
                    self.engine.start();
                }
            }
            KeyCode::Char('r') => {
                let running = self.engine.state == RunState::Running;
                if theme::reset_visible(self.theme, running, self.engine.elapsed_secs()) {
                    self.engine.reset();
                }
            }
            KeyCode::Char('s') => {
                self.screen = Screen::Settings;
                self.settings_cursor = 0;
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_key_settings(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.settings_cursor > 0 {
                    self.settings_cursor -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.settings_cursor + 1 < settings_rows(self.store.get()).len() {
                    self.settings_cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_settings_row(),
            KeyCode::Left | KeyCode::Char('h') => self.adjust_settings_row(-1),
            KeyCode::Right | KeyCode::Char('l') => self.adjust_settings_row(1),
            KeyCode::Esc | KeyCode::Char('q') => self.leave_settings(),
            _ => {}
        }
    }

    fn current_row(&self) -> Option<SettingsRow> {
        settings_rows(self.store.get())
            .get(self.settings_cursor)
            .copied()
    }

    fn activate_settings_row(&mut self) {
        let Some(row) = self.current_row() else {
            return;
        };
        match row {
            SettingsRow::ThemePick(theme) => {
                // Quick select: apply and return to the timer
                self.theme = theme;
                self.leave_settings();
                return;
            }
            SettingsRow::Font => self.cycle_font(1),
            SettingsRow::CountdownMode => {
                self.store.update(|s| s.is_countdown_mode = !s.is_countdown_mode);
                self.sync_engine();
            }
            SettingsRow::AutoStart => self.store.update(|s| s.auto_start = !s.auto_start),
            SettingsRow::Animations => {
                self.store.update(|s| s.enable_animations = !s.enable_animations)
            }
            SettingsRow::Notifications => {
                self.store
                    .update(|s| s.enable_notifications = !s.enable_notifications)
            }
            SettingsRow::StartTime | SettingsRow::NotifyLead => {}
        }
        self.clamp_settings_cursor();
    }

    fn adjust_settings_row(&mut self, delta: i32) {
        let Some(row) = self.current_row() else {
            return;
        };
        match row {
            SettingsRow::Font => self.cycle_font(delta),
            SettingsRow::StartTime => {
                self.store.update(|s| s.step_countdown_start(delta));
                self.sync_engine();
            }
            SettingsRow::NotifyLead => {
                self.store.update(|s| s.step_notification_time(delta));
            }
            _ => {}
        }
    }

    fn cycle_font(&mut self, delta: i32) {
        let names = theme::FONT_NAMES;
        let idx = names
            .iter()
            .position(|n| *n == self.store.get().selected_font)
            .unwrap_or(0);
        let next = (idx as i32 + delta).rem_euclid(names.len() as i32) as usize;
        self.store.update(|s| s.selected_font = names[next].to_string());
    }

    fn clamp_settings_cursor(&mut self) {
        let len = settings_rows(self.store.get()).len();
        if self.settings_cursor >= len {
            self.settings_cursor = len.saturating_sub(1);
        }
    }

    fn leave_settings(&mut self) {
        self.screen = Screen::Timer;
        self.on_timer_screen_appear();
    }
}

fn timer_mode(settings: &Settings) -> TimerMode {
    if settings.is_countdown_mode {
        TimerMode::Countdown
    } else {
        TimerMode::Stopwatch
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: TempoApp) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        let timeout = TICK_INTERVAL.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
        // Catch up on due ticks; the deadline advances by the fixed interval
        // so cadence does not drift with render time
        while last_tick.elapsed() >= TICK_INTERVAL {
            app.handle_tick();
            last_tick += TICK_INTERVAL;
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let theme = match args.theme.as_deref() {
        Some(name) => Theme::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown theme {:?}, using Original", name);
            Theme::default()
        }),
        None => Theme::default(),
    };
    let store = SettingsStore::open(args.settings.unwrap_or_else(SettingsStore::default_path));
    let app = TempoApp::new(store, theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn test_store(tag: &str) -> SettingsStore {
        let dir = std::env::temp_dir().join(format!("tempo-app-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        SettingsStore::open(dir.join("settings.json"))
    }

    fn press(app: &mut TempoApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn row_index(app: &TempoApp, row: SettingsRow) -> usize {
        settings_rows(app.store.get())
            .iter()
            .position(|r| *r == row)
            .unwrap()
    }

    #[test]
    fn test_launch_seeds_countdown_and_auto_starts() {
        let mut store = test_store("auto-start");
        store.update(|s| {
            s.is_countdown_mode = true;
            s.auto_start = true;
            s.countdown_start_time = 90;
        });
        let app = TempoApp::new(store, Theme::Original);
        assert_eq!(app.engine.state, RunState::Running);
        assert_eq!(app.engine.elapsed_secs(), 90.0);
    }

    #[test]
    fn test_launch_stopwatch_starts_at_zero_stopped() {
        let app = TempoApp::new(test_store("stopwatch-launch"), Theme::Original);
        assert_eq!(app.engine.state, RunState::Stopped);
        assert_eq!(app.engine.elapsed_secs(), 0.0);
    }

    #[test]
    fn test_space_toggles_running() {
        let mut app = TempoApp::new(test_store("toggle"), Theme::Original);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.engine.state, RunState::Running);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.engine.state, RunState::Stopped);
    }

    #[test]
    fn test_reset_key_honors_visibility_rule() {
        let mut app = TempoApp::new(test_store("reset"), Theme::Original);
        press(&mut app, KeyCode::Char(' '));
        for _ in 0..20 {
            app.handle_tick();
        }
        // Hidden while running on a stacked theme, so the key does nothing
        press(&mut app, KeyCode::Char('r'));
        assert!(app.engine.elapsed_secs() > 0.0);

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.engine.elapsed_secs(), 0.0);
    }

    #[test]
    fn test_reset_while_running_is_noop_even_on_red() {
        let mut app = TempoApp::new(test_store("reset-red"), Theme::Red);
        press(&mut app, KeyCode::Char(' '));
        for _ in 0..20 {
            app.handle_tick();
        }
        let before = app.engine.elapsed_secs();
        // Visible on Red, but the engine rejects reset mid-run
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.engine.elapsed_secs(), before);
        assert_eq!(app.engine.state, RunState::Running);
    }

    #[test]
    fn test_stepper_rows_follow_their_toggles() {
        let mut app = TempoApp::new(test_store("rows"), Theme::Original);
        let rows = settings_rows(app.store.get());
        assert!(!rows.contains(&SettingsRow::StartTime));
        assert!(!rows.contains(&SettingsRow::NotifyLead));

        app.store.update(|s| {
            s.is_countdown_mode = true;
            s.enable_notifications = true;
        });
        let rows = settings_rows(app.store.get());
        let mode_at = rows.iter().position(|r| *r == SettingsRow::CountdownMode).unwrap();
        assert_eq!(rows[mode_at + 1], SettingsRow::StartTime);
        assert_eq!(*rows.last().unwrap(), SettingsRow::NotifyLead);
    }

    #[test]
    fn test_quick_theme_select_returns_to_timer() {
        let mut app = TempoApp::new(test_store("quick-theme"), Theme::Original);
        press(&mut app, KeyCode::Char('s'));
        assert!(app.screen == Screen::Settings);

        app.settings_cursor = row_index(&app, SettingsRow::ThemePick(Theme::Puce));
        press(&mut app, KeyCode::Enter);
        assert!(app.screen == Screen::Timer);
        assert_eq!(app.theme, Theme::Puce);
    }

    #[test]
    fn test_return_from_settings_reseeds_running_countdown() {
        let mut store = test_store("reseed");
        store.update(|s| {
            s.is_countdown_mode = true;
            s.countdown_start_time = 60;
        });
        let mut app = TempoApp::new(store, Theme::Original);
        press(&mut app, KeyCode::Char(' '));
        for _ in 0..200 {
            app.handle_tick();
        }
        assert!(app.engine.elapsed_secs() < 60.0);

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.engine.elapsed_secs(), 60.0);
        assert_eq!(app.engine.state, RunState::Running);
    }

    #[test]
    fn test_countdown_toggle_flips_direction_mid_run() {
        let mut app = TempoApp::new(test_store("flip"), Theme::Original);
        press(&mut app, KeyCode::Char(' '));
        for _ in 0..100 {
            app.handle_tick();
        }
        let high = app.engine.elapsed_secs();

        press(&mut app, KeyCode::Char('s'));
        app.settings_cursor = row_index(&app, SettingsRow::CountdownMode);
        press(&mut app, KeyCode::Enter);
        assert!(app.store.get().is_countdown_mode);

        app.handle_tick();
        assert!(app.engine.elapsed_secs() < high);
    }

    #[test]
    fn test_start_time_stepper_syncs_engine() {
        let mut store = test_store("stepper-sync");
        store.update(|s| s.is_countdown_mode = true);
        let mut app = TempoApp::new(store, Theme::Original);

        press(&mut app, KeyCode::Char('s'));
        app.settings_cursor = row_index(&app, SettingsRow::StartTime);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.store.get().countdown_start_time, 65);
        assert_eq!(app.engine.countdown_start_secs(), 65);
    }

    #[test]
    fn test_font_row_cycles_and_wraps() {
        let mut app = TempoApp::new(test_store("font"), Theme::Original);
        press(&mut app, KeyCode::Char('s'));
        app.settings_cursor = row_index(&app, SettingsRow::Font);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.store.get().selected_font, "Rounded");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.store.get().selected_font, "Sans-serif");
    }

    #[test]
    fn test_cursor_clamps_to_row_count() {
        let mut app = TempoApp::new(test_store("clamp"), Theme::Original);
        app.settings_cursor = 99;
        app.clamp_settings_cursor();
        assert!(app.settings_cursor < settings_rows(app.store.get()).len());
    }

    #[test]
    fn test_countdown_finish_stops_engine() {
        let mut store = test_store("finish");
        store.update(|s| {
            s.is_countdown_mode = true;
            s.countdown_start_time = 5;
        });
        let mut app = TempoApp::new(store, Theme::Original);
        press(&mut app, KeyCode::Char(' '));
        for _ in 0..520 {
            app.handle_tick();
        }
        assert_eq!(app.engine.state, RunState::Stopped);
        assert_eq!(app.engine.elapsed_secs(), 0.0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = TempoApp::new(test_store("quit-q"), Theme::Original);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = TempoApp::new(test_store("quit-ctrl-c"), Theme::Original);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
