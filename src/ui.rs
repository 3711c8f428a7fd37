use crate::app::{update, AppMsg, Effect};
use crate::model::AppConfig;
use crate::services::store::{ClientStore, CommandClientStore};
use crate::widgets::client_list::draw_client_list;
use crate::widgets::form::{draw_client_dialog, ClientForm, DialogView};
use crate::widgets::form_widget::dialog_key_msg;
use crate::widgets::status_bar::draw_status;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const CONFIG_FILE: &str = "client-form.yaml";

fn run_effects(state: &mut AppState, effects: Vec<Effect>) {
    for eff in effects {
        match eff {
            Effect::CreateClient(record) => {
                state.store.create_client(record);
            }
            Effect::Close => {
                state.open = false;
                state.dbg("dialog closed");
            }
        }
    }
}

pub(crate) struct AppState {
    pub(crate) config: AppConfig,
    // Owned by the page, not the dialog; the dialog only asks to close
    pub(crate) open: bool,
    pub(crate) form: ClientForm,
    pub(crate) store: Box<dyn ClientStore>,
    pub(crate) tick: u64,
    pub(crate) debug_log: VecDeque<String>,
    pub(crate) show_debug: bool,
}

impl AppState {
    pub(crate) fn new(config: AppConfig, store: Box<dyn ClientStore>) -> Self {
        Self {
            config,
            open: false,
            form: ClientForm::default(),
            store,
            tick: 0,
            debug_log: VecDeque::new(),
            show_debug: false,
        }
    }

    pub fn dbg(&mut self, msg: impl Into<String>) {
        const MAX_LOG_LINES: usize = 200;
        if self.debug_log.len() >= MAX_LOG_LINES {
            self.debug_log.pop_front();
        }
        self.debug_log.push_back(msg.into());
    }
}

fn dispatch(state: &mut AppState, msg: AppMsg) {
    let effects = update(state, msg);
    run_effects(state, effects);
}

// Drain store completions into the update loop
fn pump_store(state: &mut AppState) {
    for ev in state.store.poll() {
        dispatch(
            state,
            AppMsg::CreateFinished {
                record: ev.record,
                outcome: ev.outcome,
            },
        );
    }
}

/// Returns true when the app should quit.
fn handle_key(state: &mut AppState, key: KeyEvent) -> bool {
    if state.open {
        if let Some(msg) = dialog_key_msg(&state.form, key.code, key.modifiers) {
            dispatch(state, msg);
        }
        return false;
    }
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('n') => dispatch(state, AppMsg::Open),
        KeyCode::Char('d') => state.show_debug = !state.show_debug,
        _ => {}
    }
    false
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

pub fn run() -> Result<()> {
    let (cfg, cfg_path) = load_config()?;
    let store = CommandClientStore::new(cfg.create_cmd.clone());
    let mut state = AppState::new(cfg, Box::new(store));
    match &cfg_path {
        Some(p) => state.dbg(format!("config: {p:?}")),
        None => state.dbg(format!("config: no {CONFIG_FILE} found, using defaults")),
    }
    if state.config.create_cmd.is_none() {
        state.dbg("store: no create_cmd, keeping clients in memory");
    }
    if state.config.open_on_start {
        dispatch(&mut state, AppMsg::Open);
    }
    let tick_rate = Duration::from_millis(state.config.tick_ms.max(1));
    // Headless smoke mode
    if env_flag("CLIENT_FORM_HEADLESS") {
        let ticks: u64 = std::env::var("CLIENT_FORM_TICKS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend)?;
        for _ in 0..ticks {
            terminal.draw(|f| ui(f, &mut state))?;
            pump_store(&mut state);
            state.tick = state.tick.wrapping_add(1);
        }
        let summary = serde_json::json!({
            "ok": true,
            "open": state.open,
            "busy": state.store.is_busy(),
            "clients": state.store.clients().len(),
        });
        println!("{summary}");
        return Ok(());
    }
    // Setup terminal (interactive)
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut last_tick = Instant::now();
    let res = loop {
        if let Err(e) = terminal.draw(|f| ui(f, &mut state)) {
            break Err(e.into());
        }
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if handle_key(&mut state, key) {
                        break Ok(());
                    }
                }
                Ok(_) => {}
                Err(e) => break Err(e.into()),
            },
            Ok(false) => {}
            Err(e) => break Err(e.into()),
        }
        pump_store(&mut state);
        if last_tick.elapsed() >= tick_rate {
            state.tick = state.tick.wrapping_add(1);
            last_tick = Instant::now();
        }
    };
    // Restore
    disable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn config_candidates() -> Vec<PathBuf> {
    if let Ok(base) = std::env::var("CLIENT_FORM_CONFIG_DIR") {
        return vec![PathBuf::from(base).join(CONFIG_FILE)];
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    vec![cwd.join(CONFIG_FILE), cwd.join(".tui").join(CONFIG_FILE)]
}

fn load_config() -> Result<(AppConfig, Option<PathBuf>)> {
    for p in config_candidates() {
        if p.exists() {
            let s = fs::read_to_string(&p).with_context(|| format!("reading config: {p:?}"))?;
            let cfg: AppConfig =
                serde_yaml::from_str(&s).with_context(|| format!("parsing config: {p:?}"))?;
            return Ok((cfg, Some(p)));
        }
    }
    Ok((AppConfig::default(), None))
}

fn ui(f: &mut Frame, state: &mut AppState) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);
    let header = Paragraph::new(Line::from(Span::styled(
        " Users",
        crate::theme::text_title(),
    )));
    f.render_widget(header, chunks[0]);
    if state.show_debug {
        draw_debug(f, chunks[1], state);
    } else {
        draw_client_list(f, chunks[1], state.store.clients(), !state.open);
    }
    draw_status(f, chunks[2], state);
    if state.open {
        let view = DialogView {
            title: &state.config.title,
            heading: &state.config.details_heading,
            busy: state.store.is_busy(),
            cursor_on: state.tick % 2 == 0,
        };
        draw_client_dialog(f, size, &state.form, &view);
    }
}

fn draw_debug(f: &mut Frame, area: Rect, state: &AppState) {
    let inner_h = area.height.saturating_sub(2) as usize;
    let skip = state.debug_log.len().saturating_sub(inner_h);
    let lines: Vec<Line> = state
        .debug_log
        .iter()
        .skip(skip)
        .map(|l| Line::from(l.as_str()))
        .collect();
    let block = crate::widgets::chrome::panel_block("Debug log (d to hide)", false);
    f.render_widget(Paragraph::new(lines).block(block), area);
}
