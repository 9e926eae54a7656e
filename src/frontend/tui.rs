//! TUI reference host (ratatui-based)
//!
//! Embeds one `InputCard`, routes keyboard input to it, ticks message
//! expiry, drains platform receipts into an on-screen log, and re-renders
//! whenever the card raises `needs_render`.
//!
//! Keys: type into the text field, Up/Down to change a selection,
//! Ctrl+S (or Enter in select mode) to send, Ctrl+L to clear, Esc to quit.

use crate::config::DEFAULT_MAX_LENGTH;
use crate::core::InputCard;
use crate::view::{Action, CardView, InputView};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tui_textarea::TextArea;

pub struct TuiHost {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    card: InputCard,
    textarea: TextArea<'static>,

    /// Receipts from the platform task, newest last
    receipts: Vec<String>,
    receipt_rx: UnboundedReceiver<String>,

    running: bool,
    poll_timeout: Duration,
}

impl TuiHost {
    /// Take over the terminal and wrap the given card
    pub fn new(card: InputCard, receipt_rx: UnboundedReceiver<String>) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        let textarea = make_textarea(card.value());

        Ok(Self {
            terminal,
            card,
            textarea,
            receipts: Vec::new(),
            receipt_rx,
            running: true,
            poll_timeout: Duration::from_millis(50),
        })
    }

    /// Main event loop: poll keys, drain receipts, tick expiry, render
    pub fn run(&mut self) -> Result<()> {
        // First frame before any input arrives
        self.card.needs_render = true;

        while self.running {
            if event::poll(self.poll_timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Resize(..) => self.card.needs_render = true,
                    _ => {}
                }
            }

            while let Ok(receipt) = self.receipt_rx.try_recv() {
                self.receipts.push(receipt);
                self.card.needs_render = true;
            }

            self.card.expire_messages(Instant::now());

            if std::mem::take(&mut self.card.needs_render) {
                self.draw()?;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match (key.code, ctrl) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), true) => {
                self.running = false;
                return;
            }
            (KeyCode::Char('s'), true) => {
                self.card.send_value(Instant::now());
                return;
            }
            (KeyCode::Char('l'), true) => {
                self.card.clear_value(Instant::now());
                self.textarea = make_textarea(self.card.value());
                return;
            }
            _ => {}
        }

        let text_mode = self.card.config().map(|c| c.use_text_input).unwrap_or(true);
        if text_mode {
            self.route_text_key(key);
        } else {
            self.route_select_key(key);
        }
    }

    /// Feed a key to the text field, enforcing the configured length cap
    fn route_text_key(&mut self, key: KeyEvent) {
        let max_length = self
            .card
            .config()
            .map(|c| c.max_length)
            .unwrap_or(DEFAULT_MAX_LENGTH);

        let current_len = joined(&self.textarea).chars().count();
        let grows = matches!(key.code, KeyCode::Char(_) | KeyCode::Enter | KeyCode::Tab);
        if grows && current_len >= max_length {
            return;
        }

        if self.textarea.input(key) {
            let value = joined(&self.textarea);
            self.card.handle_value_edited(&value);
        }
    }

    /// Up/Down move the selection, Enter sends it
    fn route_select_key(&mut self, key: KeyEvent) {
        let options = match self.card.config() {
            Some(config) => config.select_options.clone(),
            None => return,
        };
        if options.is_empty() {
            return;
        }

        let current = options
            .iter()
            .position(|option| option == self.card.value())
            .unwrap_or(0);

        match key.code {
            KeyCode::Up => {
                let next = if current == 0 {
                    options.len() - 1
                } else {
                    current - 1
                };
                self.card.handle_value_edited(&options[next]);
            }
            KeyCode::Down => {
                let next = (current + 1) % options.len();
                self.card.handle_value_edited(&options[next]);
            }
            KeyCode::Enter => self.card.send_value(Instant::now()),
            _ => {}
        }
    }

    fn draw(&mut self) -> Result<()> {
        let view = self.card.render();
        let textarea = &self.textarea;
        let receipts = &self.receipts;

        self.terminal.draw(|f| {
            render_view(f, &view, textarea, receipts);
        })?;

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiHost {
    fn drop(&mut self) {
        // Restore the terminal even on an error path
        let _ = self.cleanup();
    }
}

fn make_textarea(value: &str) -> TextArea<'static> {
    let mut textarea = TextArea::new(value.split('\n').map(str::to_string).collect());
    textarea.set_block(Block::default().borders(Borders::ALL).title("Input"));
    textarea.set_placeholder_text("Type a value...");
    textarea.set_cursor_line_style(Style::default());
    textarea
}

fn joined(textarea: &TextArea<'_>) -> String {
    textarea.lines().join("\n")
}

fn render_view(f: &mut Frame, view: &CardView, textarea: &TextArea<'_>, receipts: &[String]) {
    let area = f.area();

    let body = match view {
        CardView::Unconfigured => {
            let surface = Paragraph::new("Invalid configuration.")
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(surface, area);
            return;
        }
        CardView::Card(body) => body,
    };

    let card_block = Block::default()
        .title(body.header.clone())
        .borders(Borders::ALL);
    let inner = card_block.inner(area);
    f.render_widget(card_block, area);

    let chunks = Layout::vertical([
        Constraint::Min(5),    // input control
        Constraint::Length(1), // error region
        Constraint::Length(1), // action hints
        Constraint::Length(1), // service region
        Constraint::Length(6), // platform receipts
    ])
    .split(inner);

    match &body.input {
        InputView::TextArea { .. } => {
            f.render_widget(textarea, chunks[0]);
        }
        InputView::Select { options, selected } => {
            let items: Vec<ListItem> = options
                .iter()
                .map(|option| ListItem::new(option.as_str()))
                .collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title("Options"))
                .highlight_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");

            let mut state = ListState::default();
            state.select(*selected);
            f.render_stateful_widget(list, chunks[0], &mut state);
        }
    }

    if body.error.visible {
        let error = Paragraph::new(body.error.text.clone()).style(Style::default().fg(Color::Red));
        f.render_widget(error, chunks[1]);
    }

    let hints: Vec<String> = body
        .actions
        .iter()
        .map(|action| {
            let shortcut = match action.action {
                Action::Clear => "Ctrl+L",
                Action::Send => "Ctrl+S / Enter",
            };
            format!("{} [{}]", action.tooltip, shortcut)
        })
        .collect();
    let actions =
        Paragraph::new(hints.join("   ")).style(Style::default().add_modifier(Modifier::DIM));
    f.render_widget(actions, chunks[2]);

    if body.service.visible {
        let service =
            Paragraph::new(body.service.text.clone()).style(Style::default().fg(Color::Green));
        f.render_widget(service, chunks[3]);
    }

    let log_lines: Vec<Line> = receipts
        .iter()
        .rev()
        .take(4)
        .rev()
        .map(|receipt| Line::from(receipt.as_str()))
        .collect();
    let log = Paragraph::new(log_lines)
        .block(Block::default().borders(Borders::ALL).title("Host events"));
    f.render_widget(log, chunks[4]);
}
