mod export;
mod help;
mod state;

use crate::catalogue;
use crate::dispatch::{Dispatcher, ProcessSpawner, TerminalResolver};
use crate::model::{Category, DispatchConfig, Lookup, SelectionOutcome};
use crate::orchestrator;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Terminal,
};
use state::{menu, Tab, UiAction, UiState};
use std::{io, time::Duration, time::Instant};

pub async fn run(cfg: DispatchConfig) -> Result<()> {
    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_handle = std::thread::spawn(move || run_threaded(cfg));

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join())
        .await
        .context("join TUI thread")?;
    match join_res {
        Ok(res) => res,
        Err(_) => Err(anyhow::anyhow!("TUI thread panicked")),
    }
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(cfg: DispatchConfig) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let dispatcher = Dispatcher::from_config(&cfg);
    // UiState is owned by the UI thread only; no cross-thread mutation.
    let mut state = UiState::default();
    state.log.append(format!(
        "Welcome to Debian Tools Box v{}.",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(p) = cfg.config_path.as_ref() {
        state.info = format!("Config: {}", p.display());
    }

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    let res = loop {
        if dirty || last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
            dirty = false;
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if !event::poll(Duration::from_millis(50)).unwrap_or(false) {
            continue;
        }
        let Ok(Event::Key(k)) = event::read() else {
            dirty = true;
            continue;
        };
        if k.kind != KeyEventKind::Press {
            continue;
        }
        dirty = true;

        match state.handle_key(k) {
            Some(UiAction::Quit) => break Ok(()),
            Some(UiAction::Dispatch { category, key }) => {
                apply_selection(&mut state, category, &key, &dispatcher);
            }
            Some(UiAction::CopyLastCommand) => match state.last_command {
                Some(cmd) => match export::copy_to_clipboard(cmd) {
                    Ok(()) => state.info = "✓ Copied last command to clipboard".into(),
                    Err(e) => state.info = format!("Clipboard copy failed: {e:#}"),
                },
                None => state.info = "No command has been run yet.".into(),
            },
            Some(UiAction::ExportLog) => match export::export_log(&state.log) {
                Ok(p) => state.info = format!("Saved log: {}", p.display()),
                Err(e) => state.info = format!("Log export failed: {e:#}"),
            },
            None => {}
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

/// Run a selection through the controller and reflect the result in the status line.
fn apply_selection<R, S>(
    state: &mut UiState,
    category: Category,
    key: &str,
    dispatcher: &Dispatcher<R, S>,
) where
    R: TerminalResolver,
    S: ProcessSpawner,
{
    if let Lookup::Found(entry) = catalogue::lookup(category, key) {
        state.last_command = Some(entry.template);
    }
    let outcome = orchestrator::dispatch_selection(category, key, dispatcher, &mut state.log);
    state.info = match outcome {
        SelectionOutcome::Launched => format!("Started {category}/{key} (press 'y' to copy)"),
        SelectionOutcome::Cancelled => "Cancelled".into(),
        SelectionOutcome::Failed => format!("Could not start {category}/{key}, see log"),
    };
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    let tabs = Tabs::new(Tab::ALL.iter().map(|t| Line::from(t.title())).collect::<Vec<_>>())
        .select(state.tab.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Debian Tools Box v{}", env!("CARGO_PKG_VERSION"))),
        )
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        Tab::Tools | Tab::Install => draw_menu_with_log(chunks[1], f, state),
        Tab::Monitor => draw_monitor(chunks[1], f, state),
    }

    draw_status(chunks[2], f, state);

    if let Some(chooser) = state.chooser.as_ref() {
        draw_chooser(centered(area, 60, chooser.options.len() as u16 + 6), f, chooser);
    }
    if state.show_help {
        help::draw_help(centered(area, 64, 23), f);
    }
}

fn draw_menu_with_log(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
        .split(area);

    let title = match state.tab {
        Tab::Install => "Choose a category to install from",
        _ => "Actions",
    };
    draw_menu(cols[0], f, state, title);
    draw_log(cols[1], f, state);
}

fn draw_monitor(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let intro = Paragraph::new(vec![
        Line::from("Live statistics (memory, CPU, disk, GPU) will appear here later."),
        Line::from("For now, open the extended system report below."),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("System monitor"));
    f.render_widget(intro, rows[0]);

    draw_menu(rows[1], f, state, "Report");
    draw_log(rows[2], f, state);
}

fn draw_menu(area: Rect, f: &mut ratatui::Frame, state: &UiState, title: &str) {
    let items: Vec<ListItem> = menu(state.tab)
        .iter()
        .map(|m| ListItem::new(m.label))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.selected_row()));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_log(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let lines = state.log.render();
    // Keep the newest entries visible.
    let visible = area.height.saturating_sub(2) as usize;
    let start = lines.len().saturating_sub(visible);
    let text: Vec<Line> = lines[start..]
        .iter()
        .map(|l| Line::from(l.clone()))
        .collect();
    let p = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Log"));
    f.render_widget(p, area);
}

fn draw_status(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let p = Paragraph::new(Line::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::Gray)),
        Span::raw(state.info.clone()),
        Span::styled("   ? help  q quit", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

fn draw_chooser(area: Rect, f: &mut ratatui::Frame, chooser: &state::Chooser) {
    let info = catalogue::info(chooser.category);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)].as_ref())
        .margin(1)
        .split(area);

    f.render_widget(Clear, area);
    f.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .title(info.heading)
            .border_style(Style::default().fg(Color::Cyan)),
        area,
    );
    f.render_widget(Paragraph::new(info.prompt), rows[0]);

    let items: Vec<ListItem> = chooser
        .options
        .iter()
        .enumerate()
        .map(|(i, (_, label))| ListItem::new(format!("{}. {}", i + 1, label)))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::TOP))
        .highlight_style(Style::default().fg(Color::Yellow))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(chooser.selected));
    f.render_stateful_widget(list, rows[1], &mut list_state);
}

/// A `width` x `height` rectangle centered in `area`, clamped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
