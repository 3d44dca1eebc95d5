//! Timetable TUI - school timetable lookup in the terminal
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

mod app;
mod clock;
mod config;
mod constants;
mod messages;
mod models;
mod network;
mod view;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use app::{AppActor, AppState};
use clock::SystemClock;
use config::Config;
use messages::ui_events::{key_to_ui_event, InputMode, Panel};
use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use network::NetworkActor;
use view::{timetable_view, TimetableViewState, NO_DATA_MESSAGE};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "timetable-tui.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::from_env();
    tracing::info!(base_url = %config.api_base_url, "Starting up");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(&config, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(&SystemClock), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Results or form + timetable
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_search_bar(f, state, main_chunks[0]);

    if state.selected_school.is_some() {
        draw_form_and_timetable(f, state, main_chunks[1]);
    } else {
        draw_results(f, state, main_chunks[1]);
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn input_border_style(state: &RenderState, panel: Panel) -> Style {
    let is_focused = state.active_panel == panel;
    if is_focused && state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn set_input_cursor(f: &mut Frame, state: &RenderState, panel: Panel, area: Rect) {
    if state.active_panel == panel && state.input_mode == InputMode::Editing {
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + state.cursor_position as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_search_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let loading = if state.is_loading { " [...]" } else { "" };
    let title = if state.selected_school.is_some() {
        format!(" School (x:deselect){} ", loading)
    } else {
        format!(" School search (s:search){} ", loading)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(input_border_style(state, Panel::Query))
        .title(title);

    let input = Paragraph::new(state.query.as_str()).block(block);
    f.render_widget(input, area);

    set_input_cursor(f, state, Panel::Query, area);
}

fn draw_results(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    if state.search_results.is_empty() {
        let hint = Paragraph::new("Type a school name above and press 's' to search.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(" Results "),
            );
        f.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = state
        .search_results
        .iter()
        .map(|school| {
            let name = Span::styled(school.name.clone(), Style::default().bold());
            let detail = Span::styled(
                format!("  {} ({})", school.road_address, school.school_kind),
                Style::default().fg(Color::DarkGray),
            );
            ListItem::new(Line::from(vec![name, detail]))
        })
        .collect();

    let highlight_style = if is_focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(
                    " Results: {} (↑/↓ Enter:select) ",
                    state.search_results.len()
                )),
        )
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_result));

    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_form_and_timetable(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Grade / class / date inputs
            Constraint::Min(3),    // Timetable
        ])
        .split(area);

    draw_form_inputs(f, state, chunks[0]);
    draw_timetable(f, state, chunks[1]);
}

fn draw_form_inputs(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let fields = [
        (Panel::Grade, " Grade ", state.grade.as_str(), chunks[0]),
        (
            Panel::ClassNumber,
            " Class ",
            state.class_number.as_str(),
            chunks[1],
        ),
        (
            Panel::Date,
            " Date YYYYMMDD (f:fetch) ",
            state.date.as_str(),
            chunks[2],
        ),
    ];

    for (panel, title, content, chunk) in fields {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(input_border_style(state, panel))
            .title(title);
        f.render_widget(Paragraph::new(content).block(block), chunk);
        set_input_cursor(f, state, panel, chunk);
    }
}

fn draw_timetable(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Timetable;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Timetable ");

    match timetable_view(state.timetable.as_deref()) {
        TimetableViewState::Hidden => {
            let hint = Paragraph::new("Fill in the form and press 'f' to fetch the timetable.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(hint, area);
        }
        TimetableViewState::Empty => {
            let empty = Paragraph::new(NO_DATA_MESSAGE)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(empty, area);
        }
        TimetableViewState::Rows(rows) => {
            let lines: Vec<Line> = rows
                .into_iter()
                .map(|row| {
                    Line::from(vec![
                        Span::styled(
                            format!("{:>6}", row.period_label),
                            Style::default().fg(Color::Cyan).bold(),
                        ),
                        Span::raw(format!("  {}", row.subject)),
                    ])
                })
                .collect();

            let table = Paragraph::new(lines)
                .block(block)
                .scroll((state.timetable_scroll, 0));
            f.render_widget(table, area);
        }
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    if !state.error_message.is_empty() {
        let error = Paragraph::new(format!(" {} ", state.error_message))
            .style(Style::default().fg(Color::Red).bold());
        f.render_widget(error, area);
        return;
    }

    let status = if state.is_loading {
        " Loading... "
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | Enter:submit | arrows:move "
    } else {
        " Tab:panel | e:edit | s:search | f:fetch | x:deselect | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 TIMETABLE TUI - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Navigate results / scroll timetable

 SEARCH
   e / Enter          Edit the school name
   s                  Search schools
   Enter (on result)  Select the highlighted school
   x                  Deselect the school

 TIMETABLE
   e / Enter          Edit grade / class / date
   f                  Fetch the timetable

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
