//! Terminal rendering for the planner.
//!
//! Each screen lives in its own module; this one owns the frame layout,
//! the command bar and every centred overlay (help, modals, dialog frame).

mod email;
mod places;
mod planner;

pub use email::draw_email_dialog;
pub use places::draw_places;
pub use planner::draw_planner;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppMode, PlacesFocus, PlannerFocus};

/// Background for the highlighted row of any list.
pub(crate) const SELECTION_BG: Color = Color::Rgb(80, 80, 120);

const LOGO: [&str; 4] = [
    r"                    _          _           ",
    r" __ __ _____ ___| |__ _ __ | |__ _ _ _  ",
    r" \ V  V / -_) -_) / /| '_ \| / _` | ' \ ",
    r"  \_/\_/\___\___|_\_\| .__/|_\__,_|_||_|",
];

/// Centred overlays that block input until dismissed or until work ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    /// A failure the user has to acknowledge.
    Error,
    /// A confirmation such as "Itinerary sent successfully!".
    Info,
    /// Work in flight; carries no dismiss hint.
    Busy,
}

impl ModalKind {
    const fn title(self) -> &'static str {
        match self {
            Self::Error => " Error ",
            Self::Info => " Info ",
            Self::Busy => "",
        }
    }

    const fn color(self) -> Color {
        match self {
            Self::Error => Color::Red,
            Self::Info => Color::Cyan,
            Self::Busy => Color::Yellow,
        }
    }
}

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    match app.mode {
        AppMode::Splash => draw_splash(f, chunks[0], chunks[1]),
        AppMode::Planner => draw_planner(f, app, chunks[0]),
        AppMode::Places => draw_places(f, app, chunks[0]),
    }
    if app.mode != AppMode::Splash {
        draw_command_bar(f, app, chunks[1]);
    }

    if app.email.is_some() {
        draw_email_dialog(f, app);
    }
    if app.is_loading() {
        draw_modal(f, ModalKind::Busy, "Sending...");
    }

    // Blocking messages cover the help overlay
    if let Some(error) = &app.error_message {
        draw_modal(f, ModalKind::Error, error);
    } else if let Some(status) = &app.status_message {
        draw_modal(f, ModalKind::Info, status);
    } else if app.show_help {
        draw_help(f, app.mode);
    }
}

/// A `width` x `height` rectangle centred in `area`, clamped to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Clear `area` and draw a bordered overlay frame over it; returns the inner area.
pub(crate) fn overlay_frame(f: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    let block = Block::default()
        .title(Span::styled(title.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    inner
}

/// Bordered pane, yellow when it has focus.
pub fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let accent = if is_focused { Style::default().fg(Color::Yellow) } else { Style::default() };
    let title_style = if is_focused { accent.add_modifier(Modifier::BOLD) } else { accent };
    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(accent)
}

/// `key: action | key: action` spans for the command bar.
pub fn key_hints<'a>(hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::raw(format!(": {action}")));
    }
    spans
}

/// Draw a blocking message box sized to `text`; errors and info get a dismiss hint.
pub fn draw_modal(f: &mut Frame, kind: ModalKind, text: &str) {
    let screen = f.size();
    let text_cols = u16::try_from(text.width()).unwrap_or(u16::MAX);
    let max_width = screen.width.saturating_sub(4).max(22);
    let width = text_cols.saturating_add(6).clamp(22, max_width);
    let text_rows = text_cols.div_ceil(width.saturating_sub(4).max(1)).max(1);
    let hint_rows = u16::from(kind != ModalKind::Busy);
    let area = centered(screen, width, text_rows.saturating_add(hint_rows + 2));

    let inner = overlay_frame(f, area, kind.title(), kind.color());
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(hint_rows)])
        .split(inner);

    let style = match kind {
        ModalKind::Busy => Style::default().fg(kind.color()).add_modifier(Modifier::BOLD),
        ModalKind::Error | ModalKind::Info => Style::default().fg(Color::White),
    };
    f.render_widget(
        Paragraph::new(text).style(style).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        rows[0],
    );
    if hint_rows > 0 {
        f.render_widget(
            Paragraph::new("Esc/Enter to dismiss").style(Style::default().fg(Color::Gray)).alignment(Alignment::Center),
            rows[1],
        );
    }
}

fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.is_global_command_mode { "Command" } else { "weekplan" };
    let inner = overlay_frame(f, area, title, Color::Yellow);

    if app.is_global_command_mode {
        f.render_widget(
            Paragraph::new(format!(" :{}", app.global_command_buffer)).style(Style::default().fg(Color::Yellow)),
            inner,
        );
        let typed = u16::try_from(app.global_command_buffer.width()).unwrap_or(u16::MAX);
        let x = inner.left().saturating_add(typed).saturating_add(2);
        if x < inner.right() {
            f.set_cursor(x, inner.top());
        }
        return;
    }

    let hints: &[(&str, &str)] = match (app.mode, app.planner_focus, app.places_focus) {
        (AppMode::Splash, ..) => &[],
        (AppMode::Planner, PlannerFocus::Categories, _) => {
            &[("←/→", "Move"), ("Space/1-8", "Toggle"), ("Tab", "Next pane"), ("p", "Places"), ("e", "Email")]
        }
        (AppMode::Planner, PlannerFocus::Activity, _) => &[("Enter", "Add"), ("↑/↓", "Day"), ("Tab", "Next pane"), ("Esc", "Back")],
        (AppMode::Planner, PlannerFocus::Week, _) => {
            &[("←/→", "Day"), ("d", "Remove"), ("y", "Copy"), ("e", "Email"), (":q", "Quit")]
        }
        (AppMode::Places, _, PlacesFocus::Cities) => &[("Enter", "Search city"), ("Tab", "Places"), ("r", "Reload"), ("Esc", "Planner")],
        (AppMode::Places, _, PlacesFocus::Places) => &[("Enter", "Add to day"), ("[/]", "Day"), ("Tab", "Cities"), ("Esc", "Planner")],
    };

    let mut line = key_hints(hints);
    let city = if app.city.is_empty() { "no city" } else { app.city.as_str() };
    line.push(Span::styled(format!(" | {} | {city}", app.current_day), Style::default().fg(Color::Gray)));
    f.render_widget(Paragraph::new(Line::from(line)).style(Style::default().fg(Color::Gray)), inner);
}

fn draw_splash(f: &mut Frame, area: Rect, footer: Rect) {
    let title = format!(" weekplan v{} ", env!("CARGO_PKG_VERSION"));
    let block = pane_block(&title, false).border_style(Style::default().fg(Color::LightBlue));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let logo_style = Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = LOGO.iter().map(|l| Line::styled(*l, logo_style)).collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled("Plan your week, one day at a time", Style::default().fg(Color::Yellow)));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered(inner, inner.width, height));
    f.render_widget(
        Paragraph::new("Press any key to continue...").style(Style::default().fg(Color::Yellow)).alignment(Alignment::Center),
        centered(footer, footer.width, 1),
    );
}

type KeyTable = &'static [(&'static str, &'static str)];

fn help_sections(mode: AppMode) -> [(&'static str, KeyTable); 2] {
    let commands: KeyTable = &[
        ("F1 / ?", "Toggle this help"),
        (":key <k>", "Set the places API key"),
        (":city <name>", "Search another city"),
        (":day <name>", "Pick the day to plan (:today)"),
        (":email", "Send the itinerary"),
        (":copy", "Copy the itinerary"),
        (":export <p>", "Save as .txt or .html"),
        (":reload", "Search places again"),
        (":q", "Quit"),
    ];
    let screen: (&str, KeyTable) = match mode {
        AppMode::Splash => ("Splash", &[("Any key", "Continue")]),
        AppMode::Planner => (
            "Planner",
            &[
                ("Tab", "Categories, activity, week"),
                ("Space / 1-8", "Toggle a category"),
                ("Enter", "Add the typed activity"),
                ("↑/↓", "Change day while typing"),
                ("←/→", "Change day in the week"),
                ("d", "Remove selected activity"),
                ("p / e", "Places / email"),
            ],
        ),
        AppMode::Places => (
            "Places",
            &[
                ("↑/↓ or j/k", "Navigate"),
                ("Tab", "Cities ⇄ places"),
                ("Enter", "Pick city / add place"),
                ("[ / ]", "Previous / next day"),
                ("r", "Search again"),
            ],
        ),
    };
    [("Commands", commands), screen]
}

fn draw_help(f: &mut Frame, mode: AppMode) {
    let mut lines = Vec::new();
    for (heading, keys) in help_sections(mode) {
        if !lines.is_empty() {
            lines.push(Line::raw(""));
        }
        lines.push(Line::styled(heading, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        lines.extend(keys.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{key:>14}  "), Style::default().fg(Color::Green)),
                Span::raw(*action),
            ])
        }));
    }

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered(f.size(), 56, height);
    let inner = overlay_frame(f, area, " Help ", Color::Cyan);
    f.render_widget(Paragraph::new(lines), inner);
}
