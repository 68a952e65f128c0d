use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::input::TextField;
use crate::ui::{centered, overlay_frame, pane_block};

/// Draw the "share your itinerary" dialog over the current screen.
pub fn draw_email_dialog(f: &mut Frame, app: &App) {
    let Some(dialog) = &app.email else { return };

    let area = centered(f.size(), 56, 11);
    let inner = overlay_frame(f, area, " Share Your Itinerary ", Color::Cyan);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Address
            Constraint::Min(1),    // Hint
        ])
        .split(inner);

    draw_field(f, rows[0], "Your Name", &dialog.name, !dialog.address_focused);
    draw_field(f, rows[1], "Friend's Email", &dialog.address, dialog.address_focused);

    let hint = if dialog.sending { "Sending..." } else { "Tab: switch field | Enter: send | Esc: cancel" };
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::Gray)).alignment(Alignment::Center),
        rows[2],
    );

    if !dialog.sending {
        let (field, row) = if dialog.address_focused { (&dialog.address, rows[1]) } else { (&dialog.name, rows[0]) };
        let typed = u16::try_from(field.display_width()).unwrap_or(u16::MAX);
        let x = row.left().saturating_add(1).saturating_add(typed);
        if x < row.right().saturating_sub(1) {
            f.set_cursor(x, row.top() + 1);
        }
    }
}

fn draw_field(f: &mut Frame, area: Rect, label: &str, field: &TextField, is_focused: bool) {
    let text = Paragraph::new(Line::from(field.display())).style(Style::default().fg(Color::White));
    f.render_widget(text.block(pane_block(label, is_focused)), area);
}
