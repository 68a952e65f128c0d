use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, PlannerFocus};
use crate::types::{Category, Day};
use crate::ui::{pane_block, SELECTION_BG};

/// Draw the category chips, the activity line and the seven-day grid.
pub fn draw_planner(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Category chips
            Constraint::Length(3), // Activity entry
            Constraint::Min(4),    // Week grid
        ])
        .split(area);

    draw_categories(f, app, chunks[0]);
    draw_activity_input(f, app, chunks[1]);
    draw_week(f, app, chunks[2]);
}

fn draw_categories(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.planner_focus == PlannerFocus::Categories;

    let mut spans = vec![Span::raw(" ")];
    for (i, category) in Category::all().iter().enumerate() {
        let is_selected = app.selection.contains(*category);
        let is_cursor = is_focused && i == app.category_cursor;

        let mut style = if is_selected {
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        if is_cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
        }

        spans.push(Span::styled(format!(" {} {} ", i + 1, category.name()), style));
        spans.push(Span::raw(" "));
    }

    let title = app.selection.primary().map_or_else(
        || "Categories".to_string(),
        |primary| format!("Categories (new activities: {primary})"),
    );
    let widget = Paragraph::new(Line::from(spans)).block(pane_block(&title, is_focused));
    f.render_widget(widget, area);
}

#[allow(clippy::cast_possible_truncation)]
fn draw_activity_input(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.planner_focus == PlannerFocus::Activity;

    let day_label = format!(" ◀ {} ▶ ", app.current_day);
    let line = if app.activity_input.is_empty() && !is_focused {
        Line::from(vec![
            Span::styled(day_label.clone(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled("Type an activity name...", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::styled(day_label.clone(), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(app.activity_input.display(), Style::default().fg(Color::White)),
        ])
    };

    let title = if app.selection.is_empty() {
        "Activity (select a category first)"
    } else {
        "Activity"
    };
    f.render_widget(Paragraph::new(line).block(pane_block(title, is_focused)), area);

    if is_focused {
        let prefix = unicode_width::UnicodeWidthStr::width(day_label.as_str());
        let x = area.left() + 1 + (prefix + app.activity_input.display_width()) as u16;
        if x < area.right().saturating_sub(1) {
            f.set_cursor(x, area.top() + 1);
        }
    }
}

fn draw_week(f: &mut Frame, app: &mut App, area: Rect) {
    let is_focused = app.planner_focus == PlannerFocus::Week;

    // Monday..Thursday on top, Friday..Sunday below
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);

    for (day, cell) in Day::all().iter().zip(top.iter().chain(bottom.iter())) {
        draw_day(f, app, *day, *cell, is_focused);
    }
}

fn draw_day(f: &mut Frame, app: &mut App, day: Day, area: Rect, week_focused: bool) {
    let is_current = day == app.current_day;

    let items: Vec<ListItem> = app
        .itinerary
        .activities_for_day(day)
        .iter()
        .map(|activity| {
            ListItem::new(Line::from(vec![
                Span::styled(activity.name.clone(), Style::default().fg(Color::White)),
                Span::styled(format!(" · {}", activity.category_name()), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let count = items.len();
    let title = if count == 0 { day.name().to_string() } else { format!("{} ({count})", day.name()) };
    let list = List::new(items)
        .block(pane_block(&title, is_current))
        .highlight_style(Style::default().bg(SELECTION_BG).add_modifier(Modifier::BOLD));

    if is_current && week_focused {
        f.render_stateful_widget(list, area, &mut app.week_list_state);
    } else {
        f.render_widget(list, area);
    }
}
