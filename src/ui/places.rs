use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, PlacesFocus};
use crate::places::Place;
use crate::ui::{pane_block, SELECTION_BG};

/// Draw the city picker and the place suggestions for the current day.
pub fn draw_places(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)].as_ref())
        .split(area);

    // --- Left Pane: Cities ---
    let selected_city_index = app.city_list_state.selected();
    let city_items: Vec<ListItem> = app.cities
        .iter()
        .enumerate()
        .map(|(i, city)| {
            let is_active = *city == app.city;
            let (prefix, text_style) = if Some(i) == selected_city_index {
                ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };
            let marker = if is_active { " ✓" } else { "" };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(city.clone(), text_style),
                Span::styled(marker, Style::default().fg(Color::Green)),
            ]))
        })
        .collect();

    let cities_is_focused = app.places_focus == PlacesFocus::Cities;
    let cities_widget = List::new(city_items)
        .block(pane_block("Cities", cities_is_focused))
        .highlight_style(Style::default().bg(SELECTION_BG).add_modifier(Modifier::BOLD));

    f.render_stateful_widget(cities_widget, chunks[0], &mut app.city_list_state);

    // --- Right Pane: Places ---
    let places_is_focused = app.places_focus == PlacesFocus::Places;
    let title = format!("Places in {} (adding to {})", app.city, app.current_day);
    let block = pane_block(&title, places_is_focused);

    if app.api_key.is_empty() {
        draw_placeholder(f, chunks[1], block, "Set a places API key with :key <key> to see suggestions");
        return;
    }
    if app.selection.is_empty() {
        draw_placeholder(f, chunks[1], block, "Select a category to see nearby places");
        return;
    }
    if app.search.is_loading() {
        draw_placeholder(f, chunks[1], block, "Searching...");
        return;
    }

    let places = app.search.results().unwrap_or_default();
    if places.is_empty() {
        draw_placeholder(f, chunks[1], block, "No places found");
        return;
    }

    let place_items: Vec<ListItem> = places.iter().map(place_item).collect();
    let places_widget = List::new(place_items)
        .block(block)
        .highlight_style(Style::default().bg(SELECTION_BG).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    f.render_stateful_widget(places_widget, chunks[1], &mut app.place_list_state);
}

fn place_item(place: &Place) -> ListItem<'static> {
    let rating = match (place.rating, place.user_ratings_total) {
        (Some(r), Some(total)) => format!("★ {r:.1} ({total})"),
        (Some(r), None) => format!("★ {r:.1}"),
        _ => String::new(),
    };

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(place.name.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(rating, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(format!("  {}", place.vicinity), Style::default().fg(Color::Gray))),
    ])
}

fn draw_placeholder(f: &mut Frame, area: Rect, block: ratatui::widgets::Block<'_>, message: &str) {
    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(text, area);
}
