//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use quicklinks_core::{EntryKind, Row, RowField};

use super::app::{App, InputMode};

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_rows_pane(frame, app, outer_chunks[0]);
    draw_detail_pane(frame, app, outer_chunks[1]);
    draw_status_bar(frame, app, outer_chunks[2]);

    if app.show_help {
        draw_help_overlay(frame);
    }

    if let Some(msg) = &app.error_message {
        draw_error_modal(frame, msg);
    }
}

/// Draw the ordered rows
fn draw_rows_pane(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .editor
        .rows()
        .enumerate()
        .map(|(i, (_, row))| row_item(i + 1, row))
        .collect();

    let title = if app.dirty {
        format!(" Quick Links ({}) [modified] ", app.editor.len())
    } else {
        format!(" Quick Links ({}) ", app.editor.len())
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED),
        );

    let mut state = ListState::default();
    if !app.editor.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn row_item(position: usize, row: &Row) -> ListItem<'static> {
    let entry = row.to_entry();
    let dim = Style::default().add_modifier(Modifier::DIM);

    let mut spans = vec![
        Span::styled(format!("{:>3} ", position), dim),
        Span::raw(if row.enabled { "[✓] " } else { "[ ] " }),
    ];

    match entry.kind() {
        EntryKind::Separator => {
            spans.push(Span::styled(
                row.label.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        EntryKind::Link => {
            let label_style = match swatch(&row.color) {
                Some(color) => Style::default().fg(color),
                None => Style::default(),
            };
            spans.push(Span::raw(format!("{} ", row.icon)));
            if row.label.is_empty() {
                spans.push(Span::styled("(no label)", dim));
            } else {
                spans.push(Span::styled(row.label.clone(), label_style));
            }
            spans.push(Span::styled(format!("  {}", row.url), dim));
        }
    }

    let mut item = ListItem::new(Line::from(spans));
    if !row.enabled {
        item = item.style(Style::default().add_modifier(Modifier::CROSSED_OUT));
    }
    item
}

/// Parse `#rgb` / `#rrggbb` into a terminal color
fn swatch(color: &str) -> Option<Color> {
    let hex = color.strip_prefix('#')?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let value = u32::from_str_radix(&expanded, 16).ok()?;
    Some(Color::Rgb(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}

/// Draw the selected row's fields
fn draw_detail_pane(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let title = if editing { " Edit " } else { " Details " };

    let block = Block::default().title(title).borders(Borders::ALL);

    let Some(row) = app.selected_row() else {
        let paragraph = Paragraph::new("No entries. Press a to add a link or R to reset.")
            .block(block)
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(paragraph, area);
        return;
    };

    let lines: Vec<Line> = RowField::ALL
        .iter()
        .map(|&field| {
            let active = editing && field == app.edit_field;
            let value = if active {
                app.edit_buffer.as_str()
            } else {
                row.field(field)
            };
            let label_style = if active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            Line::from(vec![
                Span::styled(format!("{:<6} ", field.name()), label_style),
                Span::raw(value.to_string()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);

    if editing {
        // Field rows start one line below the top border
        let row_index = RowField::ALL
            .iter()
            .position(|&f| f == app.edit_field)
            .unwrap_or(0) as u16;
        let before: String = app.edit_buffer.chars().take(app.edit_cursor).collect();
        let cursor_x = area.x + 1 + 7 + Span::raw(before).width() as u16;
        frame.set_cursor_position((cursor_x, area.y + 1 + row_index));
    }
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if app.confirm_reset {
        "Reset to defaults? Stored list will be discarded. (y/N)".to_string()
    } else if let Some(msg) = &app.status_message {
        msg.clone()
    } else if app.input_mode == InputMode::Editing {
        "Tab:next field  Enter:done  Esc:cancel".to_string()
    } else {
        "j/k:nav  J/K:move  space:toggle  a:add  s:sep  d:del  enter:edit  o:open  w:save  ?:help  q:quit"
            .to_string()
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Centered popup area
fn popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let popup_area = popup(frame.area(), 50, 24);

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Select next/previous"),
        Line::from("  g/G         First/last entry"),
        Line::from(""),
        Line::from("Arrange:"),
        Line::from("  K/J         Move entry up/down"),
        Line::from("  space       Enable/disable"),
        Line::from("  a           Add link"),
        Line::from("  s           Add separator"),
        Line::from("  d           Remove entry"),
        Line::from("  Enter       Edit fields (Tab cycles)"),
        Line::from("  o           Open link in browser"),
        Line::from(""),
        Line::from("  w           Save"),
        Line::from("  R           Reset to defaults"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, popup_area);
}

/// Draw an error that stays until a key is pressed
fn draw_error_modal(frame: &mut Frame, msg: &str) {
    let popup_area = popup(frame.area(), 60, 8);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = vec![
        Line::from(msg.to_string()),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to continue",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}
