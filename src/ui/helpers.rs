use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::constants::{POPUP_MIN_HEIGHT, POPUP_MIN_WIDTH};

pub(crate) fn field_line(
    label: &str,
    value: &str,
    active: bool,
    label_width: usize,
    max_value_width: usize,
) -> Line<'static> {
    let display = truncate_text(value, max_value_width);
    let indicator = if active { "> " } else { "  " };
    let indicator_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let spans = vec![
        Span::styled(indicator, indicator_style),
        Span::styled(
            format!("{label:<label_width$}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(display),
    ];
    Line::from(spans)
}

/// `Key description, Key description` with the keys in bold.
pub(crate) fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, (key, action)) in hints.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(", "));
        }
        spans.push(Span::styled(*key, Style::default().add_modifier(Modifier::BOLD)));
        spans.push(Span::raw(format!(" {action}")));
    }
    Line::from(spans)
}

pub(crate) fn truncate_text(value: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let count = value.chars().count();
    if count <= max_width {
        return value.to_string();
    }
    if max_width <= 3 {
        return value.chars().take(max_width).collect();
    }
    let mut trimmed: String = value.chars().take(max_width - 3).collect();
    trimmed.push_str("...");
    trimmed
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

pub(crate) fn centered_rect_by_height(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = percent_of(area.width, percent_x).min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    centered_rect_abs(width, height, area)
}

/// `percent` of `value`, computed wide so large terminals do not overflow.
pub(crate) fn percent_of(value: u16, percent: u16) -> u16 {
    (u32::from(value) * u32::from(percent) / 100).min(u32::from(u16::MAX)) as u16
}

pub(crate) fn centered_rect_abs(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.max(POPUP_MIN_WIDTH).min(area.width);
    let height = height.max(POPUP_MIN_HEIGHT).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

pub(crate) fn padded_rect(area: Rect, pad: u16) -> Rect {
    Rect {
        x: area.x + pad,
        y: area.y + pad,
        width: area.width.saturating_sub(pad * 2),
        height: area.height.saturating_sub(pad * 2),
    }
}

/// Border, padding and the title rows drawn by `draw_popup_frame` come on top of the content.
pub(crate) fn modal_height(content_lines: usize, footer_lines: usize) -> u16 {
    let total = content_lines + footer_lines;
    (total as u16).saturating_add(2 + 2 + 2)
}

pub(crate) fn draw_popup_frame(frame: &mut Frame<'_>, area: Rect, title: &str, style: Style) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default().borders(Borders::ALL).border_style(style);
    frame.render_widget(block, area);
    let inner = padded_rect(area, 1);
    if inner.height < 2 {
        return inner;
    }
    let title_line = Paragraph::new(title.to_string())
        .alignment(Alignment::Center)
        .style(style.add_modifier(Modifier::BOLD));
    frame.render_widget(
        title_line,
        Rect {
            x: inner.x,
            y: inner.y,
            width: inner.width,
            height: 1,
        },
    );
    let line = "-".repeat(inner.width as usize);
    let separator = Paragraph::new(line).style(style);
    frame.render_widget(
        separator,
        Rect {
            x: inner.x,
            y: inner.y + 1,
            width: inner.width,
            height: 1,
        },
    );
    Rect {
        x: inner.x,
        y: inner.y + 2,
        width: inner.width,
        height: inner.height.saturating_sub(2),
    }
}

pub(crate) fn list_state(selected: Option<usize>, len: usize) -> ratatui::widgets::ListState {
    let mut state = ratatui::widgets::ListState::default();
    match selected {
        Some(index) if len > 0 => state.select(Some(index.min(len - 1))),
        _ => state.select(None),
    }
    state
}

#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}
