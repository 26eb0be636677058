use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::app::App;
use crate::ui::constants::{APP_TITLE, EMPTY_LIST_TEXT, HELP_TEXT};
use crate::ui::helpers::{list_state, truncate_text};

pub(crate) fn draw_app_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .title(Line::from(Span::styled(APP_TITLE, header_style)))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let text = format!(
        "{} | terminal: {}",
        app.store.path.display(),
        app.store.terminal_name
    );
    let line = Paragraph::new(truncate_text(&text, inner.width as usize))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(line, inner);
}

pub(crate) fn draw_saved_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::LEFT | Borders::RIGHT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.store.ssh_entries.is_empty() {
        let empty = Paragraph::new(EMPTY_LIST_TEXT).style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, inner);
        return;
    }

    let name_width = app
        .store
        .ssh_entries
        .iter()
        .map(|conn| conn.name.chars().count())
        .max()
        .unwrap_or(0);
    let target_style = if app.store.hide_data {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Gray)
    };
    let items: Vec<ListItem> = app
        .store
        .ssh_entries
        .iter()
        .map(|conn| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<name_width$}  ", conn.name)),
                Span::styled(conn.display_target(app.store.hide_data), target_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(
        list,
        inner,
        &mut list_state(app.list.cursor(), app.store.ssh_entries.len()),
    );
}

pub(crate) fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let log_rows = (inner.height as usize).saturating_sub(1).max(1);
    let mut lines = vec![Line::from(Span::styled(
        HELP_TEXT,
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    let log_style = Style::default().fg(Color::Gray);
    if app.log_lines.is_empty() {
        lines.push(Line::from(Span::styled(app.last_log().to_string(), log_style)));
    } else {
        lines.extend(
            app.recent_logs(log_rows)
                .map(|line| Line::from(Span::styled(truncate_text(line, width), log_style))),
        );
    }
    let footer = Paragraph::new(lines).alignment(Alignment::Left);
    frame.render_widget(footer, inner);
}
