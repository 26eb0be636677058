use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::wizard::{Draft, Step, Wizard};
use crate::ui::constants::{
    LABEL_WIDTH, MODAL_MIN_WIDTH, MODAL_WIDTH_PERCENT, PICKER_ERROR_HEIGHT, PICKER_HEIGHT,
    PICKER_WIDTH,
};
use crate::ui::helpers::{
    centered_rect, centered_rect_by_height, draw_popup_frame, field_line, key_hints, modal_height,
    percent_of,
};

const WIZARD_TITLE: &str = "New connection";
const SUMMARY_TITLE: &str = "SSH Connection Summary";
const KEY_TITLE: &str = "Pick private key";

pub(crate) fn draw_wizard(frame: &mut Frame<'_>, wizard: &Wizard) {
    match wizard.step() {
        Step::Key => draw_key_step(frame, wizard),
        Step::Summary => draw_summary(frame, wizard.draft()),
        step => draw_text_step(frame, wizard.draft(), step),
    }
}

fn modal_area(frame: &Frame<'_>, lines: usize, footer_lines: usize) -> (Rect, usize) {
    let area_width = percent_of(frame.area().width, MODAL_WIDTH_PERCENT)
        .min(frame.area().width.saturating_sub(2))
        .max(MODAL_MIN_WIDTH);
    let content_width = area_width.saturating_sub(2 + 2);
    let value_width = content_width.saturating_sub(2 + LABEL_WIDTH as u16 + 2) as usize;
    let height = modal_height(lines, footer_lines);
    (
        centered_rect_by_height(MODAL_WIDTH_PERCENT, height, frame.area()),
        value_width,
    )
}

fn step_index(step: &Step) -> usize {
    match step {
        Step::Name(_) => 0,
        Step::Host(_) => 1,
        Step::Port(_) => 2,
        Step::User(_) => 3,
        Step::AskKey(_) => 4,
        Step::Key => 5,
        Step::Summary => 6,
    }
}

/// Fields entered on earlier steps, in step order.
fn collected_fields(draft: &Draft, step: &Step) -> Vec<(&'static str, String)> {
    let fields = [
        ("Name", draft.name.clone()),
        ("Host", draft.host.clone()),
        (
            "Port",
            draft.port.map(|port| port.to_string()).unwrap_or_default(),
        ),
        ("User", draft.user.clone()),
    ];
    fields.into_iter().take(step_index(step)).collect()
}

fn draw_text_step(frame: &mut Frame<'_>, draft: &Draft, step: &Step) {
    let input = step.input().unwrap_or_default();
    let fields = collected_fields(draft, step);
    let footer = key_hints(&[
        ("Enter", "to continue"),
        ("Backspace", "to delete"),
        ("Esc", "to cancel"),
    ]);
    let (area, value_width) = modal_area(frame, fields.len() + 1, 2);

    let mut lines: Vec<Line> = fields
        .iter()
        .map(|(label, value)| field_line(label, value, false, LABEL_WIDTH, value_width))
        .collect();
    let active_row = lines.len();
    lines.push(field_line(step.label(), input, true, LABEL_WIDTH, value_width));
    lines.push(Line::from(""));
    lines.push(footer);

    let inner = draw_popup_frame(frame, area, WIZARD_TITLE, Style::default());
    frame.render_widget(Paragraph::new(lines), inner);

    let col = input.chars().count().min(value_width) as u16;
    let cursor_x = inner.x + 2 + LABEL_WIDTH as u16 + 2 + col;
    let cursor_y = inner.y + active_row as u16;
    if cursor_y < inner.y + inner.height && cursor_x < inner.x + inner.width {
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn draw_summary(frame: &mut Frame<'_>, draft: &Draft) {
    let profile = draft.to_profile();
    let mut fields = vec![("Name", profile.name.clone()), ("Host", profile.host.clone())];
    if !profile.port.is_empty() {
        fields.push(("Port", profile.port.clone()));
    }
    fields.push(("User", profile.user.clone()));
    let auth = if profile.key.is_empty() {
        "Password".to_string()
    } else {
        profile.key.clone()
    };
    fields.push(("Auth", auth));

    let (area, value_width) = modal_area(frame, fields.len(), 2);
    let mut lines: Vec<Line> = fields
        .iter()
        .map(|(label, value)| field_line(label, value, false, LABEL_WIDTH, value_width))
        .collect();
    lines.push(Line::from(""));
    lines.push(key_hints(&[("Enter", "save"), ("Esc", "cancel")]));

    let inner = draw_popup_frame(frame, area, SUMMARY_TITLE, Style::default().fg(Color::Green));
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_key_step(frame: &mut Frame<'_>, wizard: &Wizard) {
    let area = centered_rect(PICKER_WIDTH, PICKER_HEIGHT, frame.area());
    let inner = draw_popup_frame(frame, area, KEY_TITLE, Style::default().fg(Color::White));
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(PICKER_ERROR_HEIGHT)].as_ref())
        .split(inner);
    wizard.picker().draw(frame, layout[0]);
    if let Some(notice) = wizard.picker_error() {
        let error = Paragraph::new(notice.error.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(error, layout[1]);
    }
}
