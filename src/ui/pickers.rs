use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::app::file_picker::DirectoryPicker;
use crate::ui::constants::PICKER_FOOTER_HEIGHT;
use crate::ui::helpers::list_state;

const PICKER_FOOTER_TEXT: &str =
    "Enter to open/select, Backspace to go up, . to toggle hidden, Esc to cancel";

pub(crate) fn draw_directory_picker(frame: &mut Frame<'_>, area: Rect, picker: &DirectoryPicker) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(PICKER_FOOTER_HEIGHT),
            ]
            .as_ref(),
        )
        .split(area);

    let header = Paragraph::new(format!("Dir: {}", picker.cwd.display()))
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(header, layout[0]);

    if let Some(err) = &picker.error {
        let error = Paragraph::new(err.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(error, layout[1]);
    } else {
        let items: Vec<ListItem> = if picker.entries.is_empty() {
            vec![ListItem::new("Empty")]
        } else {
            picker
                .entries
                .iter()
                .map(|entry| {
                    let suffix = if entry.is_dir { "/" } else { "" };
                    let style = if entry.disabled {
                        Style::default().fg(Color::DarkGray)
                    } else {
                        Style::default()
                    };
                    ListItem::new(format!("{}{}", entry.name, suffix)).style(style)
                })
                .collect()
        };
        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");
        frame.render_stateful_widget(
            list,
            layout[1],
            &mut list_state(Some(picker.selected), picker.entries.len()),
        );
    }

    let footer = Paragraph::new(PICKER_FOOTER_TEXT)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, layout[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileEntry;
    use crate::ui::helpers::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn picker(entries: Vec<FileEntry>, error: Option<String>) -> DirectoryPicker {
        DirectoryPicker {
            cwd: std::env::temp_dir(),
            entries,
            selected: 0,
            show_hidden: true,
            height: 20,
            error,
        }
    }

    #[test]
    fn draw_directory_picker_lists_entries() {
        let picker = picker(
            vec![
                FileEntry {
                    name: ".ssh".to_string(),
                    path: std::env::temp_dir().join(".ssh"),
                    is_dir: true,
                    disabled: false,
                },
                FileEntry {
                    name: "id_rsa".to_string(),
                    path: std::env::temp_dir().join("id_rsa"),
                    is_dir: false,
                    disabled: false,
                },
            ],
            None,
        );
        let backend = TestBackend::new(100, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_directory_picker(frame, frame.area(), &picker))
            .unwrap();
        let content = buffer_text(terminal.backend().buffer());
        assert!(content.contains("Dir: "));
        assert!(content.contains("> .ssh/"));
        assert!(content.contains("id_rsa"));
    }

    #[test]
    fn draw_directory_picker_shows_error() {
        let picker = picker(vec![], Some("read dir: permission denied".to_string()));
        let backend = TestBackend::new(100, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_directory_picker(frame, frame.area(), &picker))
            .unwrap();
        let content = buffer_text(terminal.backend().buffer());
        assert!(content.contains("permission denied"));
    }
}
