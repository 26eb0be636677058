use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::ui::constants::{FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::ui::modals::draw_wizard;
use crate::ui::panels::{draw_app_header, draw_footer, draw_saved_list};

pub(crate) mod constants;
mod helpers;
mod modals;
mod panels;
pub(crate) mod pickers;

pub(crate) fn draw_ui(frame: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(FOOTER_HEIGHT),
            ]
            .as_ref(),
        )
        .split(frame.area());

    draw_app_header(frame, app, layout[0]);
    draw_saved_list(frame, app, layout[1]);
    draw_footer(frame, app, layout[2]);

    if let Some(wizard) = app.wizard() {
        draw_wizard(frame, wizard);
    }
}
