pub mod chat_panel;
pub mod footer;
pub mod header;
pub mod input_box;
pub mod patient_list;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

const SIDEBAR_WIDTH: u16 = 28;

pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                        // header
            Constraint::Min(6),                           // sidebar + chat
            Constraint::Length(input_box::height(app)),   // input
            Constraint::Length(1),                        // footer
        ])
        .split(size);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(vertical[1]);

    header::render(f, vertical[0], app);
    patient_list::render(f, horizontal[0], app);
    chat_panel::render(f, horizontal[1], app);
    input_box::render(f, vertical[2], app);
    footer::render(f, vertical[3], app);
}
