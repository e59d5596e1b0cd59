use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Focus};
use crate::input::TextInput;
use crate::ui::theme::{ACCENT, MUTED};

const MAX_LINES: u16 = 6;

pub fn height(app: &App) -> u16 {
    let lines = field(app).text().split('\n').count() as u16;
    lines.clamp(1, MAX_LINES) + 2
}

fn field(app: &App) -> &TextInput {
    match app.focus {
        Focus::NewPatient => &app.new_patient_name,
        _ => &app.input,
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let input = field(app);

    let (title, border) = match app.focus {
        Focus::NewPatient => (" New patient name · enter to save, esc to cancel ", ACCENT),
        Focus::Input if app.active_patient.is_none() => (" Select a patient first ", ACCENT),
        Focus::Input if app.loading => (" Waiting for agents... ", ACCENT),
        Focus::Input if app.can_send() => (" Message · enter to send, shift+enter for newline ", ACCENT),
        Focus::Input => (" Message ", ACCENT),
        Focus::Patients => (" Message · tab to type ", MUTED),
    };

    let inner_height = area.height.saturating_sub(2) as usize;
    let (cursor_line, cursor_col) = input.cursor_line_col();
    let skip = (cursor_line + 1).saturating_sub(inner_height);

    let lines: Vec<Line> = input
        .text()
        .split('\n')
        .skip(skip)
        .map(|l| Line::raw(l.to_string()))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);
    f.render_widget(Paragraph::new(lines).block(block), area);

    if app.focus != Focus::Patients {
        let x = area.x + 1 + cursor_col as u16;
        let y = area.y + 1 + cursor_line.saturating_sub(skip) as u16;
        f.set_cursor_position((x.min(area.x + area.width.saturating_sub(2)), y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing;

    #[test]
    fn titles_use_plain_separators() {
        let mut app = testing::app();
        for focus in [Focus::Patients, Focus::Input, Focus::NewPatient] {
            app.focus = focus;
            let rows = testing::draw(80, 3, |f| {
                let area = f.area();
                render(f, area, &app)
            });
            assert!(!rows[0].contains('—'), "{focus:?}: {}", rows[0]);
        }

        app.focus = Focus::Patients;
        let rows = testing::draw(80, 3, |f| {
            let area = f.area();
            render(f, area, &app)
        });
        assert!(rows[0].contains("Message · tab to type"));
    }

    #[test]
    fn height_grows_with_lines_up_to_limit() {
        let mut app = testing::app();
        assert_eq!(height(&app), 3);
        app.focus = Focus::Input;
        for _ in 0..10 {
            app.update(crate::app::Action::Key(crate::event::KeyAction::Newline));
        }
        assert_eq!(height(&app), MAX_LINES + 2);
    }
}
