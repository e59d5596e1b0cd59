use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Focus};
use crate::ui::theme::{ERROR, MUTED};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    // The latest error replaces the hints until it is cleared.
    if let Some(error) = &app.error {
        let line = Line::from(vec![
            Span::styled(
                " error ",
                Style::default()
                    .fg(ratatui::style::Color::Black)
                    .bg(ERROR)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {error} "), Style::default().fg(ERROR)),
            hint("esc", "dismiss"),
        ]);
        f.render_widget(Paragraph::new(line), area);
        return;
    }

    let spans = match app.focus {
        Focus::Patients => vec![
            hint("↑↓", "navigate"),
            hint("enter", "open"),
            hint("n", "new patient"),
            hint("r", "reload"),
            hint("tab", "message"),
            hint("q", "quit"),
        ],
        Focus::Input => vec![
            hint("enter", "send"),
            hint("shift+enter/ctrl+j", "newline"),
            hint("esc", "patients"),
            hint("ctrl+c", "quit"),
        ],
        Focus::NewPatient => vec![hint("enter", "save"), hint("esc", "cancel")],
    };

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(format!(" {key}:{desc} "), Style::default().fg(MUTED))
}
