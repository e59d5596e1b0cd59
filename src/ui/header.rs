use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::ui::theme::{ACCENT, MUTED};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            " medchat ",
            Style::default()
                .fg(ratatui::style::Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", app.base_url()), Style::default().fg(MUTED)),
    ];

    match &app.active_patient {
        Some(patient) => {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                patient.label(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            if let Some(notes) = &patient.notes {
                let notes: String = notes.chars().take(60).collect();
                spans.push(Span::styled(format!("  {notes}"), Style::default().fg(MUTED)));
            }
        }
        None => spans.push(Span::styled(" no patient selected", Style::default().fg(MUTED))),
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
