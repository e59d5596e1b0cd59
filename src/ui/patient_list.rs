use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, Focus};
use crate::ui::theme::{ACCENT, MUTED};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let max_name = area.width.saturating_sub(6) as usize;

    let items: Vec<ListItem> = app
        .patients
        .iter()
        .enumerate()
        .map(|(i, patient)| {
            let marker = if app.is_active(patient) {
                Span::styled("● ", Style::default().fg(ACCENT))
            } else {
                Span::raw("  ")
            };

            let label: String = patient.label().chars().take(max_name).collect();
            let style = if i == app.selected_patient && app.focus == Focus::Patients {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![marker, Span::styled(label, style)]))
        })
        .collect();

    let title = if app.saving_patient {
        " Patients (saving...) "
    } else if app.loading_patients {
        " Patients (loading...) "
    } else {
        " Patients "
    };

    let border = if app.focus == Focus::Patients {
        ACCENT
    } else {
        MUTED
    };

    let list = if items.is_empty() {
        List::new(vec![ListItem::new(Span::styled(
            "  none yet, press n",
            Style::default().fg(MUTED),
        ))])
    } else {
        List::new(items)
    };

    let list = list.block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title),
    );

    let mut state = ListState::default();
    if !app.patients.is_empty() {
        state.select(Some(app.selected_patient));
    }
    f.render_stateful_widget(list, area, &mut state);
}
