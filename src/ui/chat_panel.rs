use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::model::message::{AgentRole, Message};
use crate::ui::theme::{agent_color, body_color, MUTED};

/// Intake conversation (user + agent1) on the left, recommendations (agent2) on the right.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_column(
        f,
        columns[0],
        app,
        " Intake ",
        AgentRole::Agent1,
        |m| matches!(m.agent, AgentRole::User | AgentRole::Agent1),
    );
    render_column(
        f,
        columns[1],
        app,
        " Recommendation ",
        AgentRole::Agent2,
        |m| m.agent == AgentRole::Agent2,
    );
}

fn render_column(
    f: &mut Frame,
    area: Rect,
    app: &App,
    title: &str,
    agent: AgentRole,
    include: impl Fn(&Message) -> bool,
) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let text_width = area.width.saturating_sub(4).max(1) as usize;

    let mut all_lines: Vec<Line> = Vec::new();
    for msg in app.messages.iter().filter(|m| include(m)) {
        all_lines.push(Line::from(vec![
            Span::styled(format!("{} ", msg.short_time()), Style::default().fg(MUTED)),
            Span::styled(
                msg.agent.display_name(),
                Style::default()
                    .fg(agent_color(msg.agent))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));

        for text_line in msg.content.lines() {
            for chunk in wrap(text_line, text_width) {
                all_lines.push(Line::from(Span::styled(
                    format!("  {chunk}"),
                    Style::default().fg(body_color(msg.agent)),
                )));
            }
        }

        all_lines.push(Line::raw(""));
    }

    if app.loading {
        all_lines.push(Line::from(Span::styled(
            "  thinking...",
            Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
        )));
    }

    // Auto-scroll to bottom
    let skip = all_lines.len().saturating_sub(visible_height);
    let visible_lines: Vec<Line> = all_lines.into_iter().skip(skip).collect();

    let paragraph = Paragraph::new(visible_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(agent_color(agent)))
            .title(title),
    );

    f.render_widget(paragraph, area);
}

/// Hard-wrap on character count so the scroll offset matches what is drawn.
fn wrap(line: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing;

    #[test]
    fn newest_messages_stay_in_view() {
        let mut app = testing::app();
        app.messages = (0..30).map(|i| Message::user(format!("msg{i}"))).collect();

        let rows = testing::draw(60, 12, |f| {
            let area = f.area();
            render(f, area, &app)
        }).join("\n");
        assert!(rows.contains("msg29"));
        assert!(rows.contains("msg28"));
        assert!(!rows.contains("msg0"));
        assert!(!rows.contains("msg10"));
    }

    #[test]
    fn recommendations_render_in_right_column() {
        let mut app = testing::app();
        app.messages = vec![Message::user("Hello"), Message::fallback(AgentRole::Agent2)];

        let rows = testing::draw(80, 12, |f| {
            let area = f.area();
            render(f, area, &app)
        });
        let left: String = rows.iter().map(|r| r.chars().take(40).collect::<String>()).collect();
        let right: String = rows.iter().map(|r| r.chars().skip(40).collect::<String>()).collect();
        assert!(left.contains("Hello"));
        assert!(right.contains("Recommendation"));
        assert!(!right.contains("Hello"));
    }

    #[test]
    fn wrap_splits_long_lines() {
        assert_eq!(wrap("abcdef", 4), ["abcd", "ef"]);
    }

    #[test]
    fn wrap_keeps_blank_lines() {
        assert_eq!(wrap("", 10), [""]);
    }
}
