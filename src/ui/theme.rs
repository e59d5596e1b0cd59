use ratatui::style::Color;

use crate::model::message::AgentRole;

pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;
pub const ERROR: Color = Color::Red;

pub fn agent_color(agent: AgentRole) -> Color {
    match agent {
        AgentRole::User => Color::White,
        AgentRole::Agent1 => Color::Rgb(0x4F, 0xC3, 0xF7),
        AgentRole::Agent2 => Color::Rgb(0x81, 0xC7, 0x84),
    }
}

pub fn body_color(agent: AgentRole) -> Color {
    match agent {
        AgentRole::User => Color::White,
        AgentRole::Agent1 | AgentRole::Agent2 => Color::Rgb(0xCC, 0xCC, 0xCC),
    }
}
