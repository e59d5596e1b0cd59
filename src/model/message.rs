use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a message. Decides which column and colour it renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    User,
    Agent1,
    Agent2,
}

impl AgentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::User => "user",
            AgentRole::Agent1 => "agent1",
            AgentRole::Agent2 => "agent2",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentRole::User => "you",
            AgentRole::Agent1 => "Intake",
            AgentRole::Agent2 => "Recommendation",
        }
    }

    /// Content used when the backend reply has no entry for this agent.
    pub fn fallback_content(&self) -> &'static str {
        match self {
            AgentRole::User => "",
            AgentRole::Agent1 => "The intake agent did not return a response.",
            AgentRole::Agent2 => "The recommendation agent did not return a response.",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: String,
    pub agent: AgentRole,
    pub content: String,
    /// RFC 3339 timestamp.
    pub ts: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: local_id(AgentRole::User),
            role: "user".into(),
            agent: AgentRole::User,
            content: content.into(),
            ts: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn fallback(agent: AgentRole) -> Self {
        Self {
            id: local_id(agent),
            role: "assistant".into(),
            agent,
            content: agent.fallback_content().into(),
            ts: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// `HH:MM` for display; the raw value if it isn't RFC 3339.
    pub fn short_time(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.ts)
            .map(|t| t.with_timezone(&chrono::Local).format("%H:%M").to_string())
            .unwrap_or_else(|_| self.ts.clone())
    }
}

fn local_id(agent: AgentRole) -> String {
    format!("{}-{}", agent.as_str(), chrono::Utc::now().timestamp_millis())
}

/// An agent entry in a chat reply. The backend may leave out any field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplyMessage {
    pub id: Option<String>,
    pub role: Option<String>,
    pub content: Option<String>,
    pub ts: Option<String>,
}

impl ReplyMessage {
    fn into_message(self, agent: AgentRole) -> Message {
        let fallback = Message::fallback(agent);
        Message {
            id: self.id.unwrap_or(fallback.id),
            role: self.role.unwrap_or(fallback.role),
            agent,
            content: self.content.unwrap_or(fallback.content),
            ts: self.ts.unwrap_or(fallback.ts),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    #[serde(default)]
    pub agent1: Option<ReplyMessage>,
    #[serde(default)]
    pub agent2: Option<ReplyMessage>,
    #[serde(default)]
    pub thread_id: Option<String>,
}

impl ChatReply {
    /// The agent1 and agent2 messages, always in that order, substituting
    /// placeholders for whatever the backend omitted.
    pub fn agent_messages(self) -> [Message; 2] {
        [
            self.agent1
                .map(|m| m.into_message(AgentRole::Agent1))
                .unwrap_or_else(|| Message::fallback(AgentRole::Agent1)),
            self.agent2
                .map(|m| m.into_message(AgentRole::Agent2))
                .unwrap_or_else(|| Message::fallback(AgentRole::Agent2)),
        ]
    }
}

/// Payload of `GET /patients/{id}/history`.
#[derive(Debug, Default, Deserialize)]
pub struct History {
    #[serde(default)]
    pub messages: Vec<Message>,
}
