pub mod base_url;
pub mod client;
pub mod error;

use async_trait::async_trait;

use crate::model::message::{ChatReply, Message};
use crate::model::patient::{Patient, PatientDraft};

pub use client::HttpClient;
pub use error::RequestError;

pub type ApiResult<T> = std::result::Result<T, RequestError>;

/// The four calls the client makes against the assistant backend.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Resolved base URL, shown in the header.
    fn base_url(&self) -> &str;
    async fn list_patients(&self) -> ApiResult<Vec<Patient>>;
    async fn fetch_history(&self, patient_id: &str) -> ApiResult<Vec<Message>>;
    async fn upsert_patient(&self, draft: &PatientDraft) -> ApiResult<Patient>;
    async fn send_message(&self, patient_id: &str, message: &str) -> ApiResult<ChatReply>;
}

#[cfg(test)]
mod tests;
