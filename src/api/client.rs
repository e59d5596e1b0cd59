use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::base_url::absolute_base;
use super::{ApiResult, ChatApi, RequestError};
use crate::model::message::{ChatReply, History, Message};
use crate::model::patient::{Patient, PatientDraft};

const LIST_PATIENTS_FAILED: &str = "Failed to load patients";
const HISTORY_FAILED: &str = "Failed to load history";
const SAVE_PATIENT_FAILED: &str = "Failed to save patient";
const SEND_FAILED: &str = "Failed to send message";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest<'a> {
    patient_id: &'a str,
    message: &'a str,
}

pub struct HttpClient {
    base: String,
    endpoint: String,
    client: reqwest::Client,
}

impl HttpClient {
    /// `base` is the resolved base URL; relative bases are served through `proxy_origin`.
    pub fn new(base: String, proxy_origin: &str) -> Self {
        let endpoint = absolute_base(&base, proxy_origin);
        Self {
            base,
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint)
    }

    async fn read<T: DeserializeOwned>(
        default: &str,
        sent: reqwest::Result<reqwest::Response>,
    ) -> ApiResult<T> {
        let resp = sent.map_err(|e| RequestError::transport(default, e))?;
        if !resp.status().is_success() {
            return Err(RequestError::from_response(default, resp).await);
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| RequestError::transport(default, e))?;
        serde_json::from_slice(&bytes).map_err(|e| RequestError::decode(default, e))
    }
}

#[async_trait]
impl ChatApi for HttpClient {
    fn base_url(&self) -> &str {
        &self.base
    }

    async fn list_patients(&self) -> ApiResult<Vec<Patient>> {
        let url = self.url("/patients");
        tracing::debug!(%url, "listing patients");
        Self::read(LIST_PATIENTS_FAILED, self.client.get(url).send().await).await
    }

    async fn fetch_history(&self, patient_id: &str) -> ApiResult<Vec<Message>> {
        let url = self.url(&format!(
            "/patients/{}/history",
            urlencoding::encode(patient_id)
        ));
        tracing::debug!(%url, "fetching history");
        let history: History =
            Self::read(HISTORY_FAILED, self.client.get(url).send().await).await?;
        Ok(history.messages)
    }

    async fn upsert_patient(&self, draft: &PatientDraft) -> ApiResult<Patient> {
        let url = self.url("/patients");
        tracing::debug!(%url, name = %draft.name, id = ?draft.id, "saving patient");
        Self::read(
            SAVE_PATIENT_FAILED,
            self.client.post(url).json(draft).send().await,
        )
        .await
    }

    async fn send_message(&self, patient_id: &str, message: &str) -> ApiResult<ChatReply> {
        let url = self.url("/chat/send");
        tracing::debug!(%url, patient_id, "sending chat message");
        let body = SendRequest {
            patient_id,
            message,
        };
        Self::read(SEND_FAILED, self.client.post(url).json(&body).send().await).await
    }
}
