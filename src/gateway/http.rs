use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config;
use crate::models::{
    DashboardStats, DocumentRecord, Evaluation, EvaluationDraft, GlobalSearchResults, Patient,
    PatientDraft,
};

use super::normalize;
use super::{ApiError, ClinicApi};

/// HTTP client for the clinic REST backend.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl ApiClient {
    /// Create a client against an explicit base URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client against the configured deployment target.
    pub fn from_env() -> Self {
        Self::new(&config::api_base_url(), config::REQUEST_TIMEOUT_SECS)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_connect() {
            ApiError::Connect(self.base_url.clone())
        } else if err.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else {
            ApiError::Http(err.to_string())
        }
    }

    /// Turn a non-2xx response into a Status error carrying the
    /// backend's `error` field when the body has one.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message_from_body(&body),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET a list endpoint and normalize whatever shape comes back.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let payload: Value = self.get_json(path).await?;
        Ok(normalize::extract_list(payload))
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::check(response).await?;
        Ok(())
    }

}

fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_default()
}

impl ClinicApi for ApiClient {
    async fn list_patients(&self) -> Result<Vec<Patient>, ApiError> {
        self.get_list("/pacientes").await
    }

    async fn get_patient(&self, id: &str) -> Result<Patient, ApiError> {
        self.get_json(&format!("/pacientes/{id}")).await
    }

    async fn create_patient(&self, draft: &PatientDraft) -> Result<Patient, ApiError> {
        self.send_json(reqwest::Method::POST, "/pacientes", draft)
            .await
    }

    async fn update_patient(&self, id: &str, draft: &PatientDraft) -> Result<Patient, ApiError> {
        self.send_json(reqwest::Method::PUT, &format!("/pacientes/{id}"), draft)
            .await
    }

    async fn delete_patient(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/pacientes/{id}")).await
    }

    async fn list_evaluations(&self) -> Result<Vec<Evaluation>, ApiError> {
        self.get_list("/evaluaciones").await
    }

    async fn get_evaluation(&self, id: &str) -> Result<Evaluation, ApiError> {
        self.get_json(&format!("/evaluaciones/{id}")).await
    }

    async fn evaluations_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Vec<Evaluation>, ApiError> {
        self.get_list(&format!("/evaluaciones/patient/{patient_id}"))
            .await
    }

    async fn create_evaluation(&self, draft: &EvaluationDraft) -> Result<Evaluation, ApiError> {
        self.send_json(reqwest::Method::POST, "/evaluaciones", draft)
            .await
    }

    async fn update_evaluation(
        &self,
        id: &str,
        draft: &EvaluationDraft,
    ) -> Result<Evaluation, ApiError> {
        self.send_json(reqwest::Method::PUT, &format!("/evaluaciones/{id}"), draft)
            .await
    }

    async fn delete_evaluation(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/evaluaciones/{id}")).await
    }

    async fn documents_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Vec<DocumentRecord>, ApiError> {
        self.get_list(&format!("/documentos/patient/{patient_id}"))
            .await
    }

    async fn download_document(&self, id: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/documentos/download/{id}")))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = Self::check(response).await?;
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| self.transport_error(e))
    }

    async fn delete_document(&self, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/documentos/{id}")).await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json("/dashboard/stats").await
    }

    async fn search_patients(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Patient>, ApiError> {
        let page = page.to_string();
        let limit = limit.to_string();
        let response = self
            .client
            .get(self.url("/buscar/pacientes"))
            .query(&[("q", query), ("page", page.as_str()), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = Self::check(response).await?;
        let payload: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(normalize::extract_list(payload))
    }

    async fn search_global(&self, query: &str) -> Result<GlobalSearchResults, ApiError> {
        let response = self
            .client
            .get(self.url("/buscar/global"))
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
