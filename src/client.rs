//! Blocking REST client for the endpoints the canvas editor talks to.
//!
//! Calls are single-shot: no retry, no cancellation.

use crate::catalog::ModuleCatalog;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::workflow::{WorkflowDocument, validate_workflow};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A linked third-party account a node can reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type", alias = "provider")]
    pub kind: String,
}

/// Body of `POST /credentials`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCredential {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Provider specific secrets, e.g. an e-mail address and app password.
    pub data: serde_json::Map<String, serde_json::Value>,
}

pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            token: None,
        }
    }

    /// Attaches a bearer token obtained elsewhere.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET /modules`
    pub fn list_modules(&self) -> Result<ModuleCatalog, ClientError> {
        let catalog: ModuleCatalog = self.get_json("/modules")?;
        debug!(count = catalog.len(), "fetched module catalog");
        Ok(catalog)
    }

    /// `GET /credentials`
    pub fn list_credentials(&self) -> Result<Vec<Credential>, ClientError> {
        self.get_json("/credentials")
    }

    /// `POST /credentials`
    pub fn create_credential(&self, credential: &NewCredential) -> Result<Credential, ClientError> {
        self.post_json("/credentials", credential)
    }

    /// Validates and submits a workflow (`POST /workflows`). An invalid
    /// document is rejected locally without a request.
    pub fn save_workflow(&self, doc: &WorkflowDocument) -> Result<serde_json::Value, ClientError> {
        let report = validate_workflow(doc);
        if !report.valid {
            return Err(ClientError::Invalid(report));
        }
        let saved = self.post_json("/workflows", doc)?;
        info!(workflow = %doc.id, "saved workflow");
        Ok(saved)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.config.endpoint(path);
        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().map_err(|source| ClientError::Http {
            url: url.clone(),
            source,
        })?;
        Self::decode(url, response)
    }

    fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.config.endpoint(path);
        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().map_err(|source| ClientError::Http {
            url: url.clone(),
            source,
        })?;
        Self::decode(url, response)
    }

    fn decode<T: DeserializeOwned>(url: String, response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .map_err(|source| ClientError::Http { url, source })
    }
}
