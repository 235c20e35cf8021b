//! Braintrust REST API client

use super::{DatasetRecords, ExperimentTracker, FetchPage, ListResponse};
use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::types::{Project, ResourceRef};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

/// [`ExperimentTracker`] backed by the Braintrust REST API
///
/// Requests carry the API key as a bearer token. List endpoints are paged
/// with `limit`/`starting_after` until a short page comes back.
pub struct HttpTracker {
    http_client: Client,
    base_url: Url,
    api_key: String,
    page_size: usize,
}

impl HttpTracker {
    /// Create a client from a validated configuration
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be created
    pub fn new(config: &ExportConfig) -> Result<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .user_agent(concat!("braintrust-export/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url()?,
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        })
    }

    /// Build an endpoint URL from path segments, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config("api_url", "API URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self
            .http_client
            .get(self.endpoint(segments)?)
            .bearer_auth(&self.api_key))
    }

    fn post(&self, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self
            .http_client
            .post(self.endpoint(segments)?)
            .bearer_auth(&self.api_key))
    }

    /// Send a request and decode a successful JSON body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        debug!("{} <- {}", status.as_u16(), url);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                url,
                body,
            });
        }

        // Some endpoints answer 200 with no body; read that as an empty object.
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_str("{}")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Fetch every object of a list endpoint, following `starting_after` pages
    async fn list_all<T: DeserializeOwned + Send>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut starting_after: Option<String> = None;

        loop {
            let mut request = self
                .get(segments)?
                .query(query)
                .query(&[("limit", self.page_size)]);
            if let Some(after) = &starting_after {
                request = request.query(&[("starting_after", after.as_str())]);
            }

            let page: ListResponse = self.send(request).await?;
            let count = page.objects.len();
            let last_id = page
                .objects
                .last()
                .and_then(|object| object.get("id"))
                .and_then(Value::as_str)
                .map(str::to_string);

            // A page ending on the cursor we sent is a repeat of the previous one.
            if last_id.is_some() && last_id == starting_after {
                debug!("Page after {:?} repeated, stopping", starting_after);
                break;
            }

            for object in page.objects {
                items.push(serde_json::from_value(object)?);
            }

            match last_id {
                Some(id) if count >= self.page_size => starting_after = Some(id),
                _ => break,
            }
        }

        Ok(items)
    }

    /// Open the event log of an experiment identified by project and experiment name
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] when no experiment of that name exists in the project
    pub async fn open_experiment(
        &self,
        project_name: &str,
        experiment_name: &str,
    ) -> Result<ExperimentLog<'_>> {
        let request = self.get(&["v1", "experiment"])?.query(&[
            ("project_name", project_name),
            ("experiment_name", experiment_name),
            ("limit", "1"),
        ]);
        let page: ListResponse = self.send(request).await?;

        let experiment: ResourceRef = page
            .objects
            .into_iter()
            .next()
            .map(serde_json::from_value::<ResourceRef>)
            .transpose()?
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "experiment '{}' in project '{}'",
                    experiment_name, project_name
                ))
            })?;

        Ok(ExperimentLog {
            tracker: self,
            experiment_id: experiment.id,
        })
    }
}

/// An open experiment event log
///
/// Obtained from [`HttpTracker::open_experiment`]; [`ExperimentLog::drain`]
/// reads every event by following fetch cursors.
pub struct ExperimentLog<'a> {
    tracker: &'a HttpTracker,
    experiment_id: String,
}

impl ExperimentLog<'_> {
    /// Id of the experiment this log belongs to
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Read all events of the log, in the order the service returns them
    pub async fn drain(self) -> Result<Vec<Value>> {
        let mut events = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({ "limit": self.tracker.page_size });
            if let Some(cursor) = &cursor {
                body["cursor"] = json!(cursor);
            }

            let request = self
                .tracker
                .post(&["v1", "experiment", self.experiment_id.as_str(), "fetch"])?
                .json(&body);
            let page: FetchPage = self.tracker.send(request).await?;

            let batch = page.events.unwrap_or_default();
            let batch_len = batch.len();
            events.extend(batch);

            match page.cursor {
                Some(next) if batch_len > 0 && cursor.as_ref() != Some(&next) => {
                    cursor = Some(next);
                }
                _ => break,
            }
        }

        debug!(
            "Drained {} events from experiment {}",
            events.len(),
            self.experiment_id
        );
        Ok(events)
    }
}

#[async_trait]
impl ExperimentTracker for HttpTracker {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.list_all(&["v1", "project"], &[]).await
    }

    async fn list_experiments(&self, project_id: &str) -> Result<Vec<ResourceRef>> {
        self.list_all(&["v1", "experiment"], &[("project_id", project_id)])
            .await
    }

    async fn retrieve_experiment(&self, experiment_id: &str) -> Result<Value> {
        self.send(self.get(&["v1", "experiment", experiment_id])?)
            .await
    }

    async fn summarize_experiment(&self, experiment_id: &str) -> Result<Value> {
        self.send(self.get(&["v1", "experiment", experiment_id, "summarize"])?)
            .await
    }

    async fn fetch_experiment_events(
        &self,
        project_name: &str,
        experiment_name: &str,
    ) -> Result<Vec<Value>> {
        self.open_experiment(project_name, experiment_name)
            .await?
            .drain()
            .await
    }

    async fn list_datasets(&self, project_id: &str) -> Result<Vec<ResourceRef>> {
        self.list_all(&["v1", "dataset"], &[("project_id", project_id)])
            .await
    }

    async fn retrieve_dataset(&self, dataset_id: &str) -> Result<Value> {
        self.send(self.get(&["v1", "dataset", dataset_id])?).await
    }

    async fn fetch_dataset(&self, dataset_id: &str) -> Result<DatasetRecords> {
        self.send(self.get(&["v1", "dataset", dataset_id, "fetch"])?)
            .await
    }

    fn name(&self) -> &str {
        "braintrust-http"
    }
}
