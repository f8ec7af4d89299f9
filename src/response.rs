use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Serialize, Serializer};
use tracing::debug;
use uuid::Uuid;

use crate::ec2_image_client::MachineImage;
use crate::event::LifecycleEvent;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageData {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<MachineImage> for ImageData {
    fn from(image: MachineImage) -> Self {
        ImageData {
            id: image.image_id,
            name: image.name,
            description: image.description,
        }
    }
}

/// The status report CloudFormation expects at `ResponseURL`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponsePayload {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    #[serde(serialize_with = "data_or_empty_object")]
    pub data: Option<ImageData>,
}

impl ResponsePayload {
    pub fn success(event: &LifecycleEvent, reason: &str, data: Option<ImageData>) -> Self {
        Self::new(event, ResponseStatus::Success, reason, data)
    }

    pub fn failed(event: &LifecycleEvent, reason: &str) -> Self {
        Self::new(event, ResponseStatus::Failed, reason, None)
    }

    fn new(
        event: &LifecycleEvent,
        status: ResponseStatus,
        reason: &str,
        data: Option<ImageData>,
    ) -> Self {
        ResponsePayload {
            status,
            reason: reason.to_string(),
            physical_resource_id: Uuid::new_v4().to_string(),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            data,
        }
    }
}

fn data_or_empty_object<S>(
    data: &Option<ImageData>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match data {
        Some(data) => data.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

#[async_trait]
pub trait Responder {
    async fn send(&self, response_url: &str, payload: &ResponsePayload) -> Result<()>;
}

/// Delivers responses with a plain HTTP `PUT`.
pub struct HttpResponder {
    client: reqwest::Client,
}

impl HttpResponder {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for HttpResponder {
    async fn send(&self, response_url: &str, payload: &ResponsePayload) -> Result<()> {
        let body = serde_json::to_string(payload).context("Failed to serialize response")?;
        debug!("Sending response to {}: {}", response_url, body);

        // The pre-signed URL is signed without a Content-Type, so none is sent.
        let response = self
            .client
            .put(response_url)
            .body(body)
            .send()
            .await
            .context("Failed to send response")?;

        if !response.status().is_success() {
            anyhow::bail!("Response was rejected: {}", response.status());
        }
        Ok(())
    }
}
