//! HTTP implementation of the prediction service
//!
//! Talks to the training/prediction API with `reqwest`. Uploads go out as
//! multipart forms; error responses carry a `{"detail": ...}` body whose text
//! becomes the `RemoteCallFailed` message.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    component_debug, component_warn, AssetDetailResponse, AssetStatus, AssetsResponse, Component, ErrorBody,
    PredictResponse, SeedResponse, TrainResponse,
};
use url::Url;

use crate::error::{RemoteOperation, WorkflowError, WorkflowResult};
use crate::services::config::ServiceConfig;
use crate::traits::PredictionService;
use crate::types::UploadedInput;

/// Prediction service reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpPredictionService {
    base_url: Url,
    client: Client,
}

impl HttpPredictionService {
    pub fn new(config: &ServiceConfig) -> WorkflowResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| WorkflowError::config(format!("HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.api_base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL under the base, percent-encoding each segment
    fn endpoint(&self, operation: RemoteOperation, segments: &[&str]) -> WorkflowResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| WorkflowError::remote(operation, None, Some(format!("invalid base URL {}", self.base_url))))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn file_part(operation: RemoteOperation, input: &UploadedInput) -> WorkflowResult<Part> {
        Part::bytes(input.payload.clone())
            .file_name(input.file_name.clone())
            .mime_str(&input.content_type)
            .map_err(|e| WorkflowError::remote(operation, None, Some(format!("invalid content type: {e}"))))
    }

    /// Send a request and decode a JSON success body
    async fn execute<T: DeserializeOwned>(&self, operation: RemoteOperation, request: RequestBuilder) -> WorkflowResult<T> {
        let response = request.send().await.map_err(|e| {
            component_warn!(Component::Client, error = %e, "🔌 {} request failed to send", operation);
            WorkflowError::remote(operation, e.status().map(|s| s.as_u16()), None)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|error| error.message());
            component_warn!(
                Component::Client,
                status = status.as_u16(),
                "❌ {} rejected by server: {}",
                operation,
                message.as_deref().unwrap_or("no details")
            );
            return Err(WorkflowError::remote(operation, Some(status.as_u16()), message));
        }

        response.json::<T>().await.map_err(|e| {
            component_warn!(Component::Client, error = %e, "📦 {} response could not be decoded", operation);
            WorkflowError::remote(operation, Some(status.as_u16()), None)
        })
    }
}

#[async_trait::async_trait]
impl PredictionService for HttpPredictionService {
    async fn train(&self, input: &UploadedInput) -> WorkflowResult<TrainResponse> {
        let operation = RemoteOperation::Train;
        let url = self.endpoint(operation, &["train"])?;
        let form = Form::new().part("file", Self::file_part(operation, input)?);

        component_debug!(Component::Client, "🧠 POST {} ({} bytes)", url, input.payload.len());
        self.execute(operation, self.client.post(url).multipart(form)).await
    }

    async fn predict(&self, input: &UploadedInput, model_id: &str) -> WorkflowResult<PredictResponse> {
        let operation = RemoteOperation::Predict;
        let url = self.endpoint(operation, &["predict"])?;
        let form = Form::new()
            .text("model_id", model_id.to_string())
            .part("file", Self::file_part(operation, input)?);

        component_debug!(Component::Client, "🔮 POST {} with model {}", url, model_id);
        self.execute(operation, self.client.post(url).multipart(form)).await
    }

    async fn list_assets(&self) -> WorkflowResult<Vec<AssetStatus>> {
        let operation = RemoteOperation::ListAssets;
        let url = self.endpoint(operation, &["assets"])?;

        let response: AssetsResponse = self.execute(operation, self.client.get(url)).await?;
        Ok(response.assets)
    }

    async fn asset_detail(&self, asset_id: &str) -> WorkflowResult<AssetDetailResponse> {
        let operation = RemoteOperation::AssetDetail;
        let url = self.endpoint(operation, &["assets", asset_id])?;

        self.execute(operation, self.client.get(url)).await
    }

    async fn seed_demo_data(&self) -> WorkflowResult<SeedResponse> {
        let operation = RemoteOperation::SeedDemoData;
        let url = self.endpoint(operation, &["seed-demo-data"])?;

        self.execute(operation, self.client.post(url)).await
    }
}
