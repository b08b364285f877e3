use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::{Form, Part};

use crate::config::CounterConfig;
use crate::error::RecognizerError;
use crate::models::Prediction;
use crate::recognizer::{DetectResponse, Recognizer};

/// Recognizer reached over HTTP with a multipart JPEG upload
#[derive(Debug, Clone)]
pub struct HttpRecognizer {
    client: Client,
    endpoint: String,
    upload_name: String,
}

impl HttpRecognizer {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RecognizerError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            upload_name: crate::config::DEFAULT_UPLOAD_NAME.to_string(),
        })
    }

    pub fn from_config(config: &CounterConfig) -> Result<Self, RecognizerError> {
        Ok(Self::new(config.endpoint.clone(), config.request_timeout)?
            .with_upload_name(config.upload_name.clone()))
    }

    /// Override the file name attached to each upload
    pub fn with_upload_name(mut self, name: impl Into<String>) -> Self {
        self.upload_name = name.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Recognizer for HttpRecognizer {
    async fn recognize(&self, frame: Vec<u8>) -> Result<Vec<Prediction>, RecognizerError> {
        let part = Part::bytes(frame)
            .file_name(self.upload_name.clone())
            .mime_str("image/jpeg")?;
        let form = Form::new().part("file", part);

        let res = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(RecognizerError::Status(status.as_u16()));
        }

        let body = res.bytes().await?;
        let parsed: DetectResponse = serde_json::from_slice(&body)
            .map_err(|e| RecognizerError::Malformed(e.to_string()))?;

        tracing::debug!(
            endpoint = %self.endpoint,
            predictions = parsed.predictions.len(),
            "recognizer responded"
        );
        Ok(parsed.predictions)
    }
}
