use std::time::Duration;

use reqwest::multipart::{Form, Part};

use crate::{ExtractionOutput, FailureKind, InvoicePayload, SubmitError};

/// Multipart field name the extraction service expects the document under.
pub const INVOICE_FIELD: &str = "invoice";

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000/process-invoice".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: &InvoicePayload) -> Result<ExtractionOutput, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, SubmitError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))
    }

    fn build_form(&self, payload: &InvoicePayload) -> Result<Form, SubmitError> {
        let part = Part::bytes(payload.bytes.clone())
            .file_name(payload.file_name.clone())
            .mime_str(&payload.media_type)
            .map_err(|err| SubmitError::new(FailureKind::InvalidMediaType, err.to_string()))?;
        Ok(Form::new().part(INVOICE_FIELD, part))
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(&self, payload: &InvoicePayload) -> Result<ExtractionOutput, SubmitError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| SubmitError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = self.build_client()?;
        let form = self.build_form(payload)?;

        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        parse_extraction(&body)
    }
}

/// Parse a 2xx body: a JSON object with a string `raw_text` field; all other
/// fields pass through untouched.
fn parse_extraction(body: &[u8]) -> Result<ExtractionOutput, SubmitError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|err| SubmitError::new(FailureKind::MalformedResponse, err.to_string()))?;
    let serde_json::Value::Object(mut fields) = value else {
        return Err(SubmitError::new(
            FailureKind::MalformedResponse,
            "response body is not a JSON object",
        ));
    };
    let raw_text = match fields.remove("raw_text") {
        Some(serde_json::Value::String(text)) => text,
        _ => {
            return Err(SubmitError::new(
                FailureKind::MalformedResponse,
                "missing string field `raw_text`",
            ));
        }
    };
    Ok(ExtractionOutput { raw_text, fields })
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(FailureKind::Timeout, err.to_string());
    }
    SubmitError::new(FailureKind::Network, err.to_string())
}
