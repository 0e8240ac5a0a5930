use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use super::document::RenderedDocument;
use super::outbound::{self, AdapterSetupError, OutboundFailure};
use super::retry::RetryPolicy;
use crate::config::{ConverterConfig, Secret};

/// PDF bytes produced from a rendered document. Dropped once the email is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact(Vec<u8>);

impl Artifact {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

/// Fixed page geometry requested from the rendering service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub width: u32,
    pub height: u32,
}

impl PageLayout {
    pub const STANDARD: PageLayout = PageLayout {
        width: 800,
        height: 1200,
    };
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    Outbound(#[from] OutboundFailure),
    #[error("rendering service returned an empty document")]
    EmptyArtifact,
    #[error("unable to read rendered document: {0}")]
    Body(#[source] reqwest::Error),
}

/// Port for turning a rendered HTML document into a PDF.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn convert(&self, document: &RenderedDocument) -> Result<Artifact, ConversionError>;
}

#[derive(Debug, Serialize)]
struct ConversionRequest<'a> {
    html: &'a str,
    css: &'a str,
    google_fonts: &'a str,
    format: &'a str,
    width: u32,
    height: u32,
}

/// HTML/CSS to Image API client requesting PDF output.
#[derive(Debug, Clone)]
pub struct HtmlCssToImageClient {
    http: Client,
    endpoint: String,
    user_id: Secret,
    api_key: Secret,
    layout: PageLayout,
    retry: RetryPolicy,
}

impl HtmlCssToImageClient {
    pub fn from_config(
        config: &ConverterConfig,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, AdapterSetupError> {
        let user_id = outbound::require_secret(config.user_id.as_ref(), "CONVERTER_USER_ID")?;
        let api_key = outbound::require_secret(config.api_key.as_ref(), "CONVERTER_API_KEY")?;

        Ok(Self {
            http: outbound::build_client(timeout)?,
            endpoint: format!("{}/v1/image", config.base_url.trim_end_matches('/')),
            user_id,
            api_key,
            layout: PageLayout::STANDARD,
            retry,
        })
    }
}

#[async_trait]
impl DocumentConverter for HtmlCssToImageClient {
    async fn convert(&self, document: &RenderedDocument) -> Result<Artifact, ConversionError> {
        let request = ConversionRequest {
            html: document.as_str(),
            css: "",
            google_fonts: "Arial",
            format: "pdf",
            width: self.layout.width,
            height: self.layout.height,
        };

        let response = outbound::send_with_retry(&self.retry, "document converter", || {
            self.http
                .post(&self.endpoint)
                .basic_auth(self.user_id.expose(), Some(self.api_key.expose()))
                .json(&request)
        })
        .await
        .inspect_err(|err| {
            if let OutboundFailure::Status { status, detail, .. } = err {
                error!(%status, detail = %detail, "document converter rejected document");
            }
        })?;

        let bytes = response.bytes().await.map_err(ConversionError::Body)?;
        if bytes.is_empty() {
            return Err(ConversionError::EmptyArtifact);
        }

        debug!(bytes = bytes.len(), "document converted");
        Ok(Artifact::new(bytes.to_vec()))
    }
}
