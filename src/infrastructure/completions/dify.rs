#[cfg(test)]
#[path = "dify_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserializer;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Completion;
use crate::domain::models::CompletionClient;
use crate::domain::models::CompletionError;
use crate::domain::models::CompletionRequest;
use crate::domain::models::Usage;

// Prices are sent as decimal strings by the hosted service, as numbers by some
// self hosted versions.
fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match serde::de::Deserialize::deserialize(deserializer)? {
        serde_json::Value::Number(val) => {
            return val
                .as_f64()
                .ok_or_else(|| return serde::de::Error::custom("Number out of range"));
        }
        serde_json::Value::String(val) => {
            return val.trim().parse::<f64>().map_err(serde::de::Error::custom);
        }
        serde_json::Value::Null => return Ok(0.0),
        _ => return Err(serde::de::Error::custom("Wrong type, expected number or string")),
    }
}

// Usage is informational. A metadata block that does not match the expected
// shape is dropped rather than failing the whole answer.
fn lenient_metadata<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<MetadataResponse>, D::Error> {
    let value: Option<serde_json::Value> = serde::de::Deserialize::deserialize(deserializer)?;
    let value = match value {
        Some(value) => value,
        None => return Ok(None),
    };

    match serde_json::from_value::<MetadataResponse>(value) {
        Ok(metadata) => return Ok(Some(metadata)),
        Err(err) => {
            tracing::debug!(error = ?err, "Ignoring unexpected completion metadata");
            return Ok(None);
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ChatMessageRequest {
    inputs: serde_json::Map<String, serde_json::Value>,
    query: String,
    response_mode: String,
    conversation_id: String,
    user: String,
}

impl From<CompletionRequest> for ChatMessageRequest {
    fn from(request: CompletionRequest) -> ChatMessageRequest {
        return ChatMessageRequest {
            inputs: serde_json::Map::new(),
            query: request.query,
            response_mode: "blocking".to_string(),
            conversation_id: "".to_string(),
            user: request.user,
        };
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct UsageResponse {
    #[serde(default)]
    total_tokens: u64,
    #[serde(default, deserialize_with = "number_or_string")]
    total_price: f64,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    latency: f64,
}

impl From<UsageResponse> for Usage {
    fn from(val: UsageResponse) -> Usage {
        return Usage {
            total_tokens: val.total_tokens,
            total_price: val.total_price,
            currency: val.currency,
            latency: val.latency,
        };
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MetadataResponse {
    usage: Option<UsageResponse>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ChatMessageResponse {
    answer: Option<String>,
    message_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_metadata")]
    metadata: Option<MetadataResponse>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifyConfig {
    pub url: String,
    pub token: String,
    pub timeout: Option<Duration>,
}

impl DifyConfig {
    pub fn from_config(config: &Config) -> Result<DifyConfig> {
        let timeout_str = config.get(ConfigKey::CompletionTimeout);
        let mut timeout = None;
        if !timeout_str.trim().is_empty() {
            let millis = timeout_str.trim().parse::<u64>().with_context(|| {
                return format!("Invalid completion-timeout '{timeout_str}', expected milliseconds");
            })?;
            timeout = Some(Duration::from_millis(millis));
        }

        return Ok(DifyConfig {
            url: config.get(ConfigKey::DifyURL),
            token: config.get(ConfigKey::DifyToken),
            timeout,
        });
    }
}

pub struct Dify {
    url: String,
    token: String,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl Dify {
    pub fn new(config: DifyConfig) -> Dify {
        return Dify {
            url: config.url.trim_end_matches('/').to_string(),
            token: config.token,
            timeout: config.timeout,
            client: reqwest::Client::new(),
        };
    }
}

#[async_trait]
impl CompletionClient for Dify {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Dify URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Dify token is not defined. Set it with --dify-token, VOYAGE_DIFY_TOKEN, or in the config file");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
        let req = ChatMessageRequest::from(request);

        let mut builder = self
            .client
            .post(format!("{url}/chat-messages", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let res = builder.send().await.map_err(|err| {
            tracing::error!(error = ?err, "Dify is not reachable");
            return CompletionError::from(err);
        })?;

        let status = res.status();
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                "Failed to make completion request to Dify"
            );
            return Err(CompletionError::TransportFailure(format!(
                "Dify responded with status {status}"
            )));
        }

        let body = res.json::<ChatMessageResponse>().await?;
        tracing::debug!(body = ?body, "Completion response");

        let answer = match body.answer {
            Some(answer) if !answer.is_empty() => answer,
            _ => return Err(CompletionError::EmptyAnswer),
        };

        let usage = body
            .metadata
            .and_then(|metadata| return metadata.usage)
            .map(Usage::from);

        if let Some(usage) = &usage {
            tracing::debug!(
                tokens = usage.total_tokens,
                price = %format!("{} {}", usage.total_price, usage.currency),
                latency = %format!("{:.2}ms", usage.latency * 1000.0),
                "Completion usage"
            );
        }

        return Ok(Completion {
            answer,
            message_id: body.message_id,
            usage,
        });
    }
}
