use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::endpoint::EndpointConfig;
use crate::error::{RelayError, Result};

const JSON_CONTENT_TYPE: &str = "application/json";
const UNKNOWN_STATUS: &str = "<unknown status>";

/// Posts payloads to one configured endpoint.
///
/// One request per call, no retry, no timeout beyond the client's own.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    endpoint: EndpointConfig,
}

impl Forwarder {
    pub fn new(client: Client, endpoint: EndpointConfig) -> Self {
        Self { client, endpoint }
    }

    /// Sends `payload` as the JSON body. Only the status of the response is read.
    pub async fn forward<T>(&self, payload: &T) -> Result<StatusCode>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(payload).map_err(RelayError::Serialize)?;
        debug!("forward: POST {} ({} bytes)", self.endpoint.url(), body.len());

        let response = self
            .client
            .post(self.endpoint.url())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(self.endpoint.header().clone(), self.endpoint.key().clone())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status {
                status,
                reason: status.canonical_reason().unwrap_or(UNKNOWN_STATUS).to_owned(),
            });
        }
        Ok(status)
    }

    /// Fire-and-forget variant of [`Forwarder::forward`]: the outcome is only logged.
    pub async fn send_data<T>(&self, payload: &T)
    where
        T: Serialize + ?Sized,
    {
        log_outcome(self.forward(payload).await);
    }
}

/// Reads the endpoint from the environment on every call. With either
/// variable missing it logs and returns before touching the network.
pub async fn send_data_from_env<T>(client: &Client, payload: &T)
where
    T: Serialize + ?Sized,
{
    match EndpointConfig::from_env() {
        Ok(endpoint) => {
            Forwarder::new(client.clone(), endpoint)
                .send_data(payload)
                .await
        }
        Err(e) => error!("{}", e),
    }
}

fn log_outcome(res: Result<StatusCode>) {
    match res {
        Ok(status) => info!("Data sent successfully. status: {}", status.as_u16()),
        // status errors render as "<code> - <reason>"
        Err(e) => error!("Error sending data: {}", e),
    }
}
