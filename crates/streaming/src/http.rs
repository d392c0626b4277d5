use tracing::debug;

use crate::protocol::{BoundaryInfo, Breaks, ClassBreaksResponse};
use crate::service::{BoundaryService, BoxFuture, BreaksService, ServiceError};

/// reqwest-backed implementation of both service seams.
#[derive(Debug, Clone, Default)]
pub struct HttpGateway {
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ServiceError> {
        debug!(%url, "issuing GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                code: status.as_u16(),
                body,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

impl BreaksService for HttpGateway {
    fn fetch_breaks(&self, url: &str) -> BoxFuture<'_, Result<Breaks, ServiceError>> {
        let url = url.to_string();
        Box::pin(async move {
            let parsed: ClassBreaksResponse = self.get_json(&url).await?;
            Ok(parsed.class_breaks)
        })
    }
}

impl BoundaryService for HttpGateway {
    fn lookup_boundary(&self, url: &str) -> BoxFuture<'_, Result<BoundaryInfo, ServiceError>> {
        let url = url.to_string();
        Box::pin(async move { self.get_json(&url).await })
    }
}
