use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::Value;
use std::time::Duration;

use super::AdminApi;
use crate::error::AdminError;
use crate::model::{
    CourseId, MaintenanceRequest, MaintenanceStatus, MasterData, RankingEntry, StatusPayload,
    rankings_from_response,
};

const ADMIN_PREFIX: [&str; 3] = ["api", "v1", "admin"];

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct HttpAdminApi {
    client: Client,
    base_url: Url,
}

impl HttpAdminApi {
    /// # Errors
    ///
    /// Will return `Err` if the base url cannot carry a path or the http client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, AdminError> {
        if config.base_url.cannot_be_a_base() {
            return Err(AdminError::Config(format!(
                "{} cannot be used as an api base url",
                config.base_url
            )));
        }
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AdminError::Config(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// `{base}/api/v1/admin/{tail...}`, each tail part encoded as one path segment.
    fn endpoint(&self, tail: &[&str]) -> Result<Url, AdminError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AdminError::Config(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(ADMIN_PREFIX)
            .extend(tail);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, AdminError> {
        tracing::debug!(%url, "GET");
        let resp = self.client.get(url.clone()).send().await?;
        let resp = ensure_success(resp, &url)?;
        Ok(resp.json::<Value>().await?)
    }
}

fn ensure_success(resp: Response, url: &Url) -> Result<Response, AdminError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(AdminError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn fetch_status(&self) -> Result<MaintenanceStatus, AdminError> {
        let body = self.get_json(self.endpoint(&["status"])?).await?;
        let payload: StatusPayload = serde_json::from_value(body)?;
        Ok(MaintenanceStatus::from(payload))
    }

    async fn set_maintenance(&self, enabled: bool) -> Result<(), AdminError> {
        let url = self.endpoint(&["maintenance"])?;
        tracing::debug!(%url, enabled, "PUT");
        let resp = self
            .client
            .put(url.clone())
            .json(&MaintenanceRequest { data: enabled })
            .send()
            .await?;
        ensure_success(resp, &url)?;
        Ok(())
    }

    async fn fetch_master(&self) -> Result<MasterData, AdminError> {
        let body = self.get_json(self.endpoint(&["master"])?).await?;
        Ok(MasterData::from_response(&body))
    }

    async fn fetch_rankings(&self, course_id: &CourseId) -> Result<Vec<RankingEntry>, AdminError> {
        let body = self
            .get_json(self.endpoint(&["ranking", course_id.as_str()])?)
            .await?;
        Ok(rankings_from_response(&body))
    }
}
