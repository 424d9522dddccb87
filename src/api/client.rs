use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use url::Url;

use super::BudgetService;
use crate::config::ClientConfig;
use crate::error::SyncError;
use crate::models::{Budget, BudgetId, BudgetRequest};
use crate::session::Session;

/// reqwest-backed [`BudgetService`]
#[derive(Debug, Clone)]
pub struct HttpBudgetService {
    client: Client,
    base_url: Url,
}

impl HttpBudgetService {
    pub fn new(config: &ClientConfig) -> Result<Self, SyncError> {
        let base_url = Url::parse(&config.api.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(SyncError::InvalidUrl(config.api.base_url.clone()));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.api.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SyncError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SyncError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Map a non-2xx response to [`SyncError::Rejected`]; the body is kept for traces only
async fn acknowledged(operation: &'static str, response: Response) -> Result<Response, SyncError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SyncError::Rejected {
        operation,
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl BudgetService for HttpBudgetService {
    async fn set_budget(&self, session: &Session, request: &BudgetRequest) -> Result<(), SyncError> {
        let url = self.endpoint(&["setBudget"])?;
        tracing::debug!("POST {} ({} = {})", url, request.category, request.amount);

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, session.token())
            .json(request)
            .send()
            .await?;

        acknowledged("set budget", response).await?;
        Ok(())
    }

    async fn delete_budget(&self, session: &Session, id: &BudgetId) -> Result<(), SyncError> {
        let url = self.endpoint(&["deleteBudget", id.as_str()])?;
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .header(AUTHORIZATION, session.token())
            .send()
            .await?;

        acknowledged("delete budget", response).await?;
        Ok(())
    }

    async fn list_budgets(&self, session: &Session) -> Result<Vec<Budget>, SyncError> {
        let url = self.endpoint(&["getBudgets"])?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, session.token())
            .send()
            .await?;

        let budgets = acknowledged("list budgets", response)
            .await?
            .json::<Vec<Budget>>()
            .await?;
        Ok(budgets)
    }
}
