use async_trait::async_trait;
use chrono::NaiveDate;

use super::AppointmentBackend;
use crate::errors::DashboardError;
use crate::models::{Appointment, SlotUpdate};
use crate::services::calendar::CalendarMonth;

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_list(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Appointment>, DashboardError> {
        let resp = self.client.get(self.url(path)).query(query).send().await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }
}

/// Turns a non-2xx reply into [`DashboardError::Backend`], using the
/// `error` or `message` field of a JSON body when there is one.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, DashboardError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body: serde_json::Value = resp.json().await.unwrap_or(serde_json::Value::Null);
    let message = body
        .get("error")
        .or_else(|| body.get("message"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

    Err(DashboardError::Backend {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl AppointmentBackend for HttpBackend {
    async fn appointments_on(&self, date: NaiveDate) -> Result<Vec<Appointment>, DashboardError> {
        let date = date.format("%Y-%m-%d").to_string();
        self.get_list("/api/appointments", &[("date", date)]).await
    }

    async fn appointments_in(
        &self,
        month: CalendarMonth,
    ) -> Result<Vec<Appointment>, DashboardError> {
        self.get_list("/api/appointments/month", &month.query_params())
            .await
    }

    async fn all_appointments(&self) -> Result<Vec<Appointment>, DashboardError> {
        self.get_list("/api/appointments", &[]).await
    }

    async fn add(&self, appointment: &Appointment) -> Result<(), DashboardError> {
        let resp = self
            .client
            .post(self.url("/api/appointments/add"))
            .json(appointment)
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    async fn update_time(&self, update: &SlotUpdate) -> Result<(), DashboardError> {
        let resp = self
            .client
            .post(self.url("/api/appointments/update"))
            .json(update)
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    async fn reset(&self) -> Result<(), DashboardError> {
        let resp = self
            .client
            .post(self.url("/api/appointments/reset"))
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }
}
