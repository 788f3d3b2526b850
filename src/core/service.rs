use crate::core::formatter::format_schedule;
use crate::core::normalizer::normalize;
use crate::core::{AppointmentContext, Massage, MassageGateway, MassageOffer};
use crate::utils::error::Result;
use chrono::{Local, NaiveDate};
use std::time::Duration;

pub const DEFAULT_ACCEPTED_STATUSES: [&str; 2] = ["AVAILABLE", "ON_REQUEST"];

pub struct MassageService<G: MassageGateway> {
    gateway: G,
    accepted_statuses: Vec<String>,
}

impl<G: MassageGateway> MassageService<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            accepted_statuses: DEFAULT_ACCEPTED_STATUSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn with_accepted_statuses(mut self, statuses: Vec<String>) -> Self {
        self.accepted_statuses = statuses;
        self
    }

    pub async fn get_massages(&self, date: NaiveDate) -> Result<Vec<MassageOffer>> {
        self.get_massages_on(Local::now().date_naive(), date).await
    }

    /// 以指定的「今天」計算取消政策
    pub async fn get_massages_on(
        &self,
        today: NaiveDate,
        date: NaiveDate,
    ) -> Result<Vec<MassageOffer>> {
        let response = self.gateway.get_massages(date).await?;

        if let Some(message) = response.error_message() {
            tracing::error!("❌ Quote gateway rejected {}: {}", date, message);
            return Ok(Vec::new());
        }

        let total = response.massages.len();
        let offers: Vec<MassageOffer> = response
            .massages
            .into_iter()
            .filter(|massage| self.is_valid_massage(massage))
            .map(|massage| build_offer(today, date, massage))
            .collect();

        tracing::info!("💆 {} of {} massages offered for {}", offers.len(), total, date);
        Ok(offers)
    }

    fn is_valid_massage(&self, massage: &Massage) -> bool {
        if massage.price.amount <= 0.0 {
            tracing::debug!("Skipping {} ({}): no price", massage.name, massage.code);
            return false;
        }
        if !self.accepted_statuses.iter().any(|s| *s == massage.status) {
            tracing::debug!(
                "Skipping {} ({}): status {}",
                massage.name,
                massage.code,
                massage.status
            );
            return false;
        }
        true
    }
}

fn build_offer(today: NaiveDate, date: NaiveDate, massage: Massage) -> MassageOffer {
    let context = AppointmentContext {
        today,
        appointment_date: date,
        base_price: massage.price.clone(),
    };
    let cancellation_policies = normalize(&context, &massage.cancellation_policies);
    let cancellation_policies_formatted = format_schedule(today, &cancellation_policies);

    MassageOffer {
        name: massage.name,
        status: massage.status,
        amount: massage.price.amount,
        currency: massage.price.currency,
        external_reference: massage.code,
        duration: Duration::from_secs(massage.duration.saturating_mul(60)),
        cancellation_policies,
        cancellation_policies_formatted,
    }
}
