use crate::domain::model::QuoteResponse;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait ConfigProvider: Send + Sync {
    fn gateway_endpoint(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn accepted_statuses(&self) -> &[String];
}

/// 取得指定日期的按摩報價
#[async_trait]
pub trait MassageGateway: Send + Sync {
    async fn get_massages(&self, date: NaiveDate) -> Result<QuoteResponse>;
}
