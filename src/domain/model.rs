use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: String,
}

impl Money {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// 供應商提供的原始取消費用：自 `effective_date` 起取消需支付 `fee`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFeeEntry {
    #[serde(rename = "date")]
    pub effective_date: NaiveDate,
    #[serde(rename = "price")]
    pub fee: Money,
}

impl RawFeeEntry {
    pub fn new(effective_date: NaiveDate, fee: Money) -> Self {
        Self { effective_date, fee }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentContext {
    pub today: NaiveDate,
    pub appointment_date: NaiveDate,
    pub base_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFeeEntry {
    #[serde(rename = "date")]
    pub effective_date: NaiveDate,
    pub amount: f64,
    pub currency: String,
}

/// Strictly ascending, single-currency fee schedule that reaches full price
/// by the appointment date. Only the normalizer builds one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTimetable(Vec<NormalizedFeeEntry>);

impl FeeTimetable {
    pub(crate) fn from_entries(entries: Vec<NormalizedFeeEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[NormalizedFeeEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedFeeEntry> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FeeTimetable {
    type Item = &'a NormalizedFeeEntry;
    type IntoIter = std::slice::Iter<'a, NormalizedFeeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormattedSchedule(Vec<String>);

impl FormattedSchedule {
    pub(crate) fn from_lines(lines: Vec<String>) -> Self {
        Self(lines)
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for FormattedSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("\n"))
    }
}

/// 閘道回應
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub massages: Vec<Massage>,
}

impl QuoteResponse {
    /// 錯誤訊息非空白時才算失敗
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Massage {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    pub price: Money,
    #[serde(default)]
    pub cancellation_policies: Vec<RawFeeEntry>,
    /// Minutes.
    #[serde(default)]
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MassageOffer {
    pub name: String,
    pub status: String,
    pub amount: f64,
    pub currency: String,
    pub external_reference: String,
    #[serde(serialize_with = "serialize_minutes")]
    pub duration: Duration,
    pub cancellation_policies: FeeTimetable,
    pub cancellation_policies_formatted: FormattedSchedule,
}

fn serialize_minutes<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_secs() / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote_response() {
        let json = r#"{
            "massages": [{
                "code": "1",
                "name": "Swedish massage",
                "status": "AVAILABLE",
                "price": {"amount": 25.0, "currency": "EUR"},
                "cancellationPolicies": [
                    {"date": "2030-05-01", "price": {"amount": 15.0, "currency": "EUR"}}
                ],
                "duration": 20
            }]
        }"#;

        let response: QuoteResponse = serde_json::from_str(json).unwrap();

        assert!(response.error_message().is_none());
        assert_eq!(response.massages.len(), 1);
        let massage = &response.massages[0];
        assert_eq!(massage.price, Money::new(25.0, "EUR"));
        assert_eq!(massage.duration, 20);
        assert_eq!(
            massage.cancellation_policies[0].effective_date,
            NaiveDate::from_ymd_opt(2030, 5, 1).unwrap()
        );
    }

    #[test]
    fn test_blank_error_is_not_an_error() {
        let response: QuoteResponse = serde_json::from_str(r#"{"error": "  "}"#).unwrap();
        assert!(response.error_message().is_none());
        assert!(response.massages.is_empty());

        let response: QuoteResponse =
            serde_json::from_str(r#"{"error": "Minimum notice is 15 days"}"#).unwrap();
        assert_eq!(response.error_message(), Some("Minimum notice is 15 days"));
    }

    #[test]
    fn test_schedule_displays_one_line_per_range() {
        let schedule = FormattedSchedule::from_lines(vec![
            "No charge until 30 04 2030.".to_string(),
            "From 01 05 2030: non-refundable.".to_string(),
        ]);

        assert_eq!(
            schedule.to_string(),
            "No charge until 30 04 2030.\nFrom 01 05 2030: non-refundable."
        );
    }

    #[test]
    fn test_timetable_serializes_as_date_amount_currency() {
        let timetable = FeeTimetable::from_entries(vec![NormalizedFeeEntry {
            effective_date: NaiveDate::from_ymd_opt(2030, 5, 1).unwrap(),
            amount: 10.0,
            currency: "USD".to_string(),
        }]);

        let value = serde_json::to_value(&timetable).unwrap();

        assert_eq!(
            value,
            serde_json::json!([{"date": "2030-05-01", "amount": 10.0, "currency": "USD"}])
        );
    }
}
