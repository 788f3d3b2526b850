use crate::core::{AppointmentContext, FeeTimetable, Money, NormalizedFeeEntry, RawFeeEntry};
use crate::utils::error::{PolicyViolation, QuoteError, Result};
use chrono::NaiveDate;

/// Builds the cancellation fee timetable for one appointment.
///
/// Never fails: an invalid batch, an empty batch or a batch where every
/// entry gets discarded all end up as "non-refundable from today".
pub fn normalize(context: &AppointmentContext, raw_entries: &[RawFeeEntry]) -> FeeTimetable {
    if let Err(e) = validate_batch(&context.base_price, raw_entries) {
        tracing::warn!(
            "⚠️ Discarding {} cancellation policies: {}",
            raw_entries.len(),
            e
        );
        return non_refundable_from(context.today, &context.base_price);
    }

    let mut builder = TimetableBuilder::default();
    let mut sorted: Vec<&RawFeeEntry> = raw_entries.iter().collect();
    sorted.sort_by_key(|entry| entry.effective_date);

    for entry in sorted {
        let date = entry.effective_date.max(context.today);
        let fee = &entry.fee;

        if let Some(existing) = builder.find_mut(date) {
            if fee.amount > existing.amount {
                existing.amount = fee.amount;
            }
            continue;
        }

        if entry.effective_date < context.today {
            builder.push(context.today, fee.amount, &fee.currency);
            continue;
        }

        if date == context.appointment_date {
            builder.push(
                context.appointment_date,
                context.base_price.amount,
                &context.base_price.currency,
            );
            continue;
        }

        if date > context.appointment_date {
            tracing::debug!("Dropping cancellation policy after appointment: {}", date);
            continue;
        }

        // 費用必須隨日期遞增，否則沒有新資訊
        if builder.has_amount_at_least(fee.amount) {
            tracing::debug!(
                "Dropping cancellation policy on {} ({} {}): fee does not increase",
                date,
                fee.amount,
                fee.currency
            );
            continue;
        }

        builder.push(date, fee.amount, &fee.currency);
    }

    if builder.is_empty() {
        builder.push(
            context.today,
            context.base_price.amount,
            &context.base_price.currency,
        );
    }

    if !builder.has_amount(context.base_price.amount) {
        // 預約當天已有費用時（預約日即今天），直接提高為全額
        if let Some(existing) = builder.find_mut(context.appointment_date) {
            existing.amount = context.base_price.amount;
        } else {
            builder.push(
                context.appointment_date,
                context.base_price.amount,
                &context.base_price.currency,
            );
        }
    }

    builder.finish()
}

/// Whole-batch check: one bad entry invalidates every entry.
pub fn validate_batch(base_price: &Money, raw_entries: &[RawFeeEntry]) -> Result<()> {
    for entry in raw_entries {
        let fee = &entry.fee;
        let violation = if fee.amount < 0.0 {
            PolicyViolation::NegativeFee { amount: fee.amount }
        } else if fee.currency != base_price.currency {
            PolicyViolation::CurrencyMismatch {
                expected: base_price.currency.clone(),
                found: fee.currency.clone(),
            }
        } else if fee.amount > base_price.amount {
            PolicyViolation::FeeExceedsPrice {
                fee: fee.amount,
                price: base_price.amount,
            }
        } else {
            continue;
        };
        return Err(QuoteError::InvalidPolicyBatch(violation));
    }
    Ok(())
}

pub fn non_refundable_from(date: NaiveDate, price: &Money) -> FeeTimetable {
    FeeTimetable::from_entries(vec![NormalizedFeeEntry {
        effective_date: date,
        amount: price.amount,
        currency: price.currency.clone(),
    }])
}

#[derive(Default)]
struct TimetableBuilder {
    entries: Vec<NormalizedFeeEntry>,
}

impl TimetableBuilder {
    fn find_mut(&mut self, date: NaiveDate) -> Option<&mut NormalizedFeeEntry> {
        let index = self.entries.iter().position(|e| e.effective_date == date)?;
        self.entries.get_mut(index)
    }

    fn has_amount_at_least(&self, amount: f64) -> bool {
        self.entries.iter().any(|e| amount <= e.amount)
    }

    fn has_amount(&self, amount: f64) -> bool {
        self.entries.iter().any(|e| e.amount == amount)
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, date: NaiveDate, amount: f64, currency: &str) {
        self.entries.push(NormalizedFeeEntry {
            effective_date: date,
            amount,
            currency: currency.to_string(),
        });
    }

    fn finish(self) -> FeeTimetable {
        FeeTimetable::from_entries(self.entries)
    }
}
