use crate::core::{FeeTimetable, FormattedSchedule, NormalizedFeeEntry};
use chrono::{Days, NaiveDate};

const DATE_FORMAT: &str = "%d %m %Y";

/// Renders a normalized timetable as one line per fee range.
///
/// Expects the non-empty timetable produced by the normalizer for the same `today`.
pub fn format_schedule(today: NaiveDate, timetable: &FeeTimetable) -> FormattedSchedule {
    let mut entries: Vec<&NormalizedFeeEntry> = timetable.iter().collect();
    entries.sort_by_key(|entry| entry.effective_date);

    let mut lines = Vec::with_capacity(entries.len() + 1);
    let Some(last) = entries.last() else {
        return FormattedSchedule::from_lines(lines);
    };

    let first = entries[0];
    if first.effective_date != today {
        lines.push(format!(
            "No charge until {}.",
            format_date(day_before(first.effective_date))
        ));
    }

    for pair in entries.windows(2) {
        let (from, until) = (pair[0], pair[1]);
        lines.push(format!(
            "Between {} and {}: {} {}.",
            format_date(from.effective_date),
            format_date(day_before(until.effective_date)),
            from.amount,
            from.currency
        ));
    }

    lines.push(format!(
        "From {}: non-refundable.",
        format_date(last.effective_date)
    ));

    FormattedSchedule::from_lines(lines)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn day_before(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(1)).unwrap_or(date)
}
