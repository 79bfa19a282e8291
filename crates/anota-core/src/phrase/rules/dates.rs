//! Date resolution for relative words and numeric day/month patterns.

use chrono::{Datelike, Days, NaiveDate};

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::{DATE_DMY, DAY_BEFORE_YESTERDAY, TODAY, YESTERDAY};

/// Date field extractor anchored on the message receipt date.
pub struct DateExtractor {
    received_on: NaiveDate,
}

impl DateExtractor {
    pub fn new(received_on: NaiveDate) -> Self {
        Self { received_on }
    }

    /// Resolve the transaction date. Never fails: falls back to the
    /// receipt date when nothing in the text names a valid date.
    ///
    /// Priority: "anteontem", "ontem", "hoje", first valid numeric date.
    pub fn resolve(&self, text: &str) -> NaiveDate {
        if DAY_BEFORE_YESTERDAY.is_match(text) {
            return self.days_back(2);
        }
        if YESTERDAY.is_match(text) {
            return self.days_back(1);
        }
        if TODAY.is_match(text) {
            return self.received_on;
        }

        self.extract(text)
            .map(|m| m.value)
            .unwrap_or(self.received_on)
    }

    fn days_back(&self, days: u64) -> NaiveDate {
        self.received_on
            .checked_sub_days(Days::new(days))
            .unwrap_or(self.received_on)
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Numeric dates only; impossible calendar dates are skipped.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        // DD/MM, DD/MM/YY, DD/MM/YYYY (also with . or -)
        for caps in DATE_DMY.captures_iter(text) {
            let day: u32 = caps[1].parse().unwrap_or(0);
            let month: u32 = caps[2].parse().unwrap_or(0);
            let year = caps
                .get(3)
                .map(|y| parse_year(y.as_str()))
                .unwrap_or_else(|| self.received_on.year());

            if let (Some(date), Some(full_match)) =
                (NaiveDate::from_ymd_opt(year, month, day), caps.get(0))
            {
                results.push(
                    ExtractionMatch::new(date, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                );
            }
        }

        results
    }
}

/// Two-digit years are read as 20YY.
fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 { 2000 + year } else { year }
}
