use chrono::NaiveDate;

/// Counters collected while cleaning the price file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub invalid_date: usize,
    pub duplicates: usize,
    pub out_of_order: usize,
    pub first_invalid_date: Option<String>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl LoadReport {
    pub fn record_invalid_date(&mut self, raw: &str) {
        self.invalid_date += 1;
        if self.first_invalid_date.is_none() {
            self.first_invalid_date = Some(raw.to_string());
        }
    }

    pub fn is_clean(&self) -> bool {
        self.invalid_date == 0 && self.duplicates == 0 && self.out_of_order == 0
    }
}

#[cfg(test)]
mod tests {
    use super::LoadReport;

    #[test]
    fn record_invalid_date_keeps_first_sample() {
        let mut report = LoadReport::default();
        assert!(report.is_clean());
        report.record_invalid_date("not-a-date");
        report.record_invalid_date("also-bad");
        assert_eq!(report.invalid_date, 2);
        assert_eq!(report.first_invalid_date.as_deref(), Some("not-a-date"));
        assert!(!report.is_clean());
    }
}
