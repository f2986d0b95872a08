//! Weekly observation series with optional surveillance-week labels.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Observations that must remain in the training prefix after a split.
const MIN_TRAIN_AFTER_SPLIT: usize = 10;

/// A surveillance week identified by (year, week) under ISO 8601 numbering.
///
/// Labels are supplied by the data-retrieval layer and echoed back in
/// reports; the models never consult them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekLabel {
    pub year: i32,
    pub week: u32,
}

impl WeekLabel {
    pub fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }

    /// The label of the following week, rolling over year boundaries.
    ///
    /// ISO years have 52 or 53 weeks; chrono resolves which.
    ///
    /// ```
    /// use ili_forecast::core::WeekLabel;
    ///
    /// let last = WeekLabel::new(2024, 52);
    /// assert_eq!(last.next(), WeekLabel::new(2025, 1));
    /// ```
    pub fn next(&self) -> WeekLabel {
        match NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon) {
            Some(monday) => {
                let iso = (monday + chrono::Duration::weeks(1)).iso_week();
                WeekLabel {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            // Labels outside the ISO calendar fall back to 52-week arithmetic.
            None => {
                if self.week >= 52 {
                    WeekLabel {
                        year: self.year + 1,
                        week: 1,
                    }
                } else {
                    WeekLabel {
                        year: self.year,
                        week: self.week + 1,
                    }
                }
            }
        }
    }
}

impl fmt::Display for WeekLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

/// A weekly time series: ordered observations, one per calendar week.
///
/// Position alone encodes order; the caller provides the values already
/// sorted ascending by (year, week).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    values: Vec<f64>,
    labels: Option<Vec<WeekLabel>>,
}

impl TimeSeries {
    /// Create a series from ordered weekly values.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            labels: None,
        }
    }

    /// Create a series with parallel week labels.
    pub fn with_labels(values: Vec<f64>, labels: Vec<WeekLabel>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(ForecastError::InvalidArgument(format!(
                "expected {} week labels, got {}",
                values.len(),
                labels.len()
            )));
        }
        Ok(Self {
            values,
            labels: Some(labels),
        })
    }

    /// Number of weekly observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The observed values in chronological order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Week labels, when the caller provided them.
    pub fn labels(&self) -> Option<&[WeekLabel]> {
        self.labels.as_deref()
    }

    /// Label of the most recent observation, when labels are present.
    pub fn last_label(&self) -> Option<WeekLabel> {
        self.labels.as_ref().and_then(|l| l.last().copied())
    }

    /// Split off the trailing `test_size` observations for evaluation.
    ///
    /// The split is purely positional: the holdout is always the final
    /// `test_size` weeks, since a random split would leak future
    /// information into training.
    pub fn train_test_split(&self, test_size: usize) -> Result<(TimeSeries, TimeSeries)> {
        if test_size == 0 {
            return Err(ForecastError::InvalidArgument(
                "test_size must be at least 1".to_string(),
            ));
        }

        let needed = test_size + MIN_TRAIN_AFTER_SPLIT;
        if self.len() < needed {
            return Err(ForecastError::InsufficientData {
                needed,
                got: self.len(),
            });
        }

        let cut = self.len() - test_size;
        Ok((self.slice(0, cut), self.slice(cut, self.len())))
    }

    fn slice(&self, start: usize, end: usize) -> TimeSeries {
        TimeSeries {
            values: self.values[start..end].to_vec(),
            labels: self.labels.as_ref().map(|l| l[start..end].to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled_series(n: usize) -> TimeSeries {
        let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let mut labels = Vec::with_capacity(n);
        let mut week = WeekLabel::new(2023, 40);
        for _ in 0..n {
            labels.push(week);
            week = week.next();
        }
        TimeSeries::with_labels(values, labels).unwrap()
    }

    #[test]
    fn split_produces_trailing_holdout() {
        let series = TimeSeries::new((0..30).map(|i| i as f64).collect());
        let (train, test) = series.train_test_split(12).unwrap();

        assert_eq!(train.len(), 18);
        assert_eq!(test.len(), 12);
        assert_eq!(train.values()[17], 17.0);
        assert_eq!(test.values()[0], 18.0);
        assert_eq!(test.values()[11], 29.0);
    }

    #[test]
    fn split_concatenation_reconstructs_series() {
        let series = TimeSeries::new((0..25).map(|i| (i as f64).sin()).collect());
        let (train, test) = series.train_test_split(7).unwrap();

        let mut rebuilt = train.values().to_vec();
        rebuilt.extend_from_slice(test.values());
        assert_eq!(rebuilt, series.values());
    }

    #[test]
    fn split_requires_margin_above_holdout() {
        let series = TimeSeries::new((0..15).map(|i| i as f64).collect());
        assert_eq!(
            series.train_test_split(12),
            Err(ForecastError::InsufficientData { needed: 22, got: 15 })
        );
    }

    #[test]
    fn split_rejects_zero_holdout() {
        let series = TimeSeries::new((0..30).map(|i| i as f64).collect());
        assert!(matches!(
            series.train_test_split(0),
            Err(ForecastError::InvalidArgument(_))
        ));
    }

    #[test]
    fn split_carries_labels() {
        let series = labeled_series(30);
        let (train, test) = series.train_test_split(10).unwrap();

        assert_eq!(train.labels().unwrap().len(), 20);
        assert_eq!(test.labels().unwrap().len(), 10);
        assert_eq!(test.labels().unwrap()[0], train.last_label().unwrap().next());
        assert_eq!(test.last_label(), series.last_label());
    }

    #[test]
    fn labels_must_match_values() {
        let result = TimeSeries::with_labels(vec![1.0, 2.0], vec![WeekLabel::new(2024, 1)]);
        assert!(matches!(result, Err(ForecastError::InvalidArgument(_))));
    }

    #[test]
    fn week_label_advances_within_year() {
        assert_eq!(WeekLabel::new(2024, 5).next(), WeekLabel::new(2024, 6));
    }

    #[test]
    fn week_label_rolls_over_52_week_year() {
        // 2024 is a 52-week ISO year.
        assert_eq!(WeekLabel::new(2024, 52).next(), WeekLabel::new(2025, 1));
    }

    #[test]
    fn week_label_honors_53_week_year() {
        // 2020 has 53 ISO weeks.
        assert_eq!(WeekLabel::new(2020, 52).next(), WeekLabel::new(2020, 53));
        assert_eq!(WeekLabel::new(2020, 53).next(), WeekLabel::new(2021, 1));
    }

    #[test]
    fn week_label_display() {
        assert_eq!(WeekLabel::new(2024, 3).to_string(), "2024-W03");
    }
}
