use chrono::{DateTime, Utc};
use plotters::coord::ranged1d::{
    KeyPointHint, KeyPointWeight, NoDefaultFormatting, Ranged, ValueFormatter,
};
use std::ops::Range;

use crate::types::{Tick, WeeklySeries, BUCKET_WIDTH_SECS};
use crate::utils::{bucket_start, generate_ticks};

/// Time axis in Unix seconds whose key points come from [`generate_ticks`].
///
/// Every tick is a light grid line; labeled ticks are the bold ones and the
/// only ones that get text.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<Tick>,
}

impl TimeAxis {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            ticks: generate_ticks(min, max, BUCKET_WIDTH_SECS as f64),
        }
    }

    /// Axis spanning the first to the last bucket of `series`.
    ///
    /// A single bucket is widened to one bucket width; with no data the axis
    /// covers the week containing `now`.
    pub fn for_series(series: &WeeklySeries, now: DateTime<Utc>) -> Self {
        let (first, last) = series.span().unwrap_or_else(|| {
            let start = bucket_start(now.timestamp());
            (start, start)
        });
        let last = if last > first {
            last
        } else {
            first + BUCKET_WIDTH_SECS
        };
        Self::new(first as f64, last as f64)
    }

    pub fn labeled(&self) -> impl Iterator<Item = &Tick> {
        self.ticks.iter().filter(|t| t.label.is_some())
    }
}

impl Ranged for TimeAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return limit.0;
        }
        let ratio = (value - self.min) / span;
        limit.0 + (ratio * f64::from(limit.1 - limit.0)).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        match hint.weight() {
            KeyPointWeight::Bold => self.labeled().map(|t| t.value).collect(),
            KeyPointWeight::Any => self.ticks.iter().map(|t| t.value).collect(),
        }
    }

    fn range(&self) -> Range<f64> {
        self.min..self.max
    }
}

impl ValueFormatter<f64> for TimeAxis {
    fn format_ext(&self, value: &f64) -> String {
        self.ticks
            .iter()
            .find(|t| t.value == *value)
            .and_then(|t| t.label.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bucket;
    use plotters::coord::ranged1d::{BoldPoints, LightPoints};
    use pretty_assertions::assert_eq;

    const W: i64 = BUCKET_WIDTH_SECS;

    fn series(starts: &[i64]) -> WeeklySeries {
        WeeklySeries {
            buckets: starts.iter().map(|s| Bucket { start: *s, count: 1 }).collect(),
            max_count: 1,
        }
    }

    #[test]
    fn test_axis_spans_buckets() {
        let axis = TimeAxis::for_series(&series(&[10 * W, 40 * W]), Utc::now());
        assert_eq!(axis.range(), (10 * W) as f64..(40 * W) as f64);
        assert_eq!(axis.ticks.len(), 30);
        assert_eq!(axis.labeled().count(), 3);
    }

    #[test]
    fn test_single_bucket_is_widened() {
        let axis = TimeAxis::for_series(&series(&[7 * W]), Utc::now());
        assert_eq!(axis.range(), (7 * W) as f64..(8 * W) as f64);
        assert_eq!(axis.ticks.len(), 1);
    }

    #[test]
    fn test_empty_series_uses_current_week() {
        let now = DateTime::<Utc>::from_timestamp(100 * W + 500, 0).unwrap();
        let axis = TimeAxis::for_series(&WeeklySeries::default(), now);
        assert_eq!(axis.range(), (100 * W) as f64..(101 * W) as f64);
    }

    #[test]
    fn test_key_points_follow_labels() {
        let axis = TimeAxis::new(0.0, (27 * W) as f64);

        let bold = axis.key_points(BoldPoints(5));
        let light = axis.key_points(LightPoints::new(5, 50));

        assert_eq!(bold, vec![0.0, (13 * W) as f64, (26 * W) as f64]);
        assert_eq!(light.len(), 27);
        assert_eq!(axis.format_ext(&((13 * W) as f64)), "1970-04-02");
        assert_eq!(axis.format_ext(&(W as f64)), "");
    }

    #[test]
    fn test_map_is_linear_and_safe() {
        let axis = TimeAxis::new(0.0, 100.0);
        assert_eq!(axis.map(&0.0, (0, 1000)), 0);
        assert_eq!(axis.map(&50.0, (0, 1000)), 500);
        assert_eq!(axis.map(&100.0, (0, 1000)), 1000);

        let flat = TimeAxis {
            min: 5.0,
            max: 5.0,
            ticks: Vec::new(),
        };
        assert_eq!(flat.map(&5.0, (10, 20)), 10);
    }
}
