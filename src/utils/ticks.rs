use chrono::{DateTime, Utc};

use crate::types::Tick;

/// Every n-th tick carries a label; with weekly spacing this is about once a quarter.
pub const LABEL_EVERY: usize = 13;

/// Format used for tick labels.
pub const LABEL_FORMAT: &str = "%Y-%m-%d";

/// Evenly spaced ticks across `[min, max]`, one per `width`.
///
/// Produces `floor((max - min) / width)` ticks starting at `min`. Ticks whose
/// index is a multiple of [`LABEL_EVERY`] are labeled with their date. An empty
/// or inverted range, or a non-positive width, yields no ticks.
pub fn generate_ticks(min: f64, max: f64, width: f64) -> Vec<Tick> {
    if !(min.is_finite() && max.is_finite() && width.is_finite()) || width <= 0.0 || max <= min {
        return Vec::new();
    }

    let count = ((max - min) / width).floor() as usize;
    (0..count)
        .map(|i| {
            let value = min + width * i as f64;
            let label = (i % LABEL_EVERY == 0).then(|| tick_label(value));
            Tick { value, label }
        })
        .collect()
}

/// Date of an axis position given in Unix seconds.
pub fn tick_label(value: f64) -> String {
    DateTime::<Utc>::from_timestamp(value.floor() as i64, 0)
        .map(|dt| dt.format(LABEL_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BUCKET_WIDTH_SECS;
    use pretty_assertions::assert_eq;

    const W: f64 = BUCKET_WIDTH_SECS as f64;

    #[test]
    fn test_tick_count_and_spacing() {
        let min = 1_000.0 * W;
        let max = min + 40.5 * W;

        let ticks = generate_ticks(min, max, W);

        assert_eq!(ticks.len(), 40);
        for (i, pair) in ticks.windows(2).enumerate() {
            assert_eq!(pair[1].value - pair[0].value, W, "gap after tick {}", i);
        }
        assert_eq!(ticks[0].value, min);
    }

    #[test]
    fn test_every_thirteenth_tick_is_labeled() {
        let ticks = generate_ticks(0.0, 30.0 * W, W);

        let labeled: Vec<usize> = ticks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.label.is_some())
            .map(|(i, _)| i)
            .collect();

        assert_eq!(labeled, vec![0, 13, 26]);
        assert_eq!(ticks[0].label.as_deref(), Some("1970-01-01"));
        assert_eq!(ticks[13].label.as_deref(), Some("1970-04-02"));
    }

    #[test]
    fn test_degenerate_ranges() {
        assert!(generate_ticks(5.0 * W, 5.0 * W, W).is_empty());
        assert!(generate_ticks(5.0 * W, 4.0 * W, W).is_empty());
        assert!(generate_ticks(0.0, W - 1.0, W).is_empty());
        assert!(generate_ticks(0.0, 10.0 * W, 0.0).is_empty());
        assert!(generate_ticks(f64::NAN, 10.0 * W, W).is_empty());
        assert_eq!(generate_ticks(0.0, W, W).len(), 1);
    }

    #[test]
    fn test_ticks_do_not_depend_on_data_alignment() {
        let ticks = generate_ticks(12_345.0, 12_345.0 + 3.0 * W, W);
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![12_345.0, 12_345.0 + W, 12_345.0 + 2.0 * W]);
    }
}
