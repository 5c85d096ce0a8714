use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::types::{Bucket, WeeklySeries, BUCKET_WIDTH_SECS};

/// Start of the epoch-aligned bucket containing `seconds`.
///
/// Buckets are aligned to Unix time zero, not to calendar weeks, so the same
/// instant lands in the same bucket regardless of timezone.
pub fn bucket_start(seconds: i64) -> i64 {
    seconds.div_euclid(BUCKET_WIDTH_SECS) * BUCKET_WIDTH_SECS
}

/// Count commits per week, ignoring any timestamp later than `now`.
///
/// Weeks without commits are left out.
pub fn aggregate_weekly(commits: &[DateTime<Utc>], now: DateTime<Utc>) -> WeeklySeries {
    let mut counts: BTreeMap<i64, u64> = BTreeMap::new();

    for commit in commits.iter().filter(|t| **t <= now) {
        *counts.entry(bucket_start(commit.timestamp())).or_insert(0) += 1;
    }

    let max_count = counts.values().copied().max().unwrap_or(0);
    let buckets = counts
        .into_iter()
        .map(|(start, count)| Bucket { start, count })
        .collect();

    WeeklySeries { buckets, max_count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const W: i64 = BUCKET_WIDTH_SECS;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(seconds, 0).unwrap()
    }

    fn far_future() -> DateTime<Utc> {
        at(4_000_000_000)
    }

    #[test]
    fn test_basic_aggregation() {
        let commits = vec![at(0), at(86_400), at(W), at(W + 3_600)];

        let result = aggregate_weekly(&commits, far_future());

        assert_eq!(
            result.buckets,
            vec![Bucket { start: 0, count: 2 }, Bucket { start: W, count: 2 }]
        );
        assert_eq!(result.max_count, 2);
    }

    #[test]
    fn test_empty_data() {
        let result = aggregate_weekly(&[], far_future());
        assert!(result.buckets.is_empty());
        assert_eq!(result.max_count, 0);
        assert_eq!(result.span(), None);
    }

    #[test]
    fn test_future_commits_are_excluded() {
        let now = at(10 * W);
        let commits = vec![
            at(W),
            at(10 * W),
            at(10 * W + 1),
            at(10 * W + 2),
            at(10 * W + 3),
        ];

        let result = aggregate_weekly(&commits, now);

        assert_eq!(
            result.buckets,
            vec![Bucket { start: W, count: 1 }, Bucket { start: 10 * W, count: 1 }]
        );
        assert_eq!(result.max_count, 1);
    }

    #[test]
    fn test_sparse_and_sorted() {
        let commits = vec![at(50 * W + 5), at(3 * W), at(50 * W), at(3 * W + 10)];

        let result = aggregate_weekly(&commits, far_future());

        assert_eq!(
            result.buckets,
            vec![
                Bucket { start: 3 * W, count: 2 },
                Bucket { start: 50 * W, count: 2 },
            ]
        );
        assert_eq!(result.span(), Some((3 * W, 50 * W)));
    }

    #[test]
    fn test_bucket_alignment() {
        for seconds in [0, 1, W - 1, W, 1_700_000_123, -1, -W, -W - 1] {
            let start = bucket_start(seconds);
            assert_eq!(start % W, 0, "start {} not aligned", start);
            assert!(start <= seconds && seconds < start + W);
        }
        assert_eq!(bucket_start(-1), -W);
        assert_eq!(bucket_start(1_700_000_123), bucket_start(bucket_start(1_700_000_123) + W - 1));
    }
}
