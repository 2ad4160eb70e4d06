use serde::Serialize;

use crate::db::Thought;

/// One point on the mood trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Chronological sequence number, 0-based.
    pub index: usize,
    /// `Mood::ordinal()`: 0 dissatisfied, 1 neutral, 2 happy.
    pub mood: u8,
    pub timestamp_ms: i64,
}

/// Project thoughts onto the chart axis.
///
/// Input order is irrelevant: the display list is newest-first while storage
/// hands out oldest-first, so points are always re-sorted by timestamp and
/// re-indexed afterwards. Equal timestamps keep their input order.
pub fn mood_trend<'a, I>(thoughts: I) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a Thought>,
{
    let mut points: Vec<TrendPoint> = thoughts
        .into_iter()
        .map(|thought| TrendPoint {
            index: 0,
            mood: thought.mood.ordinal(),
            timestamp_ms: thought.timestamp_ms(),
        })
        .collect();

    points.sort_by_key(|point| point.timestamp_ms);

    for (index, point) in points.iter_mut().enumerate() {
        point.index = index;
    }

    points
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rand::seq::SliceRandom;

    use super::*;
    use crate::db::Mood;

    fn thought(id: i64, secs: i64, mood: Mood) -> Thought {
        Thought {
            id,
            game_id: 1,
            content: format!("thought {id}"),
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            mood,
        }
    }

    #[test]
    fn sorts_and_reindexes_unsorted_input() {
        let thoughts = vec![
            thought(1, 3, Mood::Positive),
            thought(2, 1, Mood::Negative),
            thought(3, 2, Mood::Neutral),
        ];

        assert_eq!(
            mood_trend(&thoughts),
            vec![
                TrendPoint { index: 0, mood: 0, timestamp_ms: 1_000 },
                TrendPoint { index: 1, mood: 1, timestamp_ms: 2_000 },
                TrendPoint { index: 2, mood: 2, timestamp_ms: 3_000 },
            ]
        );
    }

    #[test]
    fn handles_empty_and_single_inputs() {
        assert!(mood_trend(&[]).is_empty());

        let single = vec![thought(9, 42, Mood::Neutral)];
        assert_eq!(
            mood_trend(&single),
            vec![TrendPoint { index: 0, mood: 1, timestamp_ms: 42_000 }]
        );
    }

    #[test]
    fn ties_keep_input_order() {
        let thoughts = vec![
            thought(1, 5, Mood::Positive),
            thought(2, 5, Mood::Negative),
            thought(3, 1, Mood::Neutral),
        ];

        let moods: Vec<u8> = mood_trend(&thoughts).iter().map(|p| p.mood).collect();
        assert_eq!(moods, vec![1, 2, 0]);
    }

    #[test]
    fn any_permutation_yields_a_monotone_gapless_series() {
        let mut rng = rand::thread_rng();
        let mut thoughts: Vec<Thought> = (0..50)
            .map(|id| {
                let mood = Mood::ALL[(id % 3) as usize];
                thought(id, (id * 7) % 23, mood)
            })
            .collect();

        for _ in 0..20 {
            thoughts.shuffle(&mut rng);
            let points = mood_trend(&thoughts);

            assert_eq!(points.len(), thoughts.len());
            assert!(points.windows(2).all(|w| w[0].timestamp_ms <= w[1].timestamp_ms));
            let indices: Vec<usize> = points.iter().map(|p| p.index).collect();
            assert_eq!(indices, (0..thoughts.len()).collect::<Vec<_>>());
        }
    }
}
