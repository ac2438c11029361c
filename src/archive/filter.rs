//! Inclusive date-window filtering of episodes.

use chrono::{DateTime, Utc};

use crate::feed::Episode;

/// Keeps episodes whose publish instant falls within `[start, end]`.
///
/// An unset bound is unbounded on that side. Relative episode order is
/// preserved.
#[must_use]
pub fn filter_by_date(
    episodes: &[Episode],
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Vec<Episode> {
    episodes
        .iter()
        .filter(|episode| {
            start.is_none_or(|bound| episode.published_at >= bound)
                && end.is_none_or(|bound| episode.published_at <= bound)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use url::Url;

    use super::*;

    fn episode_on(title: &str, y: i32, mo: u32, d: u32) -> Episode {
        Episode {
            title: title.to_string(),
            published_at: Utc.with_ymd_and_hms(y, mo, d, 12, 0, 0).unwrap(),
            media_url: Url::parse("https://e.com/a.mp3").unwrap(),
            show_title: "My Show".to_string(),
        }
    }

    fn bound(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }

    #[test]
    fn test_filter_window_selects_middle_episode() {
        // 2020-01-01 / 2021-06-15 / 2022-12-31, window = calendar year 2021
        let episodes = [
            episode_on("a", 2020, 1, 1),
            episode_on("b", 2021, 6, 15),
            episode_on("c", 2022, 12, 31),
        ];
        let filtered = filter_by_date(
            &episodes,
            bound(2021, 1, 1, 0, 0, 0),
            bound(2021, 12, 31, 23, 59, 59),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "b");
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let episodes = [episode_on("edge", 2021, 6, 15)];
        let exact = episodes[0].published_at;

        let filtered = filter_by_date(&episodes, Some(exact), Some(exact));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_filter_unset_bounds_keep_everything() {
        let episodes = [
            episode_on("a", 2020, 1, 1),
            episode_on("b", 2021, 6, 15),
            episode_on("c", 2022, 12, 31),
        ];
        assert_eq!(filter_by_date(&episodes, None, None).len(), 3);
    }

    #[test]
    fn test_filter_start_only() {
        let episodes = [episode_on("a", 2020, 1, 1), episode_on("b", 2021, 6, 15)];
        let filtered = filter_by_date(&episodes, bound(2021, 1, 1, 0, 0, 0), None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "b");
    }

    #[test]
    fn test_filter_end_only() {
        let episodes = [episode_on("a", 2020, 1, 1), episode_on("b", 2021, 6, 15)];
        let filtered = filter_by_date(&episodes, None, bound(2020, 12, 31, 23, 59, 59));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "a");
    }

    #[test]
    fn test_filter_preserves_order() {
        let episodes = [
            episode_on("a", 2020, 1, 1),
            episode_on("b", 2020, 2, 1),
            episode_on("c", 2020, 3, 1),
        ];
        let filtered = filter_by_date(&episodes, None, None);
        let titles: Vec<&str> = filtered.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);
    }

    #[test]
    fn test_filter_can_empty_the_list() {
        let episodes = [episode_on("a", 2020, 1, 1)];
        let filtered = filter_by_date(
            &episodes,
            bound(2023, 1, 1, 0, 0, 0),
            bound(2023, 12, 31, 0, 0, 0),
        );
        assert!(filtered.is_empty());
    }
}
