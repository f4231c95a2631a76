use std::collections::HashMap;

use chrono::NaiveDate;
use finreport_types::{AnnotatedPoint, NewsItem, QuoteSeries};

fn index_by_date(quotes: &QuoteSeries) -> HashMap<NaiveDate, usize> {
    quotes
        .iter()
        .enumerate()
        .map(|(i, p)| (p.date, i))
        .collect()
}

/// Attach news items to the trading days they were published on.
///
/// - Matching is exact calendar-date equality; there is no nearest-day fallback.
/// - Output follows quote order and only contains days with at least one item.
/// - Items sharing a date keep their input order; duplicates are all attached.
/// - Items dated on a non-trading day are left out (see [`unmatched`]).
///
/// Runs in O(n + m) for n quotes and m news items.
#[must_use]
pub fn correlate(quotes: &QuoteSeries, news: &[NewsItem]) -> Vec<AnnotatedPoint> {
    if quotes.is_empty() || news.is_empty() {
        return Vec::new();
    }
    let index = index_by_date(quotes);
    let mut buckets: Vec<Vec<NewsItem>> = vec![Vec::new(); quotes.len()];
    for item in news {
        if let Some(&i) = index.get(&item.date) {
            buckets[i].push(item.clone());
        }
    }
    quotes
        .iter()
        .zip(buckets)
        .filter(|(_, items)| !items.is_empty())
        .map(|(point, items)| AnnotatedPoint {
            point: *point,
            news: items,
        })
        .collect()
}

/// News items whose date is not a trading day in `quotes`, in input order.
#[must_use]
pub fn unmatched<'a>(quotes: &QuoteSeries, news: &'a [NewsItem]) -> Vec<&'a NewsItem> {
    let index = index_by_date(quotes);
    news.iter()
        .filter(|item| !index.contains_key(&item.date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use finreport_types::QuotePoint;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(points: &[(NaiveDate, f64)]) -> QuoteSeries {
        QuoteSeries::new(
            points
                .iter()
                .map(|&(date, price)| QuotePoint::new(date, price))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn attaches_only_exact_date_matches() {
        let quotes = series(&[(d(2024, 1, 2), 100.0), (d(2024, 1, 3), 102.0)]);
        let news = vec![
            NewsItem::new(d(2024, 1, 2), "X", "u1"),
            NewsItem::new(d(2024, 1, 5), "Y", "u2"),
        ];

        let points = correlate(&quotes, &news);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].point, QuotePoint::new(d(2024, 1, 2), 100.0));
        let titles: Vec<&str> = points[0].news.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["X"]);

        let rest = unmatched(&quotes, &news);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].title, "Y");
        assert_eq!(news.len(), 2);
    }

    #[test]
    fn weekend_news_is_not_moved_to_a_neighbouring_day() {
        let quotes = series(&[(d(2024, 1, 5), 10.0), (d(2024, 1, 8), 11.0)]);
        let news = vec![NewsItem::new(d(2024, 1, 6), "Saturday", "u")];
        assert!(correlate(&quotes, &news).is_empty());
    }

    #[test]
    fn duplicate_dates_are_all_attached_in_input_order() {
        let quotes = series(&[(d(2024, 1, 2), 1.0), (d(2024, 1, 3), 2.0)]);
        let news = vec![
            NewsItem::new(d(2024, 1, 3), "late-a", "a"),
            NewsItem::new(d(2024, 1, 2), "early", "e"),
            NewsItem::new(d(2024, 1, 3), "late-b", "b"),
            NewsItem::new(d(2024, 1, 3), "late-a", "a"),
        ];
        let points = correlate(&quotes, &news);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].point.date, d(2024, 1, 2));
        let late: Vec<&str> = points[1].news.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(late, vec!["late-a", "late-b", "late-a"]);
    }

    #[test]
    fn empty_series_leaves_all_news_unmatched() {
        let quotes = QuoteSeries::default();
        let news = vec![NewsItem::new(d(2024, 1, 2), "X", "u1")];
        assert!(correlate(&quotes, &news).is_empty());
        assert_eq!(unmatched(&quotes, &news).len(), 1);
    }
}
