use finreport_core::NewsItem;

use super::date;

pub fn by_symbol(s: &str) -> Option<Vec<NewsItem>> {
    let rows: &[(&str, &str, &str)] = match s {
        "AAPL" => &[
            // Saturday: no trading day to attach to.
            ("2024-01-06", "Apple readies Vision Pro launch", "https://news.example/aapl/4"),
            ("2024-01-04", "Barclays downgrades Apple to underweight", "https://news.example/aapl/3"),
            ("2024-01-02", "Apple falls on first trading day of 2024", "https://news.example/aapl/2"),
            ("2024-01-02", "Analysts trim iPhone demand forecasts", "https://news.example/aapl/1"),
        ],
        "MSFT" => &[
            ("2024-01-11", "Microsoft briefly passes Apple in market value", "https://news.example/msft/2"),
            ("2024-01-08", "Microsoft expands Copilot availability", "https://news.example/msft/1"),
        ],
        "TSLA" => &[
            ("2024-01-03", "Tesla loses EV sales crown to BYD", "https://news.example/tsla/1"),
        ],
        _ => return None,
    };
    rows.iter()
        .map(|&(d, title, link)| date(d).map(|d| NewsItem::new(d, title, link)))
        .collect()
}
