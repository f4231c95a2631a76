use finreport_core::{QuotePoint, QuoteSeries};

use super::date;

const DAYS: [&str; 8] = [
    "2024-01-02",
    "2024-01-03",
    "2024-01-04",
    "2024-01-05",
    "2024-01-08",
    "2024-01-09",
    "2024-01-10",
    "2024-01-11",
];

pub fn by_symbol(s: &str) -> Option<QuoteSeries> {
    match s {
        "AAPL" => build(&[
            185.64, 184.25, 181.91, 181.18, 185.56, 185.14, 186.19, 185.59,
        ]),
        "MSFT" => build(&[
            370.87, 370.60, 367.94, 367.75, 374.69, 375.79, 382.77, 384.63,
        ]),
        "TSLA" => build(&[
            248.42, 238.45, 237.93, 237.49, 240.45, 234.96, 233.94, 227.22,
        ]),
        _ => None,
    }
}

fn build(closes: &[f64; 8]) -> Option<QuoteSeries> {
    let points = DAYS
        .iter()
        .zip(closes)
        .map(|(d, &price)| date(d).map(|date| QuotePoint::new(date, price)))
        .collect::<Option<Vec<_>>>()?;
    QuoteSeries::new(points).ok()
}
