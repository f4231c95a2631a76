use finreport_core::MetricMap;

pub fn estimates_by_symbol(s: &str) -> Option<MetricMap> {
    let rows: &[(&str, &str)] = match s {
        "AAPL" => &[
            ("Price", "185.59"),
            ("consensus", "Buy"),
            ("targetHigh", "250.00"),
            ("revenueAvg", "408.9B"),
            ("numAnalystsEps", "38"),
        ],
        "MSFT" => &[
            ("Price", "384.63"),
            ("consensus", "Strong Buy"),
            ("targetHigh", "450.00"),
            ("revenueAvg", "276.6B"),
            ("numAnalystsEps", "42"),
        ],
        "TSLA" => &[
            ("Price", "227.22"),
            ("consensus", "Hold"),
            ("targetHigh", "380.00"),
            ("numAnalystsEps", "35"),
        ],
        _ => return None,
    };
    Some(to_map(rows))
}

pub fn fundamentals_by_symbol(s: &str) -> Option<MetricMap> {
    let rows: &[(&str, &str)] = match s {
        "AAPL" => &[
            ("Price", "185.92"),
            ("Market Cap", "2887.18B"),
            ("Perf Year", "39.47%"),
            ("P/E", "30.17"),
            ("Forward P/E", "27.85"),
            ("Target Price", "201.57"),
            ("EPS next Y", "8.61%"),
            ("ROE", "156.08%"),
            ("Debt/Eq", "1.81"),
            ("Profit Margin", "25.31%"),
            ("RSI (14)", "46.35"),
        ],
        "MSFT" => &[
            ("Price", "384.79"),
            ("Market Cap", "2859.91B"),
            ("Perf Year", "61.62%"),
            ("P/E", "37.30"),
            ("Forward P/E", "30.98"),
            ("Target Price", "416.01"),
            ("EPS next Y", "14.43%"),
            ("ROE", "39.12%"),
            ("Debt/Eq", "0.43"),
            ("Profit Margin", "35.31%"),
            ("RSI (14)", "66.04"),
        ],
        "TSLA" => &[
            ("Price", "227.40"),
            ("Market Cap", "722.94B"),
            ("P/E", "70.61"),
            ("Target Price", "230.23"),
            ("Debt/Eq", "0.08"),
            ("RSI (14)", "38.79"),
        ],
        _ => return None,
    };
    Some(to_map(rows))
}

fn to_map(rows: &[(&str, &str)]) -> MetricMap {
    rows.iter()
        .map(|&(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
