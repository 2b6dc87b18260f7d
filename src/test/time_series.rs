#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    use crate::services::time_series::{parse_entry, parse_time_series};

    const SERIES_KEY: &str = "Time Series (5min)";

    fn bar(open: &str, high: &str, low: &str, close: &str, volume: &str) -> Value {
        json!({
            "1. open": open,
            "2. high": high,
            "3. low": low,
            "4. close": close,
            "5. volume": volume,
        })
    }

    fn response(series: Value) -> Value {
        json!({
            "Meta Data": {
                "1. Information": "Intraday (5min) open, high, low, close prices and volume",
                "2. Symbol": "IBM",
            },
            SERIES_KEY: series,
        })
    }

    #[test]
    fn single_entry_becomes_one_record() {
        let data = response(json!({
            "2023-01-01 09:30:00": bar("1.0", "2.0", "0.5", "1.5", "100"),
        }));

        let parsed = parse_time_series(&data, "IBM", SERIES_KEY).unwrap();

        assert_eq!(*parsed.skipped(), 0);
        assert_eq!(parsed.records().len(), 1);

        let record = &parsed.records()[0];
        let expected_ts = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        assert_eq!(record.symbol(), "IBM");
        assert_eq!(*record.timestamp(), expected_ts);
        assert_eq!(*record.open(), dec!(1.0));
        assert_eq!(*record.high(), dec!(2.0));
        assert_eq!(*record.low(), dec!(0.5));
        assert_eq!(*record.close(), dec!(1.5));
        assert_eq!(*record.volume(), 100);
    }

    #[test]
    fn non_numeric_field_skips_only_that_entry() {
        let data = response(json!({
            "2023-01-01 09:30:00": bar("not-a-number", "2.0", "0.5", "1.5", "100"),
            "2023-01-01 09:35:00": bar("1.5", "2.5", "1.0", "2.0", "250"),
        }));

        let parsed = parse_time_series(&data, "IBM", SERIES_KEY).unwrap();

        assert_eq!(*parsed.skipped(), 1);
        assert_eq!(parsed.records().len(), 1);
        assert_eq!(*parsed.records()[0].volume(), 250);
    }

    #[test]
    fn bad_timestamps_are_skipped() {
        let data = response(json!({
            "2023-01-01T09:30:00": bar("1.0", "2.0", "0.5", "1.5", "100"),
            "2023-01-01 09:35": bar("1.0", "2.0", "0.5", "1.5", "100"),
            "2023-13-01 09:40:00": bar("1.0", "2.0", "0.5", "1.5", "100"),
            "2023-01-01 09:45:00": bar("1.0", "2.0", "0.5", "1.5", "100"),
        }));

        let parsed = parse_time_series(&data, "IBM", SERIES_KEY).unwrap();

        assert_eq!(*parsed.skipped(), 3);
        assert_eq!(parsed.records().len(), 1);
    }

    #[test]
    fn record_count_is_entries_minus_failures() {
        let data = response(json!({
            "2024-03-01 10:00:00": bar("10.1", "10.4", "10.0", "10.2", "1200"),
            "2024-03-01 10:05:00": bar("10.2", "10.5", "10.1", "10.3", "900"),
            "2024-03-01 10:10:00": bar("10.3", "x", "10.2", "10.4", "800"),
            "2024-03-01 10:15:00": bar("10.4", "10.6", "10.3", "10.5", "1.5"),
            "bogus": bar("10.5", "10.7", "10.4", "10.6", "700"),
            "2024-03-01 10:25:00": bar("10.6", "10.8", "10.5", "10.7", "650"),
        }));

        let parsed = parse_time_series(&data, "MSFT", SERIES_KEY).unwrap();

        assert_eq!(*parsed.skipped(), 3);
        assert_eq!(parsed.records().len(), 3);
        assert!(parsed.records().iter().all(|r| r.symbol() == "MSFT"));
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let data = response(json!({
            "2023-01-01 09:30:00": { "4. close": "1.25" },
        }));

        let parsed = parse_time_series(&data, "IBM", SERIES_KEY).unwrap();
        let record = &parsed.records()[0];

        assert_eq!(*record.open(), dec!(0));
        assert_eq!(*record.high(), dec!(0));
        assert_eq!(*record.low(), dec!(0));
        assert_eq!(*record.close(), dec!(1.25));
        assert_eq!(*record.volume(), 0);
    }

    #[test]
    fn json_numbers_are_accepted() {
        let values = json!({
            "1. open": 187.5,
            "2. high": 188,
            "3. low": "187.25",
            "4. close": 187.75,
            "5. volume": 4200,
        });

        let record = parse_entry("IBM", "2023-06-02 15:55:00", &values).unwrap();

        assert_eq!(*record.open(), dec!(187.5));
        assert_eq!(*record.high(), dec!(188));
        assert_eq!(*record.close(), dec!(187.75));
        assert_eq!(*record.volume(), 4200);
    }

    #[test]
    fn null_field_skips_the_entry() {
        let data = response(json!({
            "2023-01-01 09:30:00": {
                "1. open": null, "2. high": "2.0", "3. low": "0.5",
                "4. close": "1.5", "5. volume": "100"
            },
            "2023-01-01 09:35:00": {
                "1. open": "1.0", "2. high": "2.0", "3. low": "0.5",
                "4. close": "1.5", "5. volume": null
            },
            "2023-01-01 09:40:00": bar("1.0", "2.0", "0.5", "1.5", "100"),
        }));

        let parsed = parse_time_series(&data, "IBM", SERIES_KEY).unwrap();

        assert_eq!(*parsed.skipped(), 2);
        assert_eq!(parsed.records().len(), 1);
        assert_eq!(*parsed.records()[0].open(), dec!(1.0));
    }

    #[test]
    fn whole_float_volume_is_accepted() {
        let values = json!({
            "1. open": "1.0", "2. high": "2.0", "3. low": "0.5",
            "4. close": "1.5", "5. volume": 100.0
        });

        let record = parse_entry("IBM", "2023-01-01 09:30:00", &values).unwrap();
        assert_eq!(*record.volume(), 100);

        let fractional = json!({ "5. volume": 100.5 });
        assert!(parse_entry("IBM", "2023-01-01 09:30:00", &fractional).is_err());
    }

    #[test]
    fn non_object_entry_is_rejected() {
        assert!(parse_entry("IBM", "2023-01-01 09:30:00", &json!("1.0")).is_err());
        assert!(parse_entry("IBM", "2023-01-01 09:30:00", &json!({ "1. open": true })).is_err());
    }

    #[test]
    fn missing_or_empty_series_yields_none() {
        assert!(parse_time_series(&json!({}), "IBM", SERIES_KEY).is_none());
        assert!(parse_time_series(&response(json!({})), "IBM", SERIES_KEY).is_none());
        assert!(parse_time_series(&response(json!([])), "IBM", SERIES_KEY).is_none());
        assert!(
            parse_time_series(&json!({ "Note": "Thank you for using Alpha Vantage!" }), "IBM", SERIES_KEY)
                .is_none()
        );
    }

    #[test]
    fn series_key_follows_interval() {
        let data = json!({
            "Time Series (15min)": {
                "2023-01-01 09:30:00": bar("1.0", "2.0", "0.5", "1.5", "100"),
            }
        });

        assert!(parse_time_series(&data, "IBM", SERIES_KEY).is_none());
        assert_eq!(
            parse_time_series(&data, "IBM", "Time Series (15min)")
                .unwrap()
                .records()
                .len(),
            1
        );
    }
}
