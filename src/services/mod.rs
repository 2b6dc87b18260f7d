pub mod pipeline;
pub mod time_series;

pub use pipeline::{AlphaVantageSource, PostgresStore, QuoteSource, QuoteStore, StockPipeline};
pub use time_series::{ParsedSeries, parse_time_series};
