pub mod av;
pub mod av_dto;
pub mod utils;

pub use av::{build_client, check_response, get_intraday};
pub use av_dto::{AvIntradayBarDto, AvNumber};
