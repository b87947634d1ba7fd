pub mod address;
pub mod time;

pub use address::{is_valid_address, normalize_address};
pub use time::{utc_date_key, utc_datetime_label};
