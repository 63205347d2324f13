//! Per-value cleaning functions.
//!
//! Every function here is pure: the result depends only on the raw value
//! and the policy passed in, never on other rows.
//!
//! - **date**: free-text dates to calendar dates
//! - **numeric**: ages, strict floats and coordinates
//! - **binary**: yes/no style flags to 0/1
//! - **recode**: surface forms to a controlled vocabulary
//! - **interval**: whole days between two dates

pub mod binary;
pub mod date;
pub mod interval;
pub mod numeric;
pub mod recode;

pub use binary::clean_bin;
pub use date::{clean_date, parse_date};
pub use interval::days_between;
pub use numeric::{MAX_AGE_YEARS, clean_age, clean_coordinate, clean_float};
pub use recode::{recode, recode_value, recode_value_in_place};
