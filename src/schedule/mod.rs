pub mod clock;
pub mod working_day;

pub use clock::{Clock, FixedClock, SystemClock};
pub use working_day::{is_duty_day, next_working_day, next_working_day_in, parse_timezone};
