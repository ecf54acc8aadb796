mod dates;
mod errors;
mod money;
mod status;

pub use dates::{deserialize_optional_date, parse_date};
pub use errors::DateError;
pub use money::{accumulate, checked_product, or_zero, safe_divide, sum_or_zero};
pub use status::LoanStatus;

pub type LoanNumber = u32;
pub type ExpenseId = u32;
