//! Rule-based line recognizers for statement text.

pub mod classifier;
pub mod numeric;
pub mod patterns;
pub mod transaction;

pub use classifier::{classify, is_boilerplate, starts_with_date, LineClass};
pub use numeric::normalize_amount;
pub use patterns::LinePattern;
pub use transaction::{TransactionFields, TransactionLineParser};
