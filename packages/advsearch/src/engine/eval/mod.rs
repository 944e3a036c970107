pub mod compare;
pub mod dates;
pub mod filter;

pub use compare::{locale_compare, SortKey};
pub use dates::{calendar_day, parse_timestamp, value_timestamp};
pub use filter::{matches, CompiledFilter, Criterion, OrderOp, TextOp};
