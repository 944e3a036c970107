mod operator;
mod predicate;

pub use operator::{
    needs_value_input, operators_for_type, FilterOperator, Operator, BOOLEAN_OPERATORS,
    DATE_OPERATORS, NUMBER_OPERATORS, STRING_OPERATORS,
};
pub use predicate::{split_range, Combinator, SearchFilter};
