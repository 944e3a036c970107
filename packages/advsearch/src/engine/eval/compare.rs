use crate::engine::catalog::FieldType;
use crate::engine::eval::dates::value_timestamp;
use crate::engine::types::FieldValue;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Base letters of `s`, lower-cased, with accents stripped.
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Dictionary-style string order. Base letters decide first, so `É` sorts
/// with `e`; accents break ties next, then lower-case goes before upper-case.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| b.cmp(a))
}

/// Sort position of one record's sort-field value.
///
/// Keys of different kinds order by kind; `Missing` (absent, null, NaN,
/// invalid date) sorts after every comparable value. Equal keys keep their
/// input order because the sort is stable.
#[derive(Clone, Debug, PartialEq)]
pub enum SortKey {
    Flag(bool),
    Number(f64),
    Instant(i64),
    Text(String),
    Missing,
}

impl SortKey {
    /// Dispatches on the declared field type; without one, on the runtime kind.
    pub fn of(value: Option<&FieldValue>, field_type: Option<FieldType>) -> Self {
        let value = match value {
            Some(v) if !v.is_null() => v,
            _ => return SortKey::Missing,
        };
        match field_type {
            Some(FieldType::String) => SortKey::Text(value.display()),
            Some(FieldType::Number) => number_key(value.to_number()),
            Some(FieldType::Date) => value_timestamp(value).map_or(SortKey::Missing, SortKey::Instant),
            Some(FieldType::Boolean) => SortKey::Flag(value.truthy()),
            Some(FieldType::Unknown) | None => match value {
                FieldValue::Bool(b) => SortKey::Flag(*b),
                FieldValue::Number(n) => number_key(*n),
                FieldValue::Str(s) | FieldValue::Date(s) => SortKey::Text(s.to_string()),
                FieldValue::Null => SortKey::Missing,
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Flag(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Instant(_) => 2,
            SortKey::Text(_) => 3,
            SortKey::Missing => 4,
        }
    }

    /// Ascending order; a total order over all keys.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Flag(a), SortKey::Flag(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => locale_compare(a, b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn number_key(n: f64) -> SortKey {
    if n.is_nan() {
        SortKey::Missing
    } else if n == 0.0 {
        // Keep -0 and 0 together.
        SortKey::Number(0.0)
    } else {
        SortKey::Number(n)
    }
}

#[cfg(test)]
mod compare_tests {
    use super::*;

    fn key(v: FieldValue, ty: Option<FieldType>) -> SortKey {
        SortKey::of(Some(&v), ty)
    }

    #[test]
    fn test_locale_compare_folds_case() {
        assert_eq!(locale_compare("alice", "Bob"), Ordering::Less);
        assert_eq!(locale_compare("Bob", "alice"), Ordering::Greater);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
        assert_eq!(locale_compare("ab", "abc"), Ordering::Less);
    }

    #[test]
    fn test_locale_compare_accents_sort_with_base_letter() {
        assert_eq!(locale_compare("Émile", "Zoe"), Ordering::Less);
        assert_eq!(locale_compare("Émile", "eve"), Ordering::Less);
        assert_eq!(locale_compare("e", "é"), Ordering::Less);
        assert_eq!(locale_compare("é", "É"), Ordering::Less);
        assert_eq!(locale_compare("Ångström", "angstrom"), Ordering::Greater);

        let mut names = vec!["Zoe", "Émile", "eve", "Ève"];
        names.sort_by(|a, b| locale_compare(a, b));
        assert_eq!(names, vec!["Émile", "eve", "Ève", "Zoe"]);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let nine = key(FieldValue::Number(9.0), Some(FieldType::Number));
        let ten = key(FieldValue::Number(10.0), Some(FieldType::Number));
        assert_eq!(nine.compare(&ten), Ordering::Less);

        let nine = key(FieldValue::Number(9.0), None);
        let ten = key(FieldValue::Number(10.0), None);
        assert_eq!(ten.compare(&nine), Ordering::Greater);

        let neg_zero = key(FieldValue::Number(-0.0), None);
        let zero = key(FieldValue::Number(0.0), None);
        assert_eq!(neg_zero.compare(&zero), Ordering::Equal);
    }

    #[test]
    fn test_declared_string_type_compares_display_form() {
        let nine = key(FieldValue::Number(9.0), Some(FieldType::String));
        let ten = key(FieldValue::Number(10.0), Some(FieldType::String));
        assert_eq!(nine.compare(&ten), Ordering::Greater);
    }

    #[test]
    fn test_dates_compare_by_instant() {
        let early = key(
            FieldValue::Date("2020-01-01T10:00:00+02:00".into()),
            Some(FieldType::Date),
        );
        let late = key(
            FieldValue::Date("2020-01-01T09:00:00Z".into()),
            Some(FieldType::Date),
        );
        assert_eq!(early.compare(&late), Ordering::Less);
    }

    #[test]
    fn test_booleans_false_first() {
        let t = key(FieldValue::Bool(true), Some(FieldType::Boolean));
        let f = key(FieldValue::Bool(false), Some(FieldType::Boolean));
        assert_eq!(f.compare(&t), Ordering::Less);
    }

    #[test]
    fn test_incomparable_values_sort_last() {
        let one = key(FieldValue::Number(1.0), Some(FieldType::Number));
        let nan = key(FieldValue::Number(f64::NAN), Some(FieldType::Number));
        let null = key(FieldValue::Null, Some(FieldType::Number));
        let absent = SortKey::of(None, Some(FieldType::Number));
        let bad_date = key(FieldValue::Date("soon".into()), Some(FieldType::Date));

        assert_eq!(nan, SortKey::Missing);
        assert_eq!(null, SortKey::Missing);
        assert_eq!(bad_date, SortKey::Missing);
        assert_eq!(one.compare(&absent), Ordering::Less);
        assert_eq!(absent.compare(&nan), Ordering::Equal);
    }

    #[test]
    fn test_mixed_runtime_kinds_order_by_kind() {
        let flag = key(FieldValue::Bool(true), None);
        let num = key(FieldValue::Number(5.0), None);
        let text = key(FieldValue::from("5"), None);
        assert_eq!(flag.compare(&num), Ordering::Less);
        assert_eq!(num.compare(&text), Ordering::Less);
        assert_eq!(text.compare(&flag), Ordering::Greater);
    }
}
