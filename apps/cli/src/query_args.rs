use advsearch::{Combinator, SearchFilter, SearchQuery, SortOrder};
use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Query inputs shared by `search` and `export`. Flags override the values
/// read from `--query`.
#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    /// JSON query file, or `-` for stdin
    #[arg(short, long)]
    pub query: Option<PathBuf>,

    /// Free-text search across all fields
    #[arg(short, long)]
    pub text: Option<String>,

    /// Filter as field:operator[:value]; repeatable
    #[arg(short, long = "filter", value_parser = parse_filter)]
    pub filters: Vec<SearchFilter>,

    /// Match any filter instead of all of them
    #[arg(long)]
    pub or: bool,

    #[arg(long)]
    pub page: Option<usize>,

    #[arg(long)]
    pub page_size: Option<usize>,

    #[arg(long)]
    pub sort_field: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

impl QueryArgs {
    pub fn build(&self) -> Result<SearchQuery> {
        let mut query = match &self.query {
            Some(path) => read_query(path)?,
            None => SearchQuery::default(),
        };

        if let Some(text) = &self.text {
            query.text = text.clone();
        }
        query.filters.extend(self.filters.iter().cloned());
        if self.or {
            query.combinator = Combinator::Or;
        }
        if let Some(page) = self.page {
            query.page = page;
        }
        if let Some(page_size) = self.page_size {
            query.page_size = page_size;
        }
        if let Some(field) = &self.sort_field {
            query.sort_field = field.as_str().into();
        }
        if self.desc {
            query.sort_order = SortOrder::Desc;
        }
        Ok(query)
    }
}

fn read_query(path: &Path) -> Result<SearchQuery> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read query from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read query {}", path.display()))?
    };
    serde_json::from_str(&json).context("Malformed search query")
}

/// Parses `field:operator[:value]`. The value keeps any further colons.
pub fn parse_filter(raw: &str) -> Result<SearchFilter> {
    let mut parts = raw.splitn(3, ':');
    let field = parts.next().unwrap_or_default().trim();
    let operator = parts.next().unwrap_or_default().trim();
    let value = parts.next().unwrap_or_default();

    if field.is_empty() || operator.is_empty() {
        bail!("expected field:operator[:value], got '{}'", raw);
    }
    Ok(SearchFilter::new(field, operator, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use advsearch::FieldValue;

    #[test]
    fn test_parse_filter_with_value() {
        let f = parse_filter("department:equals:Engineering").unwrap();
        assert_eq!(f.field, "department");
        assert_eq!(f.operator, "equals");
        assert_eq!(f.value, Some(FieldValue::from("Engineering")));
    }

    #[test]
    fn test_parse_filter_keeps_colons_in_value() {
        let f = parse_filter("createdAt:after:2022-01-01T10:00:00Z").unwrap();
        assert_eq!(f.value, Some(FieldValue::from("2022-01-01T10:00:00Z")));
    }

    #[test]
    fn test_parse_filter_without_value() {
        let f = parse_filter("email:is_empty").unwrap();
        assert_eq!(f.operator, "is_empty");
        assert_eq!(f.value, Some(FieldValue::from("")));
    }

    #[test]
    fn test_parse_filter_rejects_bare_field() {
        assert!(parse_filter("email").is_err());
        assert!(parse_filter(":equals:x").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = QueryArgs {
            text: Some("dev".into()),
            filters: vec![parse_filter("age:less_than:40").unwrap()],
            or: true,
            page: Some(2),
            page_size: Some(5),
            sort_field: Some("salary".into()),
            desc: true,
            ..Default::default()
        };
        let query = args.build().unwrap();
        assert_eq!(query.text, "dev");
        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.combinator, Combinator::Or);
        assert_eq!((query.page, query.page_size), (2, 5));
        assert_eq!(query.sort_field, "salary");
        assert_eq!(query.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_query_file_is_the_base() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), r#"{"text": "ann", "pageSize": 3}"#).unwrap();
        let args = QueryArgs {
            query: Some(file.path().to_path_buf()),
            page: Some(4),
            ..Default::default()
        };
        let query = args.build().unwrap();
        assert_eq!(query.text, "ann");
        assert_eq!(query.page_size, 3);
        assert_eq!(query.page, 4);
    }
}
