use std::path::Path;

use tracing::{info, warn};

use crate::parse;
use crate::text;
use crate::types::{BrandRule, CatalogError, Classification};

const COL_TOPIC: &str = "Topic";
const COL_SUB_TOPIC: &str = "Sub topic";
const COL_QUERY_NAME: &str = "Query name";
const COL_INTERNAL_ID: &str = "Internal ID";
const COL_QUERY: &str = "Query";

/// The ordered, immutable collection of compiled brand rules.
///
/// Order comes from the source CSV and decides tie-breaks: the first rule to
/// match wins. Built once at startup and only replaced wholesale on reload.
#[derive(Debug, Default)]
pub struct Catalog {
    rules: Vec<BrandRule>,
    skipped: usize,
}

impl Catalog {
    /// Read and compile a catalog CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or the header row
    /// is missing a required column. Individual rows that fail to parse are
    /// logged and excluded, not fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_csv(&input)
    }

    /// Compile a catalog from CSV text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the header row is absent or incomplete.
    pub fn from_csv(input: &str) -> Result<Self, CatalogError> {
        let mut records = read_records(input).into_iter();
        let header = records.next().ok_or(CatalogError::EmptyCatalog)?;

        let topic_col = column(&header, COL_TOPIC)?;
        let sub_topic_col = column(&header, COL_SUB_TOPIC)?;
        let query_name_col = column(&header, COL_QUERY_NAME)?;
        let internal_id_col = column(&header, COL_INTERNAL_ID)?;
        let query_col = column(&header, COL_QUERY)?;

        let mut rules = Vec::new();
        let mut skipped = 0;
        for (index, record) in records.enumerate() {
            if record.first().is_none_or(|first| first.trim().is_empty()) {
                continue;
            }
            let field = |col: usize| record.get(col).map_or("", |v| v.trim());
            let source = field(query_col);
            match parse::parse(source) {
                Ok(expr) => rules.push(BrandRule {
                    topic: field(topic_col).to_owned(),
                    sub_topic: field(sub_topic_col).to_owned(),
                    query_name: field(query_name_col).to_owned(),
                    internal_id: field(internal_id_col).to_owned(),
                    source: source.to_owned(),
                    expr,
                }),
                Err(err) => {
                    skipped += 1;
                    warn!(row = index + 2, error = %err, query = source, "skipping unparseable brand query");
                }
            }
        }

        info!(rules = rules.len(), skipped, "compiled brand rule catalog");
        Ok(Self { rules, skipped })
    }

    /// Build a catalog directly from compiled rules, preserving order.
    #[must_use]
    pub fn from_rules(rules: Vec<BrandRule>) -> Self {
        Self { rules, skipped: 0 }
    }

    /// Classify article text against the catalog, returning the first match
    /// in catalog order. Empty or whitespace-only input never matches.
    #[must_use]
    pub fn classify(&self, article: &str) -> Option<Classification> {
        if article.trim().is_empty() {
            return None;
        }
        let tokens = text::tokenize(article);
        self.rules
            .iter()
            .find(|rule| rule.evaluate(&tokens).matched)
            .map(BrandRule::classification)
    }

    #[must_use]
    pub fn rules(&self) -> &[BrandRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// How many rows were excluded because their query failed to parse.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

fn column(header: &[String], name: &'static str) -> Result<usize, CatalogError> {
    header
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(CatalogError::MissingColumn { column: name })
}

/// Character-at-a-time CSV reader.
///
/// Fields may be double-quoted with `""` escapes and may contain newlines, so
/// the input is never split on line endings first. Handles CRLF and LF.
fn read_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(ch),
            }
            continue;
        }
        match ch {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                if !(record.len() == 1 && record[0].is_empty()) {
                    records.push(std::mem::take(&mut record));
                }
                record.clear();
            }
            _ => field.push(ch),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}
