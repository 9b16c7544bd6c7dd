//! Equality-search criteria over contact fields.
//!
//! # Invariants
//! - Column names come only from [`SearchTerm::column`]; caller text never
//!   reaches the SQL string, only bind parameters.
//! - Empty criteria mean "no filter", never "match nothing".
//! - Entries are kept in `SearchTerm` order, so the generated predicate text is
//!   deterministic for a given set of terms.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{BTreeMap, Iter};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Contact field that can appear in a search predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTerm {
    FirstName,
    LastName,
    Company,
    Phone,
    Email,
}

impl SearchTerm {
    pub const ALL: [SearchTerm; 5] = [
        SearchTerm::FirstName,
        SearchTerm::LastName,
        SearchTerm::Company,
        SearchTerm::Phone,
        SearchTerm::Email,
    ];

    /// Literal `contacts` column backing this term.
    pub const fn column(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Company => "company",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }
}

impl Display for SearchTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Text that does not name a [`SearchTerm`], or a malformed `term=value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTermParseError(pub String);

impl Display for SearchTermParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown search term `{}`; expected first_name|last_name|company|phone|email",
            self.0
        )
    }
}

impl Error for SearchTermParseError {}

impl FromStr for SearchTerm {
    type Err = SearchTermParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|term| term.column() == normalized)
            .ok_or_else(|| SearchTermParseError(value.to_string()))
    }
}

/// Conjunction of `field = value` predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchCriteria {
    terms: BTreeMap<SearchTerm, String>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the predicate for `term`.
    pub fn with(mut self, term: SearchTerm, value: impl Into<String>) -> Self {
        self.insert(term, value);
        self
    }

    /// Adds or replaces the predicate for `term`, returning the old value.
    pub fn insert(&mut self, term: SearchTerm, value: impl Into<String>) -> Option<String> {
        self.terms.insert(term, value.into())
    }

    pub fn get(&self, term: SearchTerm) -> Option<&str> {
        self.terms.get(&term).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn iter(&self) -> Iter<'_, SearchTerm, String> {
        self.terms.iter()
    }

    /// Parses one `term=value` pair, as accepted on the command line.
    ///
    /// The value is taken verbatim after the first `=`, so it may be empty or
    /// contain further `=` characters.
    pub fn parse_pair(raw: &str) -> Result<(SearchTerm, String), SearchTermParseError> {
        let (term, value) = raw
            .split_once('=')
            .ok_or_else(|| SearchTermParseError(raw.to_string()))?;
        Ok((term.parse()?, value.to_string()))
    }
}

impl FromIterator<(SearchTerm, String)> for SearchCriteria {
    fn from_iter<I: IntoIterator<Item = (SearchTerm, String)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SearchCriteria {
    type Item = (&'a SearchTerm, &'a String);
    type IntoIter = Iter<'a, SearchTerm, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchCriteria, SearchTerm};

    #[test]
    fn terms_parse_case_insensitively() {
        assert_eq!("LAST_NAME".parse::<SearchTerm>(), Ok(SearchTerm::LastName));
        assert_eq!(" first-name ".parse::<SearchTerm>(), Ok(SearchTerm::FirstName));
        assert!("contact_id".parse::<SearchTerm>().is_err());
        assert!("last_name; drop table contacts".parse::<SearchTerm>().is_err());
    }

    #[test]
    fn parse_pair_keeps_value_verbatim() {
        let (term, value) = SearchCriteria::parse_pair("email=a=b@example.com").unwrap();
        assert_eq!(term, SearchTerm::Email);
        assert_eq!(value, "a=b@example.com");
        assert!(SearchCriteria::parse_pair("company").is_err());
    }

    #[test]
    fn criteria_iterate_in_term_order_and_replace_duplicates() {
        let criteria = SearchCriteria::new()
            .with(SearchTerm::Company, "Acme")
            .with(SearchTerm::LastName, "Smith")
            .with(SearchTerm::Company, "Globex");
        let terms: Vec<_> = criteria.iter().map(|(term, _)| *term).collect();
        assert_eq!(terms, vec![SearchTerm::LastName, SearchTerm::Company]);
        assert_eq!(criteria.get(SearchTerm::Company), Some("Globex"));
    }

    #[test]
    fn criteria_serialize_as_snake_case_map() {
        let criteria = SearchCriteria::new().with(SearchTerm::LastName, "Smith");
        let json = serde_json::to_string(&criteria).unwrap();
        assert_eq!(json, r#"{"last_name":"Smith"}"#);
    }
}
