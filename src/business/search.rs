//! Search and category filtering
//!
//! Matching is a case-insensitive substring test over site, username and
//! category. An empty term matches everything.

use crate::error::Result;
use crate::database::Credential;
use super::vault::Vault;

/// Category selector used by list views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,
    /// Exact category name
    Only(String),
}

impl CategoryFilter {
    /// Check if a credential passes the filter
    pub fn matches(&self, credential: &Credential) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => credential.category == *category,
        }
    }
}

impl From<&str> for CategoryFilter {
    /// `"All"` selects every category; anything else selects that category only
    fn from(value: &str) -> Self {
        if value == "All" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

/// Check if a credential matches the search term (case-insensitive)
pub fn matches_search_term(credential: &Credential, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let term = term.to_lowercase();
    [&credential.site, &credential.username, &credential.category]
        .iter()
        .any(|text| text.to_lowercase().contains(&term))
}

/// Apply a search term and a category filter, keeping the input order
pub fn filter_credentials(credentials: &[Credential], term: &str, category: &CategoryFilter) -> Vec<Credential> {
    credentials
        .iter()
        .filter(|c| matches_search_term(c, term) && category.matches(c))
        .cloned()
        .collect()
}

impl Vault {
    /// Search the signed-in user's credentials
    ///
    /// Results are ordered by site, then newest first.
    pub fn search_credentials(&mut self, term: &str) -> Result<Vec<Credential>> {
        let mut results = filter_credentials(&self.get_credentials()?, term, &CategoryFilter::All);
        // Stable sort keeps newest-first order within a site
        results.sort_by(|a, b| a.site.cmp(&b.site));
        Ok(results)
    }

    /// Get credentials in one category, newest first
    pub fn get_credentials_by_category(&mut self, category: &str) -> Result<Vec<Credential>> {
        let filter = CategoryFilter::Only(category.to_string());
        Ok(filter_credentials(&self.get_credentials()?, "", &filter))
    }
}
