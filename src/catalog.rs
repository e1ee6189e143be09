use indexmap::IndexMap;
use log::{error, info};

use crate::api::{ApiError, QuizApiClient};

/// Category -> subcategories mapping, in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: IndexMap<String, Vec<String>>,
}

impl Catalog {
    pub fn new(entries: IndexMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.entries.contains_key(category)
    }

    /// Subcategories of `category`, empty when it is unknown.
    pub fn subcategories_for(&self, category: &str) -> &[String] {
        self.entries
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, category: &str, subcategory: &str) -> bool {
        self.subcategories_for(category)
            .iter()
            .any(|s| s == subcategory)
    }
}

impl FromIterator<(String, Vec<String>)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

pub async fn load_categories(client: &QuizApiClient) -> Result<Catalog, ApiError> {
    match client.categories().await {
        Ok(entries) => {
            info!("Loaded {} categories", entries.len());
            Ok(Catalog::new(entries))
        }
        Err(e) => {
            error!("Error loading categories: {}", e);
            Err(e)
        }
    }
}
