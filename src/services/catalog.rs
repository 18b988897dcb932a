use std::{path::Path, sync::Arc};

use crate::{error::AppResult, models::Candidate};

/// Source of the authoritative product catalog
///
/// Catalog order is significant: the local scorer uses it to break ties.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// The full list of recommendable products
    async fn catalog(&self) -> AppResult<Arc<Vec<Candidate>>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Catalog held in memory, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<Vec<Candidate>>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Candidate>) -> Self {
        Self {
            products: Arc::new(products),
        }
    }

    /// Creates an empty catalog
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads a catalog from a JSON array of products
    pub async fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read catalog {}: {}", path.display(), e))?;

        let products: Vec<Candidate> = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog {}: {}", path.display(), e))?;

        tracing::info!(
            path = %path.display(),
            products = products.len(),
            "Catalog loaded"
        );

        Ok(Self::new(products))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait::async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn catalog(&self) -> AppResult<Arc<Vec<Candidate>>> {
        Ok(Arc::clone(&self.products))
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}
