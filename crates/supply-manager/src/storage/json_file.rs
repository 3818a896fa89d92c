use crate::model::{Product, ProductId};
use actor_framework::{EntityStorage, StorageError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Current layout of the store document.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    products: BTreeMap<ProductId, Product>,
}

/// Keeps every product in one JSON document keyed by product id.
///
/// Each change rewrites the whole document to a sibling `.tmp` file and renames it over
/// the original, so a crash mid-write leaves the previous version readable. A failed
/// write leaves both the file and the in-memory copy as they were.
pub struct JsonFileStorage {
    path: PathBuf,
    products: BTreeMap<ProductId, Product>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            products: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn write(&self) -> Result<(), StorageError> {
        let document = StoreDocument {
            version: FORMAT_VERSION,
            products: self.products.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&document).map_err(StorageError::codec)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), size = self.products.len(), "Store written");
        Ok(())
    }
}

#[async_trait]
impl EntityStorage<Product> for JsonFileStorage {
    async fn load_all(&mut self) -> Result<Vec<Product>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No store file yet, starting empty");
                self.products.clear();
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let document: StoreDocument = serde_json::from_slice(&bytes).map_err(StorageError::codec)?;
        if document.version != FORMAT_VERSION {
            return Err(StorageError::corrupt(format!(
                "unsupported store version {} (expected {FORMAT_VERSION})",
                document.version
            )));
        }
        for (key, product) in &document.products {
            if *key != product.product_id {
                return Err(StorageError::corrupt(format!(
                    "record under key {key} has product_id {}",
                    product.product_id
                )));
            }
        }

        self.products = document.products;
        info!(path = %self.path.display(), size = self.products.len(), "Store loaded");
        Ok(self.products.values().cloned().collect())
    }

    async fn save(&mut self, product: &Product) -> Result<(), StorageError> {
        let previous = self
            .products
            .insert(product.product_id.clone(), product.clone());
        if let Err(e) = self.write().await {
            match previous {
                Some(previous) => self.products.insert(product.product_id.clone(), previous),
                None => self.products.remove(&product.product_id),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn remove(&mut self, id: &ProductId) -> Result<(), StorageError> {
        let Some(previous) = self.products.remove(id) else {
            return Ok(());
        };
        if let Err(e) = self.write().await {
            self.products.insert(id.clone(), previous);
            return Err(e);
        }
        Ok(())
    }
}
