use advsearch::service::dataset;
use advsearch::{FieldCatalog, Record};
use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Where records and field definitions come from. Unset paths fall back to
/// the built-in employee sample and its catalog.
#[derive(Debug, Clone, Default)]
pub struct DataSources {
    pub dataset: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

impl DataSources {
    pub fn load_catalog(&self) -> Result<FieldCatalog> {
        match &self.catalog {
            Some(path) => {
                let catalog = dataset::catalog_from_path(path)?;
                info!(path = %path.display(), fields = catalog.len(), "Loaded catalog");
                Ok(catalog)
            }
            None => Ok(FieldCatalog::employees()),
        }
    }

    pub fn load_records(&self, catalog: &FieldCatalog) -> Result<Vec<Record>> {
        let records = match &self.dataset {
            Some(path) => dataset::from_path(path, catalog)?,
            None => dataset::sample(catalog)?,
        };
        info!(records = records.len(), "Loaded dataset");
        Ok(records)
    }
}
