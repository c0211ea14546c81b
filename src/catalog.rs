//! Solar panel catalog loaded from CSV.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::SizingError;

/// A single purchasable panel model.
///
/// Position in the [`Catalog`] is its only identity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PanelModel {
    /// Commercial model name.
    #[serde(rename = "nome", alias = "name")]
    pub name: String,
    /// Nameplate power (kW).
    #[serde(rename = "potencia[kW]")]
    pub power_kw: f64,
    /// Price per unit.
    #[serde(rename = "preco")]
    pub unit_price: f64,
}

impl PanelModel {
    pub fn new(name: impl Into<String>, power_kw: f64, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            power_kw,
            unit_price,
        }
    }
}

/// Ordered, non-empty, read-only list of panel models.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    panels: Vec<PanelModel>,
}

impl Catalog {
    /// Wraps an ordered list of panels.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::EmptyCatalog`] if `panels` is empty.
    pub fn new(panels: Vec<PanelModel>) -> Result<Self, SizingError> {
        if panels.is_empty() {
            return Err(SizingError::EmptyCatalog);
        }
        Ok(Self { panels })
    }

    /// Loads the catalog from a CSV file with `nome,potencia[kW],preco` columns.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::CatalogRead`] if the file cannot be opened or a row
    /// fails to parse, and [`SizingError::EmptyCatalog`] if it has no rows.
    pub fn from_csv_file(path: &Path) -> Result<Self, SizingError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| SizingError::CatalogRead {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::from_csv_reader(reader).map_err(|e| match e {
            SizingError::CatalogRead { source, .. } => SizingError::CatalogRead {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!(
            "Loaded {} panel models from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parses catalog CSV from any reader.
    ///
    /// # Errors
    ///
    /// Same as [`Catalog::from_csv_file`]; the reported path is empty.
    pub fn from_reader(reader: impl Read) -> Result<Self, SizingError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::from_csv_reader(reader)
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, SizingError> {
        let panels = reader
            .deserialize()
            .collect::<Result<Vec<PanelModel>, _>>()
            .map_err(|source| SizingError::CatalogRead {
                path: Default::default(),
                source,
            })?;
        Self::new(panels)
    }

    pub fn panels(&self) -> &[PanelModel] {
        &self.panels
    }

    pub fn get(&self, index: usize) -> Option<&PanelModel> {
        self.panels.get(index)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Always false for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PanelModel> {
        self.panels.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PanelModel;
    type IntoIter = std::slice::Iter<'a, PanelModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.panels.iter()
    }
}
