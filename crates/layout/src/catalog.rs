use serde::{Deserialize, Serialize};
use tilefield_common::ConfigError;

/// Image index for cell `(col, row)` in a grid with `rows` rows.
///
/// Cells are numbered column-major and cycle through the catalog.
pub fn image_index(col: u32, row: u32, rows: u32, catalog_len: usize) -> usize {
    debug_assert!(catalog_len > 0);
    let linear = col as u64 * rows as u64 + row as u64;
    (linear % catalog_len as u64) as usize
}

/// Ordered, non-empty list of image identifiers fixed at configuration time.
///
/// The layout engine never reads identifiers; it only needs the length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ImageCatalog {
    images: Vec<String>,
}

impl ImageCatalog {
    pub fn new(images: Vec<String>) -> Result<Self, ConfigError> {
        if images.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(Self { images })
    }

    /// `len` numbered placeholder identifiers under `dir` (at least one).
    pub fn placeholders(dir: &str, len: usize) -> Self {
        Self {
            images: (0..len.max(1)).map(|i| format!("{dir}/{i:02}.jpg")).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index_for(&self, col: u32, row: u32, rows: u32) -> usize {
        image_index(col, row, rows, self.images.len())
    }

    /// Identifier for an image index, wrapping out-of-range indices.
    pub fn resolve(&self, index: usize) -> &str {
        &self.images[index % self.images.len()]
    }
}

impl TryFrom<Vec<String>> for ImageCatalog {
    type Error = ConfigError;

    fn try_from(images: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(images)
    }
}

impl From<ImageCatalog> for Vec<String> {
    fn from(catalog: ImageCatalog) -> Self {
        catalog.images
    }
}
