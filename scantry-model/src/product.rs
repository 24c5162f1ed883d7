//! Product catalog records.
//!
//! A [`Product`] is keyed by its barcode. Nutrition magnitudes are
//! free-form strings (`"15g"`) because upstream label data is not
//! normalized; only `calories` is numeric.

/// A catalog product, keyed by barcode.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub barcode: String,
    pub name: String,
    pub brand: String,
    pub calories: Option<i64>,
    pub protein: Option<String>,
    pub carbs: Option<String>,
    pub fats: Option<String>,
    pub quantity: Option<String>,
    pub image: Option<String>,
}

/// Placeholder image URI served for products without artwork.
pub const PLACEHOLDER_IMAGE: &str = "/api/placeholder/80/80";

impl Product {
    /// The snapshot stored for scans of barcodes absent from the catalog.
    ///
    /// Scanning stays usable for unrecognized barcodes; availability is
    /// preferred over strict validation here.
    pub fn unknown(barcode: impl Into<String>) -> Self {
        Product {
            barcode: barcode.into(),
            name: "Unknown Product".to_string(),
            brand: "Unknown".to_string(),
            calories: Some(0),
            protein: Some("0g".to_string()),
            carbs: Some("0g".to_string()),
            fats: Some("0g".to_string()),
            quantity: Some("Unknown".to_string()),
            image: Some(PLACEHOLDER_IMAGE.to_string()),
        }
    }
}

/// The denormalized product fields copied onto a scanned item.
///
/// A snapshot is a point-in-time copy: editing the catalog product later
/// never changes items already scanned.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub brand: String,
    pub calories: Option<i64>,
    pub protein: Option<String>,
    pub carbs: Option<String>,
    pub fats: Option<String>,
    pub quantity: Option<String>,
    pub image: Option<String>,
}

impl From<Product> for ProductSnapshot {
    fn from(product: Product) -> Self {
        ProductSnapshot {
            name: product.name,
            brand: product.brand,
            calories: product.calories,
            protein: product.protein,
            carbs: product.carbs,
            fats: product.fats,
            quantity: product.quantity,
            image: product.image,
        }
    }
}
