//! Request and response payloads for the HTTP surface.
//!
//! Required-field checks happen in handlers, not in deserialization, so
//! a missing field yields the API's own `{ "error": ... }` body instead
//! of a deserializer rejection.

use crate::ids::ItemId;
use crate::product::Product;

/// Body for `POST /products` as received. Barcode, name and brand are
/// required but validated at the handler; see [`NewProduct`].
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub calories: Option<i64>,
    #[serde(default)]
    pub protein: Option<String>,
    #[serde(default)]
    pub carbs: Option<String>,
    #[serde(default)]
    pub fats: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A validated product creation request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NewProduct {
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

impl ProductDraft {
    /// Promote the draft, yielding `None` when any required field is
    /// missing or blank.
    pub fn validate(self) -> Option<NewProduct> {
        let barcode = non_blank(self.barcode)?;
        let name = non_blank(self.name)?;
        let brand = non_blank(self.brand)?;
        Some(NewProduct {
            barcode,
            name,
            brand,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
            quantity: self.quantity,
            image: self.image,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Body for `PUT /products/{barcode}`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub calories: Option<i64>,
    #[serde(default)]
    pub protein: Option<String>,
    #[serde(default)]
    pub carbs: Option<String>,
    #[serde(default)]
    pub fats: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Body for `POST /folders` and `PUT /folders/{id}`.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct FolderName {
    #[serde(default)]
    pub name: Option<String>,
}

impl FolderName {
    pub fn validate(self) -> Option<String> {
        non_blank(self.name)
    }
}

/// Body for `POST /folders/{id}/items`. The id is client-supplied and
/// opaque; one is generated when absent.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct NewFolderItem {
    #[serde(default)]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub barcode: String,
}

/// Body for `POST /scan`.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ScanSubmission {
    #[serde(default)]
    pub barcode: String,
}

/// Response for scan submission and barcode lookup.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScanAck {
    pub message: String,
    pub product: Product,
}
