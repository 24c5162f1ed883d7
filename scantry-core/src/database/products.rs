//! Product catalog accessors.

use scantry_model::{NewProduct, Product, ProductPatch, product::PLACEHOLDER_IMAGE};

use super::Database;
use crate::error::Result;

impl Database {
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT barcode, name, brand, calories, protein, carbs, fats, quantity, image
             FROM products",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(products)
    }

    pub async fn get_product(&self, barcode: &str) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT barcode, name, brand, calories, protein, carbs, fats, quantity, image
             FROM products
             WHERE barcode = ?",
        )
        .bind(barcode)
        .fetch_optional(self.pool())
        .await?;
        Ok(product)
    }

    /// Insert a new catalog entry. A duplicate barcode surfaces as
    /// [`CoreError::Conflict`](crate::CoreError::Conflict).
    pub async fn insert_product(&self, new: NewProduct) -> Result<Product> {
        let product = Product {
            barcode: new.barcode,
            name: new.name,
            brand: new.brand,
            calories: new.calories,
            protein: new.protein,
            carbs: new.carbs,
            fats: new.fats,
            quantity: new.quantity,
            image: Some(
                new.image
                    .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            ),
        };

        sqlx::query(
            "INSERT INTO products (barcode, name, brand, calories, protein, carbs, fats, quantity, image)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&product.barcode)
        .bind(&product.name)
        .bind(&product.brand)
        .bind(product.calories)
        .bind(&product.protein)
        .bind(&product.carbs)
        .bind(&product.fats)
        .bind(&product.quantity)
        .bind(&product.image)
        .execute(self.pool())
        .await?;

        Ok(product)
    }

    /// Merge `patch` into the stored product. Absent fields keep their
    /// current value. Returns `None` when the barcode is unknown.
    pub async fn update_product(
        &self,
        barcode: &str,
        patch: ProductPatch,
    ) -> Result<Option<Product>> {
        let Some(current) = self.get_product(barcode).await? else {
            return Ok(None);
        };

        let updated = Product {
            barcode: current.barcode,
            name: patch.name.unwrap_or(current.name),
            brand: patch.brand.unwrap_or(current.brand),
            calories: patch.calories.or(current.calories),
            protein: patch.protein.or(current.protein),
            carbs: patch.carbs.or(current.carbs),
            fats: patch.fats.or(current.fats),
            quantity: patch.quantity.or(current.quantity),
            image: patch.image.or(current.image),
        };

        sqlx::query(
            "UPDATE products
             SET name = ?, brand = ?, calories = ?, protein = ?,
                 carbs = ?, fats = ?, quantity = ?, image = ?
             WHERE barcode = ?",
        )
        .bind(&updated.name)
        .bind(&updated.brand)
        .bind(updated.calories)
        .bind(&updated.protein)
        .bind(&updated.carbs)
        .bind(&updated.fats)
        .bind(&updated.quantity)
        .bind(&updated.image)
        .bind(barcode)
        .execute(self.pool())
        .await?;

        Ok(Some(updated))
    }

    /// Returns `false` when no row matched the barcode.
    pub async fn delete_product(&self, barcode: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE barcode = ?")
            .bind(barcode)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use scantry_model::{NewProduct, ProductPatch};

    use crate::CoreError;
    use crate::database::test_database;

    fn yogurt() -> NewProduct {
        NewProduct {
            barcode: "8901234567890".to_string(),
            name: "Organic Greek Yogurt".to_string(),
            brand: "Nature Valley".to_string(),
            calories: Some(120),
            protein: Some("15g".to_string()),
            carbs: Some("9g".to_string()),
            fats: Some("2g".to_string()),
            quantity: Some("170g".to_string()),
            image: None,
        }
    }

    #[tokio::test]
    async fn insert_and_get_round_trip() {
        let db = test_database().await;
        let created = db.insert_product(yogurt()).await.unwrap();
        assert_eq!(created.image.as_deref(), Some("/api/placeholder/80/80"));

        let fetched = db.get_product("8901234567890").await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn duplicate_barcode_is_a_conflict() {
        let db = test_database().await;
        db.insert_product(yogurt()).await.unwrap();
        let err = db.insert_product(yogurt()).await.unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_merges_partial_fields() {
        let db = test_database().await;
        db.insert_product(yogurt()).await.unwrap();

        let patch = ProductPatch {
            calories: Some(130),
            ..ProductPatch::default()
        };
        let updated = db
            .update_product("8901234567890", patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.calories, Some(130));
        assert_eq!(updated.name, "Organic Greek Yogurt");
        assert_eq!(updated.protein.as_deref(), Some("15g"));
    }

    #[tokio::test]
    async fn update_unknown_barcode_is_none() {
        let db = test_database().await;
        let updated = db
            .update_product("0000000000000", ProductPatch::default())
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let db = test_database().await;
        db.insert_product(yogurt()).await.unwrap();
        assert!(db.delete_product("8901234567890").await.unwrap());
        assert!(!db.delete_product("8901234567890").await.unwrap());
    }
}
