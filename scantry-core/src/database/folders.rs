//! Folder accessors.

use chrono::Utc;
use scantry_model::{Folder, FolderId};

use super::Database;
use crate::error::Result;

impl Database {
    /// All folders, newest first.
    pub async fn list_folders(&self) -> Result<Vec<Folder>> {
        let folders = sqlx::query_as::<_, Folder>(
            "SELECT id, name, created_at, updated_at
             FROM folders
             ORDER BY created_at DESC",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(folders)
    }

    pub async fn get_folder(&self, id: &FolderId) -> Result<Option<Folder>> {
        let folder = sqlx::query_as::<_, Folder>(
            "SELECT id, name, created_at, updated_at
             FROM folders
             WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool())
        .await?;
        Ok(folder)
    }

    pub async fn folder_exists(&self, id: &FolderId) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM folders WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(self.pool())
            .await?;
        Ok(row.is_some())
    }

    pub async fn insert_folder(&self, name: &str) -> Result<Folder> {
        let now = Utc::now();
        let folder = Folder {
            id: FolderId::generate(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO folders (id, name, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(folder.id.as_str())
        .bind(&folder.name)
        .bind(folder.created_at)
        .bind(folder.updated_at)
        .execute(self.pool())
        .await?;

        Ok(folder)
    }

    /// Rename a folder, bumping `updated_at`. Returns `None` when the id
    /// is unknown.
    pub async fn rename_folder(&self, id: &FolderId, name: &str) -> Result<Option<Folder>> {
        let result = sqlx::query(
            "UPDATE folders SET name = ?, updated_at = ? WHERE id = ?",
        )
        .bind(name)
        .bind(Utc::now())
        .bind(id.as_str())
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_folder(id).await
    }

    /// Remove the folder row. Idempotent: a missing id is a no-op, and
    /// items filed under the folder are left in place with their now
    /// dangling reference.
    pub async fn delete_folder(&self, id: &FolderId) -> Result<()> {
        sqlx::query("DELETE FROM folders WHERE id = ?")
            .bind(id.as_str())
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
