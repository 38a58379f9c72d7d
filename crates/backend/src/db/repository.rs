use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tokio::{sync::RwLock, task};

use libs::json_file;

use super::Picture;

pub enum InsertOutcome {
    Created(Picture),
    AlreadyPresent,
}

/// Mutations hold the write lock across modify and persist; each one rewrites the whole file.
pub struct Repository {
    pictures: RwLock<Vec<Picture>>,
    file_path: PathBuf,
}

impl Repository {
    pub fn load(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        let pictures: Vec<Picture> = json_file::load_or_init(&file_path)
            .with_context(|| format!("cannot load pictures from {}", file_path.display()))?;
        tracing::info!(
            "loaded {} pictures from {}",
            pictures.len(),
            file_path.display()
        );

        Ok(Self {
            pictures: RwLock::new(pictures),
            file_path,
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub async fn count_pictures(&self) -> usize {
        self.pictures.read().await.len()
    }

    pub async fn list_pictures(&self) -> Vec<Picture> {
        self.pictures.read().await.clone()
    }

    pub async fn get_picture(&self, id: i64) -> Option<Picture> {
        let pictures = self.pictures.read().await;
        position(&pictures, id).map(|idx| pictures[idx].clone())
    }

    pub async fn add_picture(&self, id: i64, fields: Map<String, Value>) -> Result<InsertOutcome> {
        let mut guard = self.pictures.write().await;
        if position(&guard, id).is_some() {
            return Ok(InsertOutcome::AlreadyPresent);
        }

        let mut picture = Picture::new(fields);
        picture.set_id(id);

        let mut next = guard.clone();
        next.push(picture.clone());
        *guard = self.persist(next).await?;

        tracing::info!(id, "picture created");
        Ok(InsertOutcome::Created(picture))
    }

    pub async fn update_picture(
        &self,
        id: i64,
        fields: Map<String, Value>,
    ) -> Result<Option<Picture>> {
        let mut guard = self.pictures.write().await;
        let Some(idx) = position(&guard, id) else {
            return Ok(None);
        };

        let mut next = guard.clone();
        next[idx].merge(fields);
        let updated = next[idx].clone();
        *guard = self.persist(next).await?;

        tracing::info!(id, "picture updated");
        Ok(Some(updated))
    }

    pub async fn delete_picture(&self, id: i64) -> Result<bool> {
        let mut guard = self.pictures.write().await;
        let Some(idx) = position(&guard, id) else {
            return Ok(false);
        };

        let mut next = guard.clone();
        next.remove(idx);
        *guard = self.persist(next).await?;

        tracing::info!(id, "picture deleted");
        Ok(true)
    }

    async fn persist(&self, pictures: Vec<Picture>) -> Result<Vec<Picture>> {
        let path = self.file_path.clone();
        task::spawn_blocking(move || {
            json_file::write_pretty(&path, &pictures)
                .with_context(|| format!("cannot write pictures to {}", path.display()))?;
            tracing::debug!("wrote {} pictures to {}", pictures.len(), path.display());
            Ok(pictures)
        })
        .await?
    }
}

fn position(pictures: &[Picture], id: i64) -> Option<usize> {
    pictures.iter().position(|p| p.id() == Some(id))
}
