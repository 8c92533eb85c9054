use std::path::{Path, PathBuf};

use async_trait::async_trait;

use folio_core::{store, Project, ProjectFields, ProjectId};

use super::{blocking, RemoteResult, RemoteStore};

/// Remote store backed by a local YAML project file.
#[derive(Debug, Clone)]
pub struct FileRemote {
    path: PathBuf,
}

impl FileRemote {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RemoteStore for FileRemote {
    async fn list(&self) -> RemoteResult<Vec<Project>> {
        let path = self.path.clone();
        blocking("list", move || Ok(store::list(&path)?)).await
    }

    async fn create(&self, fields: ProjectFields) -> RemoteResult<Project> {
        let path = self.path.clone();
        blocking("create", move || Ok(store::insert(&path, fields)?)).await
    }

    async fn update(&self, id: &ProjectId, fields: ProjectFields) -> RemoteResult<()> {
        let path = self.path.clone();
        let id = id.clone();
        blocking("update", move || {
            store::replace(&path, &id, fields)?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: &ProjectId) -> RemoteResult<()> {
        let path = self.path.clone();
        let id = id.clone();
        blocking("delete", move || Ok(store::remove(&path, &id)?)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::RemoteFailure;
    use tempfile::TempDir;

    fn fields(title: &str) -> ProjectFields {
        ProjectFields {
            title: title.to_string(),
            description: "d".to_string(),
            ..ProjectFields::default()
        }
    }

    #[tokio::test]
    async fn create_update_delete_through_file() {
        let dir = TempDir::new().expect("tempdir");
        let remote = FileRemote::new(dir.path().join("projects.yaml"));

        let created = remote.create(fields("one")).await.expect("create");
        remote.update(&created.id, fields("two")).await.expect("update");
        let listed = remote.list().await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].fields.title, "two");

        remote.delete(&created.id).await.expect("delete");
        assert!(remote.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn missing_identity_is_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let remote = FileRemote::new(dir.path().join("projects.yaml"));
        let err = remote.delete(&ProjectId::from("gone")).await.unwrap_err();
        assert_eq!(err, RemoteFailure::NotFound(ProjectId::from("gone")));
    }
}
