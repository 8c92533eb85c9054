//! REST adapter for the `projects` resource.
//!
//! | Operation | Request                      | Success body                   |
//! |-----------|------------------------------|--------------------------------|
//! | list      | `GET    {base}/projects`      | JSON array of records          |
//! | create    | `POST   {base}/projects`      | the record, or `[record]`      |
//! | update    | `PUT    {base}/projects/{id}` | ignored                        |
//! | delete    | `DELETE {base}/projects/{id}` | ignored                        |
//!
//! `ureq` is blocking, so every call runs on `spawn_blocking`.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use folio_core::{Project, ProjectFields, ProjectId, RemoteFailure};

use super::{blocking, RemoteResult, RemoteStore};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Longest slice of an error body kept in a [`RemoteFailure::Rejected`].
const MAX_ERROR_BODY: usize = 200;

#[derive(Clone)]
pub struct HttpRemote {
    base: String,
    api_key: Option<String>,
    agent: ureq::Agent,
}

impl std::fmt::Debug for HttpRemote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRemote")
            .field("base", &self.base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HttpRemote {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            base: endpoint.trim_end_matches('/').to_string(),
            api_key,
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    pub fn collection_url(&self) -> String {
        format!("{}/projects", self.base)
    }

    pub fn record_url(&self, id: &ProjectId) -> String {
        format!("{}/projects/{}", self.base, id)
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        let mut request = self
            .agent
            .request(method, url)
            .set("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request
                .set("apikey", key)
                .set("Authorization", &format!("Bearer {key}"));
        }
        request
    }
}

#[async_trait]
impl RemoteStore for HttpRemote {
    async fn list(&self) -> RemoteResult<Vec<Project>> {
        let this = self.clone();
        blocking("list", move || {
            let response = this
                .request("GET", &this.collection_url())
                .call()
                .map_err(|err| failure_from(err, None))?;
            response
                .into_json::<Vec<Project>>()
                .map_err(|err| RemoteFailure::Decode(err.to_string()))
        })
        .await
    }

    async fn create(&self, fields: ProjectFields) -> RemoteResult<Project> {
        let this = self.clone();
        blocking("create", move || {
            let response = this
                .request("POST", &this.collection_url())
                .send_json(&fields)
                .map_err(|err| failure_from(err, None))?;
            let body: Value = response
                .into_json()
                .map_err(|err| RemoteFailure::Decode(err.to_string()))?;
            created_record(body)
        })
        .await
    }

    async fn update(&self, id: &ProjectId, fields: ProjectFields) -> RemoteResult<()> {
        let this = self.clone();
        let id = id.clone();
        blocking("update", move || {
            this.request("PUT", &this.record_url(&id))
                .send_json(&fields)
                .map_err(|err| failure_from(err, Some(&id)))?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: &ProjectId) -> RemoteResult<()> {
        let this = self.clone();
        let id = id.clone();
        blocking("delete", move || {
            this.request("DELETE", &this.record_url(&id))
                .call()
                .map_err(|err| failure_from(err, Some(&id)))?;
            Ok(())
        })
        .await
    }
}

fn failure_from(err: ureq::Error, id: Option<&ProjectId>) -> RemoteFailure {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            failure_from_status(status, &body, id)
        }
        ureq::Error::Transport(transport) => RemoteFailure::Transport(transport.to_string()),
    }
}

/// 404 on a record URL means the identity is gone; anything else is a rejection.
fn failure_from_status(status: u16, body: &str, id: Option<&ProjectId>) -> RemoteFailure {
    match (status, id) {
        (404, Some(id)) => RemoteFailure::NotFound(id.clone()),
        _ => RemoteFailure::Rejected {
            status,
            message: body.trim().chars().take(MAX_ERROR_BODY).collect(),
        },
    }
}

/// Create answers with the record itself or with a one-element array of it.
fn created_record(body: Value) -> RemoteResult<Project> {
    let record = match body {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        Value::Array(_) => {
            return Err(RemoteFailure::Decode(
                "create returned an empty array".to_string(),
            ))
        }
        other => other,
    };
    serde_json::from_value(record).map_err(|err| RemoteFailure::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn urls_ignore_trailing_slash() {
        let remote = HttpRemote::new("http://localhost:3000/api/", None);
        assert_eq!(remote.collection_url(), "http://localhost:3000/api/projects");
        assert_eq!(
            remote.record_url(&ProjectId::from("abc")),
            "http://localhost:3000/api/projects/abc"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let remote = HttpRemote::new("http://localhost", Some("secret-key".to_string()));
        let shown = format!("{remote:?}");
        assert!(!shown.contains("secret-key"));
        assert!(shown.contains("<redacted>"));
    }

    #[test]
    fn status_404_on_record_is_not_found() {
        let id = ProjectId::from("abc");
        assert_eq!(
            failure_from_status(404, "", Some(&id)),
            RemoteFailure::NotFound(id)
        );
        assert!(matches!(
            failure_from_status(404, "no route", None),
            RemoteFailure::Rejected { status: 404, .. }
        ));
        assert!(matches!(
            failure_from_status(500, " boom ", None),
            RemoteFailure::Rejected { status: 500, ref message } if message == "boom"
        ));
    }

    #[test]
    fn created_record_accepts_object_or_array() {
        let record = json!({"id": "1", "title": "t", "description": "d", "tech_stack": []});
        assert_eq!(
            created_record(record.clone()).expect("object").id,
            ProjectId::from("1")
        );
        assert_eq!(
            created_record(json!([record])).expect("array").id,
            ProjectId::from("1")
        );
        assert!(matches!(
            created_record(json!([])),
            Err(RemoteFailure::Decode(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_failure() {
        let remote = HttpRemote::new("http://127.0.0.1:1", None);
        let err = remote.list().await.unwrap_err();
        assert!(matches!(err, RemoteFailure::Transport(_)), "got: {err:?}");
    }
}
