//! Release-line catalog backed by the project's milestone API.
//!
//! Each milestone becomes a [`ReleaseLine`]. A milestone counts as released
//! once its due date has passed; a milestone without a due date is always
//! released.

use async_trait::async_trait;
use bvm_schema::{LTS_SUFFIX, ReleaseLine};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Release catalog unavailable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Release catalog unavailable: milestone '{title}' has an invalid due date '{due_on}'")]
    Malformed { title: String, due_on: String },
}

/// Source of known release lines.
#[async_trait]
pub trait ReleaseCatalog: Send + Sync {
    /// All release lines, ordered ascending by version number.
    async fn release_lines(&self) -> Result<Vec<ReleaseLine>, CatalogError>;
}

/// Raw milestone record as returned by the catalog endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Milestone {
    pub title: String,
    #[serde(default)]
    pub due_on: Option<String>,
}

/// Catalog client for the remote milestone endpoint.
#[derive(Debug, Clone)]
pub struct VersionCatalog {
    client: Client,
    catalog_url: String,
    release_url: String,
}

impl VersionCatalog {
    pub fn new(client: Client, catalog_url: impl Into<String>, release_url: impl Into<String>) -> Self {
        Self {
            client,
            catalog_url: catalog_url.into(),
            release_url: release_url.into(),
        }
    }

    async fn fetch_milestones(&self) -> Result<Vec<Milestone>, CatalogError> {
        tracing::debug!(url = %self.catalog_url, "Fetching release catalog");
        let milestones = self
            .client
            .get(&self.catalog_url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Milestone>>()
            .await?;
        tracing::debug!("Catalog returned {} milestones", milestones.len());
        Ok(milestones)
    }
}

#[async_trait]
impl ReleaseCatalog for VersionCatalog {
    async fn release_lines(&self) -> Result<Vec<ReleaseLine>, CatalogError> {
        let milestones = self.fetch_milestones().await?;
        release_lines_at(&milestones, &self.release_url, Utc::now())
    }
}

/// Map milestones to release lines as of `now`, sorted numerically.
///
/// Sorting compares version numbers as dotted numeric tuples, so `4.10`
/// follows `4.9`.
pub fn release_lines_at(
    milestones: &[Milestone],
    release_url: &str,
    now: DateTime<Utc>,
) -> Result<Vec<ReleaseLine>, CatalogError> {
    let mut lines = milestones
        .iter()
        .map(|m| to_release_line(m, release_url, now))
        .collect::<Result<Vec<_>, _>>()?;

    lines.sort_by(ReleaseLine::cmp_version);
    Ok(lines)
}

fn to_release_line(
    milestone: &Milestone,
    release_url: &str,
    now: DateTime<Utc>,
) -> Result<ReleaseLine, CatalogError> {
    let is_lts = milestone.title.ends_with(LTS_SUFFIX);
    let version_number = milestone.title.replace(LTS_SUFFIX, "");

    let released = match milestone.due_on.as_deref().map(str::trim) {
        None | Some("") => true,
        Some(due_on) => {
            let due = DateTime::parse_from_rfc3339(due_on).map_err(|_| CatalogError::Malformed {
                title: milestone.title.clone(),
                due_on: due_on.to_string(),
            })?;
            now > due.with_timezone(&Utc)
        }
    };

    let link = released.then(|| {
        format!(
            "{}/Blender{version_number}",
            release_url.trim_end_matches('/')
        )
    });

    Ok(ReleaseLine {
        version_number,
        is_lts,
        released,
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::Server;

    fn milestone(title: &str, due_on: Option<&str>) -> Milestone {
        Milestone {
            title: title.to_string(),
            due_on: due_on.map(str::to_string),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn lts_suffix_is_stripped_and_flagged() {
        let lines = release_lines_at(
            &[milestone("4.2 LTS", None), milestone("4.1", None)],
            "https://example.com/release",
            now(),
        )
        .unwrap();

        assert_eq!(lines[0].version_number, "4.1");
        assert!(!lines[0].is_lts);
        assert_eq!(lines[1].version_number, "4.2");
        assert!(lines[1].is_lts);
    }

    #[test]
    fn released_follows_due_date() {
        let lines = release_lines_at(
            &[
                milestone("4.2 LTS", Some("2024-07-16T00:00:00Z")),
                milestone("4.3", Some("2024-11-19T00:00:00+01:00")),
                milestone("4.0", None),
            ],
            "https://example.com/release",
            now(),
        )
        .unwrap();

        let by_version = |v: &str| lines.iter().find(|l| l.version_number == v).unwrap();
        assert!(by_version("4.0").released);
        assert!(by_version("4.2").released);
        assert!(!by_version("4.3").released);
        assert_eq!(
            by_version("4.2").link.as_deref(),
            Some("https://example.com/release/Blender4.2")
        );
        assert_eq!(by_version("4.3").link, None);
    }

    #[test]
    fn lines_sort_numerically() {
        let lines = release_lines_at(
            &[
                milestone("4.10", None),
                milestone("4.9", None),
                milestone("3.6 LTS", None),
            ],
            "https://example.com/release",
            now(),
        )
        .unwrap();

        let order: Vec<_> = lines.iter().map(|l| l.version_number.as_str()).collect();
        assert_eq!(order, vec!["3.6", "4.9", "4.10"]);
    }

    #[test]
    fn invalid_due_date_is_malformed() {
        let err = release_lines_at(
            &[milestone("4.2", Some("next tuesday"))],
            "https://example.com/release",
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }

    #[tokio::test]
    async fn fetches_from_remote_endpoint() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/milestones")
            .match_header("user-agent", crate::USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"title": "4.2 LTS", "due_on": null}, {"title": "2.93 LTS"}]"#)
            .create_async()
            .await;

        let catalog = VersionCatalog::new(
            crate::http_client().unwrap(),
            format!("{}/milestones", server.url()),
            "https://example.com/release",
        );
        let lines = catalog.release_lines().await.unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].version_number, "2.93");
        assert_eq!(lines[1].version_number, "4.2");
        assert!(lines.iter().all(|l| l.is_lts && l.released));
    }

    #[tokio::test]
    async fn server_error_is_unavailable() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/milestones")
            .with_status(503)
            .create_async()
            .await;

        let catalog = VersionCatalog::new(
            Client::new(),
            format!("{}/milestones", server.url()),
            "https://example.com/release",
        );
        let err = catalog.release_lines().await.unwrap_err();
        assert!(matches!(err, CatalogError::Http(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_unavailable() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/milestones")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let catalog = VersionCatalog::new(
            Client::new(),
            format!("{}/milestones", server.url()),
            "https://example.com/release",
        );
        assert!(catalog.release_lines().await.is_err());
    }
}
