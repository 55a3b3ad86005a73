// src/services/github.rs

//! GitHub Projects (V2) GraphQL source.
//!
//! Pages through every item of an organization project. Each item carries
//! the most recent comments and timeline events, capped by the detection
//! limits.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, RawBoard, RawItem};
use crate::utils::http::create_async_client;

use super::ItemSource;

/// Timeline event types available on both issues and pull requests.
const EVENT_SELECTION: &str = r#"
                __typename
                ... on LabeledEvent { createdAt actor { login } label { name } }
                ... on UnlabeledEvent { createdAt actor { login } label { name } }
                ... on ClosedEvent { createdAt actor { login } }
                ... on ReopenedEvent { createdAt actor { login } }
                ... on AssignedEvent {
                  createdAt actor { login } assignee { ... on User { login } }
                }
                ... on UnassignedEvent {
                  createdAt actor { login } assignee { ... on User { login } }
                }
                ... on MilestonedEvent { createdAt actor { login } milestoneTitle }
                ... on DemilestonedEvent { createdAt actor { login } milestoneTitle }
                ... on RenamedTitleEvent { createdAt actor { login } previousTitle currentTitle }
                ... on CrossReferencedEvent { createdAt actor { login } }
                ... on LockedEvent { createdAt actor { login } }
                ... on UnlockedEvent { createdAt actor { login } }
                ... on PinnedEvent { createdAt actor { login } }
                ... on UnpinnedEvent { createdAt actor { login } }
                ... on TransferredEvent { createdAt actor { login } }
                ... on ReferencedEvent { createdAt actor { login } }
                ... on ConnectedEvent { createdAt actor { login } }
                ... on DisconnectedEvent { createdAt actor { login } }
                ... on MarkedAsDuplicateEvent { createdAt actor { login } }
                ... on UnmarkedAsDuplicateEvent { createdAt actor { login } }
                ... on CommentDeletedEvent { createdAt actor { login } }"#;

/// Extra timeline event types only pull requests have.
const PULL_REQUEST_EVENTS: &str = r#"
                ... on MergedEvent { createdAt actor { login } }
                ... on ReadyForReviewEvent { createdAt actor { login } }
                ... on ConvertToDraftEvent { createdAt actor { login } }
                ... on ReviewRequestedEvent { createdAt actor { login } }
                ... on HeadRefForcePushedEvent { createdAt actor { login } }"#;

const CONTENT_FIELDS: &str = r#"
              title
              number
              url
              state
              updatedAt
              repository { name }
              comments(last: $comments) {
                nodes { createdAt bodyText author { login } }
              }"#;

const QUERY_TEMPLATE: &str = r#"
query(
  $org: String!, $number: Int!, $cursor: String,
  $pageSize: Int!, $events: Int!, $comments: Int!
) {
  organization(login: $org) {
    projectV2(number: $number) {
      title
      url
      items(first: $pageSize, after: $cursor) {
        pageInfo { hasNextPage endCursor }
        nodes {
          id
          updatedAt
          createdAt
          fieldValues(first: 20) {
            nodes {
              ... on ProjectV2ItemFieldSingleSelectValue {
                name
                field { ... on ProjectV2FieldCommon { name } }
              }
            }
          }
          content {
            ... on Issue {{{CONTENT}}
              timelineItems(last: $events) {
                nodes {{{EVENTS}}
                }
              }
            }
            ... on PullRequest {{{CONTENT}}
              timelineItems(last: $events) {
                nodes {{{EVENTS}}{{PR_EVENTS}}
                }
              }
            }
          }
        }
      }
    }
  }
}"#;

/// Build the items query.
pub(crate) fn items_query() -> String {
    QUERY_TEMPLATE
        .replace("{{CONTENT}}", CONTENT_FIELDS)
        .replace("{{EVENTS}}", EVENT_SELECTION)
        .replace("{{PR_EVENTS}}", PULL_REQUEST_EVENTS)
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<QueryData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    organization: Option<Organization>,
}

#[derive(Debug, Deserialize)]
struct Organization {
    #[serde(rename = "projectV2")]
    project: Option<Project>,
}

#[derive(Debug, Deserialize)]
struct Project {
    title: String,
    url: String,
    items: ItemPage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemPage {
    page_info: PageInfo,
    #[serde(default)]
    nodes: Vec<Option<RawItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

/// Live source backed by the GitHub GraphQL API.
pub struct GitHubProjectSource {
    client: Client,
    endpoint: Url,
    org: String,
    project_number: u32,
    page_size: u32,
    event_limit: usize,
    comment_limit: usize,
    max_retries: u32,
    retry_delay: Duration,
}

impl GitHubProjectSource {
    /// Create a source for the project configured in `config`.
    pub fn new(config: &Config, token: &str) -> Result<Self> {
        Ok(Self {
            client: create_async_client(&config.github, token)?,
            endpoint: Url::parse(&config.github.api_url)?,
            org: config.github.org.clone(),
            project_number: config.github.project_number,
            page_size: config.github.page_size,
            event_limit: config.detection.event_limit,
            comment_limit: config.detection.comment_limit,
            max_retries: config.github.max_retries,
            retry_delay: Duration::from_millis(config.github.retry_delay_ms),
        })
    }

    fn request_body(&self, query: &str, cursor: Option<&str>) -> Value {
        json!({
            "query": query,
            "variables": {
                "org": self.org,
                "number": self.project_number,
                "cursor": cursor,
                "pageSize": self.page_size,
                "events": self.event_limit,
                "comments": self.comment_limit,
            }
        })
    }

    /// POST one page, retrying transport failures and 5xx responses.
    async fn post_page(&self, body: &Value) -> Result<GraphQlResponse> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.try_post(body).await {
                Ok(response) => return Ok(response),
                Err(error) if attempt <= self.max_retries && is_retryable(&error) => {
                    let delay = self.retry_delay * attempt;
                    log::warn!(
                        "Request failed (attempt {attempt}/{}): {error}. Retrying in {delay:?}",
                        self.max_retries + 1
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    async fn try_post(&self, body: &Value) -> Result<GraphQlResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(body)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AppError::auth(
                "GitHub rejected the token. Run 'gh auth login' first.",
            ));
        }

        Ok(response.error_for_status()?.json().await?)
    }

    fn project_label(&self) -> String {
        format!("{} Project #{}", self.org, self.project_number)
    }
}

#[async_trait]
impl ItemSource for GitHubProjectSource {
    async fn fetch(&self) -> Result<RawBoard> {
        let query = items_query();
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0;
        let mut board: (String, String);

        log::info!("Scanning {}...", self.project_label());

        loop {
            page_count += 1;
            log::info!("Fetching page {page_count}...");

            let body = self.request_body(&query, cursor.as_deref());
            let response = self.post_page(&body).await?;
            let project = interpret(response, &self.org, self.project_number)?;

            board = (project.title, project.url);
            items.extend(project.items.nodes.into_iter().flatten());

            match (project.items.page_info.has_next_page, project.items.page_info.end_cursor) {
                (true, Some(next)) => cursor = Some(next),
                (true, None) => {
                    log::warn!("API reported another page without a cursor; stopping");
                    break;
                }
                (false, _) => break,
            }
        }

        log::info!("Fetched {} total items.", items.len());

        Ok(RawBoard {
            title: board.0,
            url: board.1,
            fetched_at: Utc::now(),
            items,
        })
    }

    fn describe(&self) -> String {
        self.project_label()
    }
}

/// Map a GraphQL response onto the project page or a typed error.
fn interpret(response: GraphQlResponse, org: &str, project_number: u32) -> Result<Project> {
    if let Some(error) = response.errors.first() {
        let kind = error.kind.as_deref().unwrap_or("UNKNOWN");
        return Err(match kind {
            "INSUFFICIENT_SCOPES" => AppError::auth(
                "Insufficient GitHub token scopes. You need 'read:project' to access \
                 project boards. Run: gh auth refresh -h github.com -s read:project",
            ),
            "NOT_FOUND" => AppError::not_found(error.message.clone()),
            _ => AppError::graphql(kind, &error.message),
        });
    }

    let organization = response
        .data
        .and_then(|data| data.organization)
        .ok_or_else(|| {
            AppError::not_found(format!("Organization '{org}' not found or no access."))
        })?;

    organization.project.ok_or_else(|| {
        AppError::not_found(format!(
            "Project #{project_number} not found in org '{org}'."
        ))
    })
}

fn is_retryable(error: &AppError) -> bool {
    match error {
        AppError::Http(err) => {
            err.is_timeout()
                || err.is_connect()
                || err.status().is_some_and(|status| status.is_server_error())
        }
        _ => false,
    }
}
