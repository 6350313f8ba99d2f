//! Bitbucket Cloud platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    CreatePrOutcome, CreatePrRequest, Credentials, MergeResult, NO_CHANGES_MESSAGE,
    PlatformConfig, PullRequest,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bitbucket service using reqwest
pub struct BitbucketService {
    client: Client,
    credentials: Credentials,
    config: PlatformConfig,
}

#[derive(Serialize)]
struct BranchRef<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct Endpoint<'a> {
    branch: BranchRef<'a>,
}

#[derive(Serialize)]
struct CreatePrPayload<'a> {
    title: &'a str,
    description: &'a str,
    source: Endpoint<'a>,
    destination: Endpoint<'a>,
    state: &'static str,
    close_source_branch: bool,
}

#[derive(Serialize)]
struct MergePayload {
    #[serde(rename = "type")]
    kind: &'static str,
    merge_strategy: &'static str,
    close_source_branch: bool,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Deserialize)]
struct Link {
    href: String,
}

#[derive(Deserialize, Default)]
struct PrLinks {
    html: Option<Link>,
    merge: Option<Link>,
}

/// Create response: either an `error` or a pull request object
#[derive(Deserialize)]
struct CreatePrResponse {
    error: Option<ErrorDetail>,
    #[serde(default)]
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    links: PrLinks,
}

#[derive(Deserialize)]
struct MergeCommit {
    hash: String,
}

/// Merge response, read leniently since only the status matters
#[derive(Deserialize, Default)]
struct MergeResponse {
    state: Option<String>,
    merge_commit: Option<MergeCommit>,
    error: Option<ErrorDetail>,
}

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl BitbucketService {
    /// Create a new Bitbucket service
    pub fn new(credentials: Credentials, config: PlatformConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("branch-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            credentials,
            config,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    fn pullrequests_url(&self) -> String {
        self.api_url(&format!(
            "/repositories/{}/{}/pullrequests",
            urlencoding::encode(&self.config.owner),
            urlencoding::encode(&self.config.slug)
        ))
    }

    fn post(&self, url: &str) -> RequestBuilder {
        self.client
            .post(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
    }
}

/// Interpret a create-pull-request response body.
///
/// The body is inspected regardless of status: Bitbucket reports "nothing to
/// merge" as a 400 with an error message.
fn parse_create_response(status: StatusCode, text: &str) -> Result<CreatePrOutcome> {
    let response: CreatePrResponse = match serde_json::from_str(text) {
        Ok(response) => response,
        Err(e) if status.is_success() => return Err(e.into()),
        Err(_) => {
            return Err(Error::BitbucketApi(format!(
                "create pull request failed ({status}): {}",
                text.trim()
            )));
        }
    };

    if let Some(error) = response.error {
        if error.message == NO_CHANGES_MESSAGE {
            return Ok(CreatePrOutcome::NoChanges);
        }
        return Err(Error::BitbucketApi(error.message));
    }

    if !status.is_success() {
        return Err(Error::BitbucketApi(format!(
            "create pull request failed ({status})"
        )));
    }

    let merge_url = response
        .links
        .merge
        .map(|link| link.href)
        .ok_or(Error::MissingMergeLink(response.id))?;

    Ok(CreatePrOutcome::Created(PullRequest {
        id: response.id,
        title: response.title,
        html_url: response.links.html.map(|link| link.href),
        merge_url,
    }))
}

#[async_trait]
impl PlatformService for BitbucketService {
    async fn create_pr(&self, request: &CreatePrRequest) -> Result<CreatePrOutcome> {
        debug!(
            source = %request.source,
            destination = %request.destination,
            "creating pull request"
        );

        let payload = CreatePrPayload {
            title: &request.title,
            description: &request.description,
            source: Endpoint {
                branch: BranchRef {
                    name: &request.source,
                },
            },
            destination: Endpoint {
                branch: BranchRef {
                    name: &request.destination,
                },
            },
            state: "OPEN",
            close_source_branch: false,
        };

        let response = self
            .post(&self.pullrequests_url())
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%status, "create pull request responded");

        let outcome = parse_create_response(status, &text)?;
        match &outcome {
            CreatePrOutcome::Created(pr) => debug!(pr_id = pr.id, "created pull request"),
            CreatePrOutcome::NoChanges => debug!("no changes to pull"),
        }
        Ok(outcome)
    }

    async fn merge_pr(&self, pr: &PullRequest) -> Result<MergeResult> {
        debug!(pr_id = pr.id, merge_url = %pr.merge_url, "merging pull request");

        let payload = MergePayload {
            kind: "pullrequest",
            merge_strategy: "merge_commit",
            close_source_branch: false,
        };

        let response = self.post(&pr.merge_url).json(&payload).send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body: MergeResponse = serde_json::from_str(&text).unwrap_or_default();

        if !status.is_success() {
            let detail = body
                .error
                .map_or_else(|| text.trim().to_string(), |error| error.message);
            return Err(Error::BitbucketApi(format!(
                "merge of pull request #{} failed ({status}): {detail}",
                pr.id
            )));
        }

        let merge_result = MergeResult {
            state: body.state,
            sha: body.merge_commit.map(|commit| commit.hash),
        };

        debug!(
            pr_id = pr.id,
            state = ?merge_result.state,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
