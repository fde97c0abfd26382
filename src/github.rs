use anyhow::{Context, Result, anyhow};
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info};

use crate::stats::{PlaceholderEstimates, Stats, most_starred};

const USER_AGENT: &str = "readme-stats";
const REPO_PAGE_SIZE: u32 = 100;
const COMMIT_SEARCH_PREVIEW: &str = "application/vnd.github.cloak-preview";

const PROFILE_QUERY: &str = r#"
    query($username: String!, $first: Int!) {
        user(login: $username) {
            repositories(first: $first, isFork: false) {
                totalCount
                nodes {
                    name
                    stargazerCount
                    forkCount
                    pushedAt
                }
            }
            followers {
                totalCount
            }
            contributionsCollection {
                contributionCalendar {
                    totalContributions
                }
            }
        }
    }
"#;

#[derive(Deserialize)]
struct CountObj {
    #[serde(rename = "totalCount")]
    total_count: u64,
}

#[derive(Clone)]
pub struct GithubClient {
    token: Arc<String>,
    api_url: Arc<String>,
    http: Client,
}

/// What the single GraphQL query yields.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Profile {
    pub repos: u64,
    pub stars: u64,
    pub most_starred_repo: Option<String>,
    pub followers: u64,
    pub contributions: u64,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LocStats {
    pub additions: u64,
    pub deletions: u64,
    pub commits: u64,
}

impl GithubClient {
    /// `api_url` is the REST root; GraphQL lives at `{api_url}/graphql`.
    pub fn new(token: &str, api_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            token: Arc::new(token.to_string()),
            api_url: Arc::new(api_url.trim_end_matches('/').to_string()),
            http,
        })
    }

    /// Low-level GraphQL request with status and `errors` checking. No retries.
    async fn graphql(&self, query: &str, variables: Value) -> Result<Value> {
        let resp = self
            .http
            .post(format!("{}/graphql", self.api_url))
            .bearer_auth(&*self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| anyhow!("Network error sending GraphQL request: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("GitHub GraphQL error: {}", status.as_u16()));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse JSON from GitHub: {e}"))?;

        if let Some(errors) = json.get("errors").filter(|e| !e.is_null()) {
            return Err(anyhow!("GraphQL reported errors: {errors:#}"));
        }

        Ok(json)
    }

    /// Authenticated REST GET; `what` names the failing call in errors.
    async fn rest_get<T: DeserializeOwned>(
        &self,
        url: &str,
        accept: Option<&str>,
        what: &str,
    ) -> Result<T> {
        let mut req = self.http.get(url).bearer_auth(&*self.token);
        if let Some(accept) = accept {
            req = req.header(ACCEPT, accept);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| anyhow!("Network error requesting {what}: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("GitHub REST API error for {what}: {}", status.as_u16()));
        }

        resp.json()
            .await
            .with_context(|| format!("Failed to deserialize {what} response"))
    }

    /// Repositories (first page only), stars, followers and contribution total.
    pub async fn fetch_profile(&self, username: &str) -> Result<Profile> {
        #[derive(Deserialize)]
        struct ProfileResponse {
            data: Option<ProfileData>,
        }
        #[derive(Deserialize)]
        struct ProfileData {
            user: Option<ProfileUser>,
        }
        #[derive(Deserialize)]
        struct ProfileUser {
            repositories: RepoConnection,
            followers: CountObj,
            #[serde(rename = "contributionsCollection")]
            contributions_collection: ContribCollection,
        }
        #[derive(Deserialize)]
        struct RepoConnection {
            #[serde(rename = "totalCount")]
            total_count: u64,
            nodes: Option<Vec<RepoNode>>,
        }
        #[derive(Deserialize)]
        struct RepoNode {
            name: String,
            #[serde(rename = "stargazerCount")]
            stargazer_count: u64,
        }
        #[derive(Deserialize)]
        struct ContribCollection {
            #[serde(rename = "contributionCalendar")]
            contribution_calendar: ContribCalendar,
        }
        #[derive(Deserialize)]
        struct ContribCalendar {
            #[serde(rename = "totalContributions")]
            total_contributions: u64,
        }

        let variables = json!({ "username": username, "first": REPO_PAGE_SIZE });
        let json = self.graphql(PROFILE_QUERY, variables).await?;
        let parsed: ProfileResponse =
            serde_json::from_value(json).context("Failed to deserialize profile response")?;

        let user = parsed
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| anyhow!("GitHub user {username} not found"))?;

        let nodes = user.repositories.nodes.unwrap_or_default();
        let stars = nodes.iter().map(|n| n.stargazer_count).sum();
        let most_starred_repo =
            most_starred(nodes.iter().map(|n| (n.name.as_str(), n.stargazer_count)))
                .map(str::to_string);

        Ok(Profile {
            repos: user.repositories.total_count,
            stars,
            most_starred_repo,
            followers: user.followers.total_count,
            contributions: user
                .contributions_collection
                .contribution_calendar
                .total_contributions,
        })
    }

    /// Additions/deletions over the commits found by the author search,
    /// fetched one commit at a time. Any failed detail request aborts.
    pub async fn fetch_line_changes(&self, username: &str) -> Result<LocStats> {
        #[derive(Deserialize)]
        struct SearchResponse {
            #[serde(default)]
            items: Vec<SearchItem>,
        }
        #[derive(Deserialize)]
        struct SearchItem {
            url: String,
        }
        #[derive(Deserialize)]
        struct CommitDetail {
            stats: Option<CommitStats>,
        }
        #[derive(Deserialize, Default)]
        struct CommitStats {
            additions: u64,
            deletions: u64,
        }

        let search_url = Url::parse_with_params(
            &format!("{}/search/commits", self.api_url),
            &[("q", format!("author:{username}"))],
        )
        .context("Invalid GitHub API URL")?;
        let search: SearchResponse = self
            .rest_get(search_url.as_str(), Some(COMMIT_SEARCH_PREVIEW), "commit search")
            .await?;

        let mut total = LocStats::default();
        for item in search.items {
            let detail: CommitDetail = self
                .rest_get(&item.url, None, &format!("commit {}", item.url))
                .await?;
            let stats = detail.stats.unwrap_or_default();
            debug!(
                url = %item.url,
                additions = stats.additions,
                deletions = stats.deletions,
                "Fetched commit"
            );

            total.additions = total.additions.saturating_add(stats.additions);
            total.deletions = total.deletions.saturating_add(stats.deletions);
            total.commits += 1;
        }

        Ok(total)
    }

    /// Everything the template needs, or the first error encountered.
    pub async fn fetch_stats(&self, username: &str) -> Result<Stats> {
        let profile = self.fetch_profile(username).await?;
        info!(
            repos = profile.repos,
            stars = profile.stars,
            followers = profile.followers,
            contributions = profile.contributions,
            "Fetched GitHub profile"
        );

        let loc = self.fetch_line_changes(username).await?;
        info!(
            commits = loc.commits,
            additions = loc.additions,
            deletions = loc.deletions,
            "Fetched commit line changes"
        );

        let estimates = PlaceholderEstimates::from_contributions(profile.contributions);
        debug!(
            pull_requests_merged = estimates.pull_requests_merged,
            issues_opened = estimates.issues_opened,
            weekend_commits = estimates.weekend_commits,
            todos_added = estimates.todos_added,
            rubber_duck_conversations = estimates.rubber_duck_conversations,
            most_edited_file = estimates.most_edited_file,
            busiest_hour = estimates.busiest_hour,
            longest_streak = estimates.longest_streak,
            favorite_emoji = estimates.favorite_emoji,
            "Placeholder estimates (not GitHub data)"
        );

        Ok(Stats {
            repos: profile.repos,
            stars: profile.stars,
            most_starred_repo: profile.most_starred_repo,
            followers: profile.followers,
            contributions: profile.contributions,
            additions: loc.additions,
            deletions: loc.deletions,
            estimates,
        })
    }
}
