/// Aggregated GitHub numbers for one user, recomputed on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Non-fork repository total as reported by GitHub.
    pub repos: u64,
    /// Stars summed over the first page (100) of repositories only.
    pub stars: u64,
    pub most_starred_repo: Option<String>,
    pub followers: u64,
    /// Contributions in the current contribution calendar.
    pub contributions: u64,
    pub additions: u64,
    pub deletions: u64,
    pub estimates: PlaceholderEstimates,
}

impl Stats {
    pub fn lines_of_code(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }
}

/// Illustrative figures derived from the contribution count by fixed ratios
/// and hardcoded strings. None of this comes from GitHub data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderEstimates {
    pub pull_requests_merged: u64,
    pub issues_opened: u64,
    pub weekend_commits: u64,
    pub todos_added: u64,
    pub rubber_duck_conversations: u64,
    pub most_edited_file: &'static str,
    pub busiest_hour: &'static str,
    pub longest_streak: &'static str,
    pub favorite_emoji: &'static str,
}

impl PlaceholderEstimates {
    pub fn from_contributions(contributions: u64) -> Self {
        Self {
            pull_requests_merged: fraction(contributions, 30),
            issues_opened: fraction(contributions, 10),
            weekend_commits: fraction(contributions, 20),
            todos_added: fraction(contributions, 5),
            rubber_duck_conversations: fraction(contributions, 3),
            most_edited_file: "README.md",
            busiest_hour: "3 PM",
            longest_streak: "42 days",
            favorite_emoji: "🔥",
        }
    }
}

// floor(n * percent / 100) in integers, so 0.3 etc. never round up through f64.
fn fraction(n: u64, percent: u64) -> u64 {
    n.saturating_mul(percent) / 100
}

/// Name of the repository with the most stars. Ties keep the first one seen.
pub fn most_starred<'a, I>(repos: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut best: Option<(&str, u64)> = None;
    for (name, stars) in repos {
        match best {
            Some((_, top)) if stars <= top => {}
            _ => best = Some((name, stars)),
        }
    }
    best.map(|(name, _)| name)
}
