//! Placeholder substitution for the profile README template.
//!
//! Recognized tokens (kept stable for existing templates):
//!
//! | token         | value                                   |
//! |---------------|-----------------------------------------|
//! | `{yy}`        | years since birth date                  |
//! | `{mm}`        | months                                  |
//! | `{dd}`        | days                                    |
//! | `{hh}`        | hours                                   |
//! | `{min}`       | minutes                                 |
//! | `{repos}`     | non-fork repository count               |
//! | `{commits}`   | contributions in the current calendar   |
//! | `{stars}`     | stars over the first 100 repositories   |
//! | `{follower}`  | follower count                          |
//! | `{loc}`       | additions + deletions                   |
//! | `{additions}` | lines added                             |
//! | `{deletions}` | lines deleted                           |
//!
//! Only the first occurrence of each token is replaced; later duplicates
//! stay literal. Unknown tokens are left untouched.

use crate::age::ElapsedTime;
use crate::stats::Stats;

/// Flat record of every value a template can reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateData {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub repos: u64,
    pub commits: u64,
    pub stars: u64,
    pub followers: u64,
    pub loc: u64,
    pub additions: u64,
    pub deletions: u64,
}

impl TemplateData {
    pub fn new(elapsed: ElapsedTime, stats: &Stats) -> Self {
        Self {
            years: elapsed.years,
            months: elapsed.months,
            days: elapsed.days,
            hours: elapsed.hours,
            minutes: elapsed.minutes,
            repos: stats.repos,
            commits: stats.contributions,
            stars: stats.stars,
            followers: stats.followers,
            loc: stats.lines_of_code(),
            additions: stats.additions,
            deletions: stats.deletions,
        }
    }

    fn replacements(&self) -> [(&'static str, String); 12] {
        [
            ("{yy}", self.years.to_string()),
            ("{mm}", self.months.to_string()),
            ("{dd}", self.days.to_string()),
            ("{hh}", self.hours.to_string()),
            ("{min}", self.minutes.to_string()),
            ("{repos}", self.repos.to_string()),
            ("{commits}", self.commits.to_string()),
            ("{stars}", self.stars.to_string()),
            ("{follower}", self.followers.to_string()),
            ("{loc}", self.loc.to_string()),
            ("{additions}", self.additions.to_string()),
            ("{deletions}", self.deletions.to_string()),
        ]
    }
}

pub fn fill_template(template: &str, data: &TemplateData) -> String {
    data.replacements()
        .iter()
        .fold(template.to_string(), |text, (token, value)| {
            text.replacen(token, value, 1)
        })
}
