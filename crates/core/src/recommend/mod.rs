//! Education activity recommendations.
//!
//! Ranks the built-in learning catalog for one child using the child's age,
//! program, recent activity tags, stated interests and open developmental
//! milestones. Items outside the child's age range are dropped; the rest are
//! scored by tag overlap and returned best first.

mod catalog;

use std::collections::HashSet;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub use catalog::{activity_details, ActivityDetails, CatalogItem, CATALOG, FALLBACK_DETAILS};

pub const DEFAULT_LIMIT: usize = 6;

const INTEREST_WEIGHT: f64 = 1.2;
const PROGRAM_WEIGHT: f64 = 0.5;
const GAP_WEIGHT: f64 = 0.8;
const SHORT_ACTIVITY_BONUS: f64 = 0.3;
const YOUNG_CHILD_MAX_AGE: u32 = 4;
const SHORT_ACTIVITY_MAX_MINUTES: u32 = 12;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ChildProfile {
    #[serde(
        default,
        rename = "dateOfBirth",
        alias = "date_of_birth",
        deserialize_with = "deserialize_birth_date"
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ActivityRecord {
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    Upcoming,
    Pending,
    Achieved,
    #[default]
    #[serde(other)]
    Other,
}

impl MilestoneStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Upcoming | Self::Pending)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Milestone {
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub status: MilestoneStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub profile: ChildProfile,
    #[serde(default)]
    pub activities: Vec<ActivityRecord>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    #[serde(flatten)]
    pub item: &'a CatalogItem,
    pub score: f64,
}

/// Ranked recommendations, best first. Single pass; collect to reuse.
#[derive(Debug)]
pub struct Recommendations<'a> {
    age: Option<u32>,
    inner: std::iter::Take<std::vec::IntoIter<Recommendation<'a>>>,
}

impl<'a> Recommendations<'a> {
    /// Age used for filtering, `None` when the birth date was unknown.
    pub fn age(&self) -> Option<u32> {
        self.age
    }
}

impl<'a> Iterator for Recommendations<'a> {
    type Item = Recommendation<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Recommendations<'_> {}

#[derive(Clone, Copy, Debug)]
pub struct Ranker<'a> {
    catalog: &'a [CatalogItem],
    limit: usize,
}

impl Default for Ranker<'static> {
    fn default() -> Self {
        Self { catalog: &CATALOG, limit: DEFAULT_LIMIT }
    }
}

impl<'a> Ranker<'a> {
    pub fn with_catalog(catalog: &'a [CatalogItem]) -> Self {
        Self { catalog, limit: DEFAULT_LIMIT }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn rank(&self, request: &RecommendationRequest, today: NaiveDate) -> Recommendations<'a> {
        let age = request.profile.date_of_birth.map(|dob| age_in_years(dob, today));
        let signals = Signals::from_request(request);

        let mut ranked: Vec<Recommendation<'a>> = self
            .catalog
            .iter()
            .filter(|item| age.map_or(true, |age| item.suits_age(age)))
            .map(|item| Recommendation { item, score: signals.score(item, age) })
            .collect();

        // sort_by is stable: equal scores keep catalog order
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        Recommendations { age, inner: ranked.into_iter().take(self.limit) }
    }
}

/// Ranks the built-in catalog as of `today`.
pub fn recommend(request: &RecommendationRequest, today: NaiveDate) -> Recommendations<'static> {
    Ranker::default().rank(request, today)
}

/// Ranks the built-in catalog as of the current UTC date.
pub fn recommend_now(request: &RecommendationRequest) -> Recommendations<'static> {
    recommend(request, Utc::now().date_naive())
}

/// Whole years between `birth` and `today`, floored at zero.
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).unwrap_or(0)
}

struct Signals {
    interests: HashSet<String>,
    program: String,
    gaps: HashSet<String>,
}

impl Signals {
    fn from_request(request: &RecommendationRequest) -> Self {
        let interests = request
            .activities
            .iter()
            .flat_map(|activity| activity.tags.iter())
            .chain(request.profile.interests.iter())
            .map(|tag| tag.to_lowercase())
            .collect();

        let gaps = request
            .milestones
            .iter()
            .filter(|milestone| milestone.status.is_open())
            .map(|milestone| milestone.area.as_deref().unwrap_or_default().to_lowercase())
            .collect();

        Self {
            interests,
            program: request.profile.program.as_deref().unwrap_or_default().to_lowercase(),
            gaps,
        }
    }

    fn score(&self, item: &CatalogItem, age: Option<u32>) -> f64 {
        let mut score = 0.0;
        for tag in item.tags {
            if self.interests.contains(*tag) {
                score += INTEREST_WEIGHT;
            }
            if self.program == *tag {
                score += PROGRAM_WEIGHT;
            }
            if self.gaps.contains(*tag) {
                score += GAP_WEIGHT;
            }
        }

        let young = age.map_or(false, |age| age <= YOUNG_CHILD_MAX_AGE);
        if young && item.duration_minutes <= SHORT_ACTIVITY_MAX_MINUTES {
            score += SHORT_ACTIVITY_BONUS;
        }
        score
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; blank strings and null mean unknown.
fn deserialize_birth_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = raw.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
    else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|timestamp| Some(timestamp.date_naive()))
        .map_err(|_| serde::de::Error::custom(format!("invalid dateOfBirth `{raw}`")))
}
