use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Primary key of a user record
pub type UserId = i64;

/// Capability a user holds on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Mentee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Mentor => "mentor",
            Role::Mentee => "mentee",
        }
    }

    /// Parse a stored role column, ignoring case and surrounding whitespace
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mentor" => Some(Role::Mentor),
            "mentee" => Some(Role::Mentee),
            _ => None,
        }
    }
}

/// Set of roles held by a user
///
/// Users table stores roles as a nullable primary/secondary pair; here the
/// ordering is irrelevant and only membership matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the legacy `role` / `secondary_role` columns
    pub fn from_columns(primary: Option<&str>, secondary: Option<&str>) -> Self {
        primary
            .into_iter()
            .chain(secondary)
            .filter_map(Role::parse)
            .collect()
    }

    pub fn with(mut self, role: Role) -> Self {
        self.0.insert(role);
        self
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_mentor(&self) -> bool {
        self.contains(Role::Mentor)
    }

    pub fn is_mentee(&self) -> bool {
        self.contains(Role::Mentee)
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Experience tier derived from years of experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Seniority {
    #[serde(rename = "Entry")]
    Entry,
    #[serde(rename = "Mid-level")]
    MidLevel,
    #[serde(rename = "Senior")]
    Senior,
}

impl Seniority {
    /// Below 2 years is Entry, 2 through 5 inclusive is Mid-level, above 5 is Senior
    pub fn from_years_of_experience(years: f64) -> Self {
        if years < 2.0 {
            Seniority::Entry
        } else if years <= 5.0 {
            Seniority::MidLevel
        } else {
            Seniority::Senior
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seniority::Entry => "Entry",
            Seniority::MidLevel => "Mid-level",
            Seniority::Senior => "Senior",
        };
        f.write_str(label)
    }
}

/// Read-only projection of a user record used for matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub name: String,
    pub roles: RoleSet,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub profession: Option<String>,
    pub seniority: Seniority,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub preferred_language: Option<String>,
}

/// A mentor profile with its matching history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(flatten)]
    pub profile: Profile,
    /// Creation time of the most recent connection request naming this mentor
    #[serde(default)]
    pub last_matched_at: Option<DateTime<Utc>>,
}

/// Status of a mentorship connection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "pending",
            ConnectionStatus::Accepted => "accepted",
            ConnectionStatus::Rejected => "rejected",
        }
    }

    /// Pending and accepted connections block re-recommendation
    pub fn blocks_recommendation(&self) -> bool {
        !matches!(self, ConnectionStatus::Rejected)
    }
}

/// Mentorship connection between a mentor and a mentee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub mentor_id: UserId,
    pub mentee_id: UserId,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
}

/// Ranked mentor recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    pub id: UserId,
    pub name: String,
    pub expertise: Vec<String>,
    pub profession: Option<String>,
    pub seniority: Seniority,
    pub country: Option<String>,
    pub last_matched_at: Option<DateTime<Utc>>,
    pub similarity_score: f64,
    pub shared_expertise: Vec<String>,
}

impl ScoredCandidate {
    pub fn from_candidate(candidate: Candidate, similarity_score: f64, shared_expertise: Vec<String>) -> Self {
        let Candidate { profile, last_matched_at } = candidate;
        Self {
            id: profile.id,
            name: profile.name,
            expertise: profile.expertise,
            profession: profile.profession,
            seniority: profile.seniority,
            country: profile.country,
            last_matched_at,
            similarity_score,
            shared_expertise,
        }
    }
}

/// Scoring weights, one per factor of the similarity rule table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Multiplied by the Jaccard overlap of expertise tags
    pub expertise: f64,
    pub profession: f64,
    pub seniority_senior: f64,
    pub seniority_mid_level: f64,
    pub seniority_entry: f64,
    pub country_match: f64,
    /// Partial credit for mentors located in another country
    pub country_mismatch: f64,
    pub preferred_language: f64,
}

impl ScoringWeights {
    pub fn seniority(&self, seniority: Seniority) -> f64 {
        match seniority {
            Seniority::Senior => self.seniority_senior,
            Seniority::MidLevel => self.seniority_mid_level,
            Seniority::Entry => self.seniority_entry,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            expertise: 3.0,
            profession: 2.0,
            seniority_senior: 1.5,
            seniority_mid_level: 1.0,
            seniority_entry: 0.0,
            country_match: 2.0,
            country_mismatch: 1.0,
            preferred_language: 1.0,
        }
    }
}
