use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::models::{Candidate, ConnectionStatus, Profile, RoleSet, Seniority, UserId};
use crate::services::repository::{MentorRepository, RepositoryError};

const PROFILE_COLUMNS: &str = r#"
    u.id,
    u.name,
    u.role,
    u.secondary_role,
    u.expertise,
    u.profession,
    u.years_of_experience,
    u.country,
    u.preferred_language,
    ARRAY(
        SELECT t.name
        FROM user_tags ut
        JOIN tags t ON t.id = ut.tag_id
        WHERE ut.user_id = u.id
        ORDER BY t.name
    ) AS tags
"#;

/// PostgreSQL-backed user and connection repository
///
/// Reads the users, tags and mentorship_connections tables owned by the
/// main application. Nothing here writes to them.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, RepositoryError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

#[async_trait]
impl MentorRepository for PostgresClient {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let query = format!(
            r#"
            SELECT {PROFILE_COLUMNS}
            FROM users u
            WHERE u.id = $1
            "#
        );

        let row = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(profile_from_row).transpose().map_err(Into::into)
    }

    /// Single round-trip: role filter, self and exclusion filtering, and the
    /// last-matched timestamp are all resolved inside the query.
    async fn get_mentor_candidates(&self, mentee_id: UserId) -> Result<Vec<Candidate>, RepositoryError> {
        let query = format!(
            r#"
            SELECT {PROFILE_COLUMNS},
                (
                    SELECT MAX(c.created_at)
                    FROM mentorship_connections c
                    WHERE c.mentor_id = u.id
                ) AS last_matched_at
            FROM users u
            WHERE (u.role = 'mentor' OR u.secondary_role = 'mentor')
              AND u.id <> $1
              AND NOT EXISTS (
                  SELECT 1
                  FROM mentorship_connections c
                  WHERE c.mentor_id = u.id
                    AND c.mentee_id = $1
                    AND c.status <> $2
              )
            ORDER BY u.id
            "#
        );

        let rows = sqlx::query(&query)
            .bind(mentee_id)
            .bind(ConnectionStatus::Rejected.as_str())
            .fetch_all(&self.pool)
            .await?;

        let candidates = rows
            .iter()
            .map(|row| {
                Ok(Candidate {
                    profile: profile_from_row(row)?,
                    last_matched_at: row.try_get::<Option<DateTime<Utc>>, _>("last_matched_at")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        tracing::debug!("Mentee {} has {} candidate mentors", mentee_id, candidates.len());

        Ok(candidates)
    }

    async fn health_check(&self) -> Result<bool, RepositoryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Map a users row to a profile
///
/// Expertise is the union of the scalar `expertise` column and the joined tag names.
fn profile_from_row(row: &PgRow) -> Result<Profile, sqlx::Error> {
    let role: Option<String> = row.try_get("role")?;
    let secondary_role: Option<String> = row.try_get("secondary_role")?;
    let scalar_expertise: Option<String> = row.try_get("expertise")?;
    let tags: Vec<String> = row.try_get("tags")?;
    let years: Option<i32> = row.try_get("years_of_experience")?;

    Ok(Profile {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        roles: RoleSet::from_columns(role.as_deref(), secondary_role.as_deref()),
        expertise: merge_expertise(scalar_expertise, tags),
        profession: row.try_get("profession")?,
        seniority: Seniority::from_years_of_experience(f64::from(years.unwrap_or(0))),
        country: row.try_get("country")?,
        preferred_language: row.try_get("preferred_language")?,
    })
}

fn merge_expertise(scalar: Option<String>, tags: Vec<String>) -> Vec<String> {
    let mut expertise: Vec<String> = Vec::with_capacity(tags.len() + 1);

    for value in scalar.into_iter().chain(tags) {
        if !value.trim().is_empty() && !expertise.contains(&value) {
            expertise.push(value);
        }
    }

    expertise
}
