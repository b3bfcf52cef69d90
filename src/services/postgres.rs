use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use crate::models::{Education, Internship, User, WorkExperience};
use crate::services::store::{RecordStore, StoreError};

const USER_COLUMNS: &str = "id, first_name, last_name, email, phone, location, date_of_birth, \
    gender, bio, current_job_title, current_company, total_experience, expected_salary, \
    education, work_experience, soft_skills, languages, portfolio, linkedin, github, website, \
    job_preferences, technical_skills, experience_level, work_location, remote_work, \
    willing_to_relocate, company_size, job_type, industry_preferences, created_at";

const INTERNSHIP_COLUMNS: &str = "id, title, company, description, location, job_type, \
    duration, salary, skills, experience_level, work_location, company_size, industry, \
    requirements, benefits, application_deadline, start_date, created_at";

const INSERT_INTERNSHIP: &str = r#"
    INSERT INTO internships (
        id, title, company, description, location, job_type, duration, salary, skills,
        experience_level, work_location, company_size, industry, requirements, benefits,
        application_deadline, start_date, created_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, COALESCE($18, NOW()))
"#;

/// PostgreSQL-backed record store for users and internships
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
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

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
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

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        location: row.try_get("location")?,
        date_of_birth: row.try_get("date_of_birth")?,
        gender: row.try_get("gender")?,
        bio: row.try_get("bio")?,
        current_job_title: row.try_get("current_job_title")?,
        current_company: row.try_get("current_company")?,
        total_experience: row.try_get("total_experience")?,
        expected_salary: row.try_get("expected_salary")?,
        education: row.try_get::<Json<Vec<Education>>, _>("education")?.0,
        work_experience: row.try_get::<Json<Vec<WorkExperience>>, _>("work_experience")?.0,
        soft_skills: row.try_get("soft_skills")?,
        languages: row.try_get("languages")?,
        portfolio: row.try_get("portfolio")?,
        linkedin: row.try_get("linkedin")?,
        github: row.try_get("github")?,
        website: row.try_get("website")?,
        job_preferences: row.try_get("job_preferences")?,
        technical_skills: row.try_get("technical_skills")?,
        experience_level: row.try_get("experience_level")?,
        work_location: row.try_get("work_location")?,
        remote_work: row.try_get("remote_work")?,
        willing_to_relocate: row.try_get("willing_to_relocate")?,
        company_size: row.try_get("company_size")?,
        job_type: row.try_get("job_type")?,
        industry_preferences: row.try_get("industry_preferences")?,
        created_at: row.try_get("created_at")?,
    })
}

fn internship_from_row(row: &PgRow) -> Result<Internship, sqlx::Error> {
    Ok(Internship {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        company: row.try_get("company")?,
        description: row.try_get("description")?,
        location: row.try_get("location")?,
        job_type: row.try_get("job_type")?,
        duration: row.try_get("duration")?,
        salary: row.try_get("salary")?,
        skills: row.try_get("skills")?,
        experience_level: row.try_get("experience_level")?,
        work_location: row.try_get("work_location")?,
        company_size: row.try_get("company_size")?,
        industry: row.try_get("industry")?,
        requirements: row.try_get("requirements")?,
        benefits: row.try_get("benefits")?,
        application_deadline: row.try_get("application_deadline")?,
        start_date: row.try_get("start_date")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Map a unique-index violation on email to `Conflict`
fn email_conflict(err: sqlx::Error, email: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Conflict(format!("Email already registered: {}", email))
        }
        _ => StoreError::SqlxError(err),
    }
}

/// Bind `$1..=$30` of a user row, everything except `created_at`
fn bind_user_profile<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    user: &'q User,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.location)
        .bind(&user.date_of_birth)
        .bind(&user.gender)
        .bind(&user.bio)
        .bind(&user.current_job_title)
        .bind(&user.current_company)
        .bind(&user.total_experience)
        .bind(&user.expected_salary)
        .bind(Json(&user.education))
        .bind(Json(&user.work_experience))
        .bind(&user.soft_skills)
        .bind(&user.languages)
        .bind(&user.portfolio)
        .bind(&user.linkedin)
        .bind(&user.github)
        .bind(&user.website)
        .bind(&user.job_preferences)
        .bind(&user.technical_skills)
        .bind(user.experience_level)
        .bind(user.work_location)
        .bind(user.remote_work)
        .bind(user.willing_to_relocate)
        .bind(&user.company_size)
        .bind(&user.job_type)
        .bind(&user.industry_preferences)
}

fn bind_internship<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    internship: &'q Internship,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(internship.id)
        .bind(&internship.title)
        .bind(&internship.company)
        .bind(&internship.description)
        .bind(&internship.location)
        .bind(&internship.job_type)
        .bind(&internship.duration)
        .bind(&internship.salary)
        .bind(&internship.skills)
        .bind(internship.experience_level)
        .bind(internship.work_location)
        .bind(&internship.company_size)
        .bind(&internship.industry)
        .bind(&internship.requirements)
        .bind(&internship.benefits)
        .bind(&internship.application_deadline)
        .bind(&internship.start_date)
        .bind(internship.created_at)
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn insert_user(&self, user: User) -> Result<Uuid, StoreError> {
        let query = r#"
            INSERT INTO users (
                id, first_name, last_name, email, phone, location, date_of_birth, gender, bio,
                current_job_title, current_company, total_experience, expected_salary, education,
                work_experience, soft_skills, languages, portfolio, linkedin, github, website,
                job_preferences, technical_skills, experience_level, work_location, remote_work,
                willing_to_relocate, company_size, job_type, industry_preferences, created_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18,
                $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, COALESCE($31, NOW())
            )
        "#;

        bind_user_profile(sqlx::query(query), &user)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| email_conflict(e, &user.email))?;

        tracing::debug!("Inserted user {}", user.id);

        Ok(user.id)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", id)))?;

        Ok(user_from_row(&row)?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let query = format!("SELECT {} FROM users WHERE LOWER(email) = LOWER($1)", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("User with email {} not found", email)))?;

        Ok(user_from_row(&row)?)
    }

    async fn update_user(&self, user: User) -> Result<(), StoreError> {
        let query = r#"
            UPDATE users SET
                first_name = $2, last_name = $3, email = $4, phone = $5, location = $6,
                date_of_birth = $7, gender = $8, bio = $9, current_job_title = $10,
                current_company = $11, total_experience = $12, expected_salary = $13,
                education = $14, work_experience = $15, soft_skills = $16, languages = $17,
                portfolio = $18, linkedin = $19, github = $20, website = $21,
                job_preferences = $22, technical_skills = $23, experience_level = $24,
                work_location = $25, remote_work = $26, willing_to_relocate = $27,
                company_size = $28, job_type = $29, industry_preferences = $30
            WHERE id = $1
        "#;

        let result = bind_user_profile(sqlx::query(query), &user)
            .execute(&self.pool)
            .await
            .map_err(|e| email_conflict(e, &user.email))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("User {} not found", user.id)));
        }

        Ok(())
    }

    async fn insert_internship(&self, internship: Internship) -> Result<Uuid, StoreError> {
        bind_internship(sqlx::query(INSERT_INTERNSHIP), &internship)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Inserted internship {}", internship.id);

        Ok(internship.id)
    }

    async fn insert_internships(&self, internships: Vec<Internship>) -> Result<usize, StoreError> {
        let mut tx = self.pool.begin().await?;

        for internship in &internships {
            bind_internship(sqlx::query(INSERT_INTERNSHIP), internship)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("Seeded {} internships", internships.len());

        Ok(internships.len())
    }

    async fn get_internship(&self, id: Uuid) -> Result<Internship, StoreError> {
        let query = format!("SELECT {} FROM internships WHERE id = $1", INTERNSHIP_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("Internship {} not found", id)))?;

        Ok(internship_from_row(&row)?)
    }

    async fn list_internships(&self) -> Result<Vec<Internship>, StoreError> {
        let query = format!("SELECT {} FROM internships ORDER BY seq", INTERNSHIP_COLUMNS);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        let internships = rows
            .iter()
            .map(internship_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} internships", internships.len());

        Ok(internships)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
