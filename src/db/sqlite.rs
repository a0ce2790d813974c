use crate::db::models::{DbConnectionRequest, DbLead, DbUserSettings};
use crate::db::schema::SQLITE_INIT;
use crate::error::OutreachError;
use crate::types::{ConnectionRequest, Lead, non_empty};
use chrono::Utc;
use serde::Serialize;
use sqlx::{Pool, Sqlite, SqliteConnection};

pub type SqlitePool = Pool<Sqlite>;

/// Outcome of a bulk save: rows without an id are inserted, rows with one are updated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SaveSummary {
    pub inserted: usize,
    pub updated: usize,
    /// Blank new rows, and ids that matched no row owned by the caller.
    pub skipped: usize,
}

#[derive(Clone)]
pub struct OutreachStorage {
    pool: SqlitePool,
}

impl OutreachStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), OutreachError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ---- leads ----

    pub async fn list_leads(&self, user_id: &str) -> Result<Vec<DbLead>, OutreachError> {
        let rows = sqlx::query_as::<_, DbLead>(
            r#"SELECT id, user_id, email, firstname, lastname, linkedin, template,
               email_signature, created_at
               FROM leads WHERE user_id = ? ORDER BY created_at, id"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert new leads and update existing ones in a single transaction.
    pub async fn save_leads(
        &self,
        user_id: &str,
        leads: &[Lead],
    ) -> Result<SaveSummary, OutreachError> {
        let mut tx = self.pool.begin().await?;
        let mut summary = SaveSummary::default();

        for lead in leads {
            match lead.id {
                Some(id) => {
                    if Self::update_lead(&mut tx, user_id, id, lead).await? {
                        summary.updated += 1;
                    } else {
                        summary.skipped += 1;
                    }
                }
                None if lead.has_data() => {
                    Self::insert_lead(&mut tx, user_id, lead).await?;
                    summary.inserted += 1;
                }
                None => summary.skipped += 1,
            }
        }

        tx.commit().await?;
        Ok(summary)
    }

    async fn insert_lead(
        conn: &mut SqliteConnection,
        user_id: &str,
        lead: &Lead,
    ) -> Result<i64, OutreachError> {
        let res = sqlx::query(
            r#"INSERT INTO leads (
                user_id, email, firstname, lastname, linkedin, template,
                email_signature, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(user_id)
        .bind(non_empty(&lead.email))
        .bind(non_empty(&lead.firstname))
        .bind(non_empty(&lead.lastname))
        .bind(non_empty(&lead.linkedin))
        .bind(non_empty(&lead.template))
        .bind(non_empty(&lead.email_signature))
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;
        Ok(res.last_insert_rowid())
    }

    async fn update_lead(
        conn: &mut SqliteConnection,
        user_id: &str,
        id: i64,
        lead: &Lead,
    ) -> Result<bool, OutreachError> {
        let res = sqlx::query(
            r#"UPDATE leads SET
                email = ?,
                firstname = ?,
                lastname = ?,
                linkedin = ?,
                template = ?,
                email_signature = ?
              WHERE id = ? AND user_id = ?"#,
        )
        .bind(non_empty(&lead.email))
        .bind(non_empty(&lead.firstname))
        .bind(non_empty(&lead.lastname))
        .bind(non_empty(&lead.linkedin))
        .bind(non_empty(&lead.template))
        .bind(non_empty(&lead.email_signature))
        .bind(id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Returns false when no row with this id belongs to the user.
    pub async fn delete_lead(&self, user_id: &str, id: i64) -> Result<bool, OutreachError> {
        let res = sqlx::query("DELETE FROM leads WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // ---- connection requests ----

    pub async fn list_connections(
        &self,
        user_id: &str,
    ) -> Result<Vec<DbConnectionRequest>, OutreachError> {
        let rows = sqlx::query_as::<_, DbConnectionRequest>(
            r#"SELECT id, user_id, number_of_employees, company_name, school, job_title,
               created_at
               FROM connection_requests WHERE user_id = ? ORDER BY created_at, id"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn save_connections(
        &self,
        user_id: &str,
        connections: &[ConnectionRequest],
    ) -> Result<SaveSummary, OutreachError> {
        let mut tx = self.pool.begin().await?;
        let mut summary = SaveSummary::default();

        for connection in connections {
            match connection.id {
                Some(id) => {
                    let res = sqlx::query(
                        r#"UPDATE connection_requests SET
                            number_of_employees = ?,
                            company_name = ?,
                            school = ?,
                            job_title = ?
                          WHERE id = ? AND user_id = ?"#,
                    )
                    .bind(connection.number_of_employees)
                    .bind(non_empty(&connection.company_name))
                    .bind(non_empty(&connection.school))
                    .bind(non_empty(&connection.job_title))
                    .bind(id)
                    .bind(user_id)
                    .execute(&mut *tx)
                    .await?;
                    if res.rows_affected() > 0 {
                        summary.updated += 1;
                    } else {
                        summary.skipped += 1;
                    }
                }
                None if connection.has_data() => {
                    sqlx::query(
                        r#"INSERT INTO connection_requests (
                            user_id, number_of_employees, company_name, school,
                            job_title, created_at
                        ) VALUES (?, ?, ?, ?, ?, ?)"#,
                    )
                    .bind(user_id)
                    .bind(connection.number_of_employees)
                    .bind(non_empty(&connection.company_name))
                    .bind(non_empty(&connection.school))
                    .bind(non_empty(&connection.job_title))
                    .bind(Utc::now())
                    .execute(&mut *tx)
                    .await?;
                    summary.inserted += 1;
                }
                None => summary.skipped += 1,
            }
        }

        tx.commit().await?;
        Ok(summary)
    }

    pub async fn delete_connection(&self, user_id: &str, id: i64) -> Result<bool, OutreachError> {
        let res = sqlx::query("DELETE FROM connection_requests WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    // ---- user settings ----

    pub async fn load_settings(
        &self,
        user_id: &str,
    ) -> Result<Option<DbUserSettings>, OutreachError> {
        let row = sqlx::query_as::<_, DbUserSettings>(
            r#"SELECT id, user_id, resume_url, resume_filename, created_at, updated_at
               FROM user_settings WHERE user_id = ?"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Upsert by unique user_id.
    pub async fn save_resume(
        &self,
        user_id: &str,
        resume_url: &str,
        resume_filename: &str,
    ) -> Result<DbUserSettings, OutreachError> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO user_settings (
                user_id, resume_url, resume_filename, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                resume_url=excluded.resume_url,
                resume_filename=excluded.resume_filename,
                updated_at=excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(resume_url)
        .bind(resume_filename)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.load_settings(user_id)
            .await?
            .ok_or(OutreachError::NotFound("user settings"))
    }

    /// Returns false when the user has no settings row.
    pub async fn clear_resume(&self, user_id: &str) -> Result<bool, OutreachError> {
        let res = sqlx::query(
            r#"UPDATE user_settings SET
                resume_url = NULL,
                resume_filename = NULL,
                updated_at = ?
              WHERE user_id = ?"#,
        )
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
