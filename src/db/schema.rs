//! SQL DDL for the outreach tables.
//! Every table carries `user_id`; all reads and writes filter on it.

/// SQLite schema:
/// - `leads`: one row per outreach target
/// - `connection_requests`: prospect research rows
/// - `user_settings`: at most one row per user (`user_id` UNIQUE)
/// Timestamps are stored as RFC3339 text.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS leads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    email TEXT NULL,
    firstname TEXT NULL,
    lastname TEXT NULL,
    linkedin TEXT NULL,
    template TEXT NULL,
    email_signature TEXT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_leads_user_id ON leads(user_id);

CREATE TABLE IF NOT EXISTS connection_requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    number_of_employees INTEGER NULL,
    company_name TEXT NULL,
    school TEXT NULL,
    job_title TEXT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_connection_requests_user_id ON connection_requests(user_id);

CREATE TABLE IF NOT EXISTS user_settings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL UNIQUE,
    resume_url TEXT NULL,
    resume_filename TEXT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
