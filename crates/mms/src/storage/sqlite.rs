//! SQLite-backed APN store
//!
//! Mirrors the layout of the carrier database's `carriers` table. Rows are
//! returned in rowid order, which is the order the carrier list was
//! provisioned in.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params};
use rusqlite_migration::{M, Migrations};

use super::traits::{ApnStore, ApnStoreError};
use crate::models::ApnRecord;

fn migrations() -> Migrations<'static> {
    Migrations::new(vec![
        // Migration 1: carriers table
        M::up(
            r#"
            CREATE TABLE carriers (
                _id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL DEFAULT '',
                apn TEXT NOT NULL DEFAULT '',
                type TEXT,
                mmsc TEXT,
                mmsproxy TEXT,
                mmsport TEXT,
                current INTEGER NOT NULL DEFAULT 1
            );

            CREATE INDEX idx_carriers_apn ON carriers(apn);
            "#,
        ),
    ])
}

/// APN store on top of a SQLite `carriers` table
pub struct SqliteApnStore {
    conn: Mutex<Connection>,
    read_only: bool,
}

impl SqliteApnStore {
    /// Open or create a store at `db_path`, migrating the schema
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path.as_ref())
            .with_context(|| format!("Failed to open APN database at {:?}", db_path.as_ref()))?;
        Self::migrated(conn)
    }

    /// In-memory store, mostly for tests
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::migrated(conn)
    }

    /// Open an existing carrier database without touching its schema
    ///
    /// The table may be missing; queries then fail with
    /// [`ApnStoreError::MissingTable`].
    pub fn open_read_only(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open_with_flags(
            db_path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open APN database at {:?}", db_path.as_ref()))?;

        Ok(Self {
            conn: Mutex::new(conn),
            read_only: true,
        })
    }

    fn migrated(mut conn: Connection) -> Result<Self> {
        migrations()
            .to_latest(&mut conn)
            .context("Failed to run APN database migrations")?;

        Ok(Self {
            conn: Mutex::new(conn),
            read_only: false,
        })
    }

    fn has_carriers_table(conn: &Connection) -> Result<bool> {
        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'carriers'",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<ApnRecord> {
        Ok(ApnRecord {
            name: row.get(0)?,
            apn: row.get(1)?,
            apn_type: row.get(2)?,
            mmsc: row.get(3)?,
            mms_proxy: row.get(4)?,
            mms_port: row.get(5)?,
            current: row.get(6)?,
        })
    }
}

impl ApnStore for SqliteApnStore {
    fn current_apns(&self, apn_name: Option<&str>) -> Result<Vec<ApnRecord>> {
        let conn = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        if !Self::has_carriers_table(&conn)? {
            return Err(ApnStoreError::MissingTable.into());
        }

        let mut stmt = conn.prepare(
            "SELECT name, apn, type, mmsc, mmsproxy, mmsport, current FROM carriers
             WHERE current = 1 AND (?1 IS NULL OR apn = ?1)
             ORDER BY _id",
        )?;

        let records = stmt
            .query_map(params![apn_name], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn insert_apn(&self, record: ApnRecord) -> Result<()> {
        if self.read_only {
            return Err(ApnStoreError::ReadOnly.into());
        }

        let conn = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        conn.execute(
            "INSERT INTO carriers (name, apn, type, mmsc, mmsproxy, mmsport, current)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                record.name,
                record.apn,
                record.apn_type,
                record.mmsc,
                record.mms_proxy,
                record.mms_port,
                record.current,
            ],
        )?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.read_only {
            return Err(ApnStoreError::ReadOnly.into());
        }

        let conn = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        conn.execute("DELETE FROM carriers", [])?;
        Ok(())
    }
}
