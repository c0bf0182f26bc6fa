//! Persistent slot table backed by SQLite.
//!
//! Column names and the 0/1 boolean encoding match the `parking_slots` table
//! of existing `parking.db` files, so an old database can be opened as is.

use crate::domain::error::{Result, SlotError};
use crate::domain::{NewSlot, ParkingSlot, SlotRequirements};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

const SLOT_COLUMNS: &str = "slotNo, isCovered, isEVCharging, isOccupied";

/// Totals shown in the lot summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotCounts {
    pub total: i64,
    pub free: i64,
}

/// Handle to the slot table. Cloning is cheap; clones share one pool.
#[derive(Clone)]
pub struct SlotStore {
    pool: SqlitePool,
}

impl SlotStore {
    /// Opens (creating if needed) the database at `database_url` and ensures the schema.
    ///
    /// In-memory databases live and die with their connection, so they get a
    /// single connection that is never recycled.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .connect_with(options)
                .await?
        };

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the slot table if it does not exist. Safe to call repeatedly.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS parking_slots (
                slotNo INTEGER PRIMARY KEY,
                isCovered BOOLEAN NOT NULL,
                isEVCharging BOOLEAN NOT NULL,
                isOccupied BOOLEAN NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// All slots, ascending by slot number.
    pub async fn list_all(&self) -> Result<Vec<ParkingSlot>> {
        let sql = format!("SELECT {} FROM parking_slots ORDER BY slotNo ASC", SLOT_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(slot_from_row).collect()
    }

    pub async fn find_by_slot_number(&self, slot_no: i64) -> Result<Option<ParkingSlot>> {
        let sql = format!("SELECT {} FROM parking_slots WHERE slotNo = ?", SLOT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(slot_no)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(slot_from_row).transpose()
    }

    /// Inserts a free slot. A taken slot number yields [`SlotError::Conflict`].
    pub async fn insert(&self, new_slot: NewSlot) -> Result<ParkingSlot> {
        let result = sqlx::query(
            "INSERT INTO parking_slots (slotNo, isCovered, isEVCharging, isOccupied)
             VALUES (?, ?, ?, 0)",
        )
        .bind(new_slot.slot_no)
        .bind(new_slot.is_covered)
        .bind(new_slot.is_ev_charging)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(new_slot.into_slot()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(SlotError::Conflict(new_slot.slot_no))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Unconditionally sets the occupancy flag. Returns false when no such slot exists.
    pub async fn set_occupied(&self, slot_no: i64, occupied: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE parking_slots SET isOccupied = ? WHERE slotNo = ?")
            .bind(occupied)
            .bind(slot_no)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Marks the lowest-numbered qualifying free slot occupied and returns it.
    ///
    /// Selection and update happen in one statement, so SQLite's write lock
    /// makes the claim atomic: concurrent callers never get the same slot.
    pub async fn claim_first_free(
        &self,
        requirements: SlotRequirements,
    ) -> Result<Option<ParkingSlot>> {
        let sql = format!(
            "UPDATE parking_slots
             SET isOccupied = 1
             WHERE isOccupied = 0
               AND slotNo = (
                   SELECT slotNo FROM parking_slots
                   WHERE isOccupied = 0
                     AND isEVCharging >= ?
                     AND isCovered >= ?
                   ORDER BY slotNo ASC
                   LIMIT 1
               )
             RETURNING {}",
            SLOT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(requirements.needs_ev)
            .bind(requirements.needs_covered)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(slot_from_row).transpose()
    }

    pub async fn counts(&self) -> Result<SlotCounts> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total,
                    COALESCE(SUM(CASE WHEN isOccupied = 0 THEN 1 ELSE 0 END), 0) AS free
             FROM parking_slots",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(SlotCounts {
            total: row.try_get("total")?,
            free: row.try_get("free")?,
        })
    }

    /// Closes every pooled connection. Called once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn slot_from_row(row: &SqliteRow) -> Result<ParkingSlot> {
    Ok(ParkingSlot {
        slot_no: row.try_get("slotNo")?,
        is_covered: row.try_get("isCovered")?,
        is_ev_charging: row.try_get("isEVCharging")?,
        is_occupied: row.try_get("isOccupied")?,
    })
}
