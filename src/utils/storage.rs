// checkin-service/src/utils/storage.rs
use crate::models::{Member, MemberStatus, MemberUpdate, ServiceError, Team};
use chrono::{Duration, NaiveDateTime, SubsecRound, Utc};
use log::{debug, error, info};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS teams (
        team_id TEXT PRIMARY KEY,
        team_name TEXT NOT NULL,
        members TEXT NOT NULL,
        last_updated TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS members (
        member_id INTEGER PRIMARY KEY AUTOINCREMENT,
        team_id TEXT NOT NULL REFERENCES teams(team_id),
        member_name TEXT NOT NULL,
        check_in INTEGER DEFAULT 0,
        check_out INTEGER DEFAULT 0,
        snacks INTEGER DEFAULT 0,
        dinner INTEGER DEFAULT 0
    );
";

const TEAM_COLUMNS: &str = "team_id, team_name, members, last_updated";
const MEMBER_COLUMNS: &str = "member_id, team_id, member_name, check_in, check_out, snacks, dinner";

// Stored form sorts lexicographically in time order
const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

// Handle to the SQLite database holding `teams` and `members`
pub struct Storage {
    conn: Mutex<Connection>,
}

impl Storage {
    // Open (or create) the database file and make sure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        info!("🗄️ Opening database at {}", path.display());
        let conn = Connection::open(path).map_err(|e| {
            error!("❌ Failed to open database {}: {:?}", path.display(), e);
            ServiceError::from(e)
        })?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, ServiceError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, ServiceError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, ServiceError> {
        self.conn
            .lock()
            .map_err(|e| ServiceError::Storage(format!("Lock error: {:?}", e)))
    }

    // Opaque, non-sequential team identifier
    pub fn new_team_id() -> String {
        Uuid::new_v4().to_string()
    }

    // Insert a team under a fresh id and return that id
    pub fn create_team_and_members(
        &self,
        team_name: &str,
        member_names: &[String],
    ) -> Result<String, ServiceError> {
        let team_id = Self::new_team_id();
        self.insert_team_and_members(&team_id, team_name, member_names)?;
        Ok(team_id)
    }

    // Insert a team and one member row per name in a single transaction
    pub fn insert_team_and_members(
        &self,
        team_id: &str,
        team_name: &str,
        member_names: &[String],
    ) -> Result<(), ServiceError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let stamp = next_stamp(&tx)?;

        tx.execute(
            "INSERT INTO teams (team_id, team_name, members, last_updated) VALUES (?1, ?2, ?3, ?4)",
            params![
                team_id,
                team_name,
                serde_json::to_string(member_names)?,
                format_stamp(stamp)
            ],
        )?;

        {
            let mut insert = tx.prepare("INSERT INTO members (team_id, member_name) VALUES (?1, ?2)")?;
            for name in member_names {
                insert.execute(params![team_id, name])?;
            }
        }

        tx.commit()?;
        debug!("Inserted team {} with {} members", team_id, member_names.len());
        Ok(())
    }

    pub fn get_team(&self, team_id: &str) -> Result<Option<Team>, ServiceError> {
        let conn = self.lock()?;
        find_team(&conn, team_id)
    }

    // Members of a team in insertion order
    pub fn get_members(&self, team_id: &str) -> Result<Vec<Member>, ServiceError> {
        let conn = self.lock()?;
        members_of(&conn, team_id)
    }

    // Full replace of one member's flags
    pub fn update_member_status(&self, member_id: i64, status: &MemberStatus) -> Result<(), ServiceError> {
        let conn = self.lock()?;
        write_member_status(&conn, member_id, status)
    }

    pub fn touch_team(&self, team_id: &str) -> Result<NaiveDateTime, ServiceError> {
        let conn = self.lock()?;
        stamp_team(&conn, team_id)
    }

    pub fn team_id_for_member(&self, member_id: i64) -> Result<Option<String>, ServiceError> {
        let conn = self.lock()?;
        owning_team(&conn, member_id)
    }

    // Most recently updated first
    pub fn list_teams_by_recency(&self) -> Result<Vec<Team>, ServiceError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM teams ORDER BY last_updated DESC, rowid ASC",
            TEAM_COLUMNS
        ))?;
        let teams = stmt
            .query_map([], team_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(teams)
    }

    // Apply a batch atomically: either every member is updated and every
    // owning team stamped, or nothing is written. Returns the touched team ids.
    pub fn apply_member_updates(&self, updates: &[MemberUpdate]) -> Result<Vec<String>, ServiceError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut touched: Vec<String> = Vec::new();

        for update in updates {
            let team_id = owning_team(&tx, update.member_id)?
                .ok_or_else(|| ServiceError::member_not_found(update.member_id))?;
            write_member_status(&tx, update.member_id, &update.status)?;
            if !touched.contains(&team_id) {
                touched.push(team_id);
            }
        }

        for team_id in &touched {
            stamp_team(&tx, team_id)?;
        }

        tx.commit()?;
        Ok(touched)
    }
}

fn find_team(conn: &Connection, team_id: &str) -> Result<Option<Team>, ServiceError> {
    let team = conn
        .query_row(
            &format!("SELECT {} FROM teams WHERE team_id = ?1", TEAM_COLUMNS),
            params![team_id],
            team_from_row,
        )
        .optional()?;
    Ok(team)
}

fn members_of(conn: &Connection, team_id: &str) -> Result<Vec<Member>, ServiceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM members WHERE team_id = ?1 ORDER BY member_id",
        MEMBER_COLUMNS
    ))?;
    let members = stmt
        .query_map(params![team_id], member_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(members)
}

fn owning_team(conn: &Connection, member_id: i64) -> Result<Option<String>, ServiceError> {
    let team_id = conn
        .query_row(
            "SELECT team_id FROM members WHERE member_id = ?1",
            params![member_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(team_id)
}

fn write_member_status(conn: &Connection, member_id: i64, status: &MemberStatus) -> Result<(), ServiceError> {
    let changed = conn.execute(
        "UPDATE members SET check_in = ?1, check_out = ?2, snacks = ?3, dinner = ?4 WHERE member_id = ?5",
        params![
            status.check_in,
            status.check_out,
            status.snacks,
            status.dinner,
            member_id
        ],
    )?;

    if changed == 0 {
        return Err(ServiceError::member_not_found(member_id));
    }
    Ok(())
}

fn stamp_team(conn: &Connection, team_id: &str) -> Result<NaiveDateTime, ServiceError> {
    let stamp = next_stamp(conn)?;
    let changed = conn.execute(
        "UPDATE teams SET last_updated = ?1 WHERE team_id = ?2",
        params![format_stamp(stamp), team_id],
    )?;

    if changed == 0 {
        return Err(ServiceError::team_not_found());
    }
    Ok(stamp)
}

// Current time, pushed past the newest stored stamp so recency order is strict
fn next_stamp(conn: &Connection) -> Result<NaiveDateTime, ServiceError> {
    let now = Utc::now().naive_utc().trunc_subsecs(6);
    let latest: Option<String> = conn.query_row("SELECT MAX(last_updated) FROM teams", [], |row| row.get(0))?;

    let floor = latest
        .as_deref()
        .and_then(|raw| parse_stamp(raw).ok())
        .map(|stamp| stamp + Duration::microseconds(1));

    Ok(match floor {
        Some(floor) if floor > now => floor,
        _ => now,
    })
}

fn format_stamp(stamp: NaiveDateTime) -> String {
    stamp.format(STAMP_FORMAT).to_string()
}

// Also reads second-precision values written by CURRENT_TIMESTAMP
pub(crate) fn parse_stamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
}

fn team_from_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    let raw: String = row.get(3)?;
    let last_updated = parse_stamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Team {
        team_id: row.get(0)?,
        team_name: row.get(1)?,
        members: row.get(2)?,
        last_updated,
    })
}

fn member_from_row(row: &Row<'_>) -> rusqlite::Result<Member> {
    let flag = |idx: usize| -> rusqlite::Result<bool> {
        Ok(row.get::<_, Option<i64>>(idx)?.unwrap_or(0) != 0)
    };

    Ok(Member {
        member_id: row.get(0)?,
        team_id: row.get(1)?,
        member_name: row.get(2)?,
        status: MemberStatus {
            check_in: flag(3)?,
            check_out: flag(4)?,
            snacks: flag(5)?,
            dinner: flag(6)?,
        },
    })
}
