//! Habit/category/log repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `habits`, `categories` and `habit_logs`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths run the matching validator before SQL mutations.
//! - Read paths reject invalid persisted state with `RepoError::InvalidData`.
//! - Habits are archived (`is_active = 0`), never hard deleted by callers.

use crate::db::DbError;
use crate::model::category::{CategoryId, HabitCategory};
use crate::model::habit::{Habit, HabitId, HabitKind, HabitSchedule};
use crate::model::habit_log::{HabitLog, LogId};
use crate::validation::category_validation::validate_category;
use crate::validation::habit_validation::validate_habit;
use crate::validation::log_validation::validate_log;
use crate::validation::ValidationError;
use chrono::{NaiveDate, TimeZone, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const HABIT_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    emoji,
    color_hex,
    kind,
    unit_label,
    daily_target,
    schedule,
    start_date,
    end_date,
    is_active,
    category_id,
    display_order
FROM habits";

const CATEGORY_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    display_name,
    emoji,
    sort_order,
    is_active,
    is_predefined
FROM categories";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for habit, category, log and profile persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound(Uuid),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for habits and their categories and logs.
pub trait HabitRepository {
    fn create_habit(&self, habit: &Habit) -> RepoResult<HabitId>;
    fn update_habit(&self, habit: &Habit) -> RepoResult<()>;
    fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>>;
    /// Sorted by `display_order ASC, name ASC`.
    fn list_habits(&self, include_inactive: bool) -> RepoResult<Vec<Habit>>;
    fn archive_habit(&self, id: HabitId) -> RepoResult<()>;
    fn count_active_habits(&self) -> RepoResult<usize>;
    fn create_category(&self, category: &HabitCategory) -> RepoResult<CategoryId>;
    /// Sorted by `order ASC, name ASC`.
    fn list_categories(&self) -> RepoResult<Vec<HabitCategory>>;
    /// Validates the log against its owning habit before insert.
    fn create_log(&self, log: &HabitLog) -> RepoResult<LogId>;
    /// Sorted by date ascending.
    fn list_logs(&self, habit_id: HabitId) -> RepoResult<Vec<HabitLog>>;
    /// Removes every habit, log and category.
    fn clear_all(&self) -> RepoResult<()>;
}

/// SQLite-backed habit repository.
pub struct SqliteHabitRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHabitRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl HabitRepository for SqliteHabitRepository<'_> {
    fn create_habit(&self, habit: &Habit) -> RepoResult<HabitId> {
        validate_habit(habit).into_result()?;

        self.conn.execute(
            "INSERT INTO habits (
                uuid,
                name,
                emoji,
                color_hex,
                kind,
                unit_label,
                daily_target,
                schedule,
                start_date,
                end_date,
                is_active,
                category_id,
                display_order
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13);",
            params![
                habit.id.to_string(),
                habit.name.trim(),
                habit.emoji.as_deref(),
                habit.color_hex.as_str(),
                habit.kind.as_str(),
                habit.unit_label.as_deref(),
                habit.daily_target,
                schedule_to_db(&habit.schedule)?,
                habit.start_date.to_string(),
                habit.end_date.map(|date| date.to_string()),
                bool_to_int(habit.is_active),
                habit.category_id.map(|id| id.to_string()),
                habit.display_order,
            ],
        )?;

        Ok(habit.id)
    }

    fn update_habit(&self, habit: &Habit) -> RepoResult<()> {
        validate_habit(habit).into_result()?;

        let changed = self.conn.execute(
            "UPDATE habits
             SET
                name = ?1,
                emoji = ?2,
                color_hex = ?3,
                kind = ?4,
                unit_label = ?5,
                daily_target = ?6,
                schedule = ?7,
                start_date = ?8,
                end_date = ?9,
                is_active = ?10,
                category_id = ?11,
                display_order = ?12,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?13;",
            params![
                habit.name.trim(),
                habit.emoji.as_deref(),
                habit.color_hex.as_str(),
                habit.kind.as_str(),
                habit.unit_label.as_deref(),
                habit.daily_target,
                schedule_to_db(&habit.schedule)?,
                habit.start_date.to_string(),
                habit.end_date.map(|date| date.to_string()),
                bool_to_int(habit.is_active),
                habit.category_id.map(|id| id.to_string()),
                habit.display_order,
                habit.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(habit.id));
        }
        Ok(())
    }

    fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HABIT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_habit_row(row)?));
        }
        Ok(None)
    }

    fn list_habits(&self, include_inactive: bool) -> RepoResult<Vec<Habit>> {
        let mut stmt = self.conn.prepare(&format!(
            "{HABIT_SELECT_SQL}
             WHERE (?1 = 1 OR is_active = 1)
             ORDER BY display_order ASC, name ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([bool_to_int(include_inactive)])?;
        let mut habits = Vec::new();
        while let Some(row) = rows.next()? {
            habits.push(parse_habit_row(row)?);
        }
        Ok(habits)
    }

    fn archive_habit(&self, id: HabitId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE habits
             SET
                is_active = 0,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn count_active_habits(&self) -> RepoResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM habits WHERE is_active = 1;",
            [],
            |row| row.get(0),
        )?;
        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative habit count `{count}`")))
    }

    fn create_category(&self, category: &HabitCategory) -> RepoResult<CategoryId> {
        validate_category(category).into_result()?;

        self.conn.execute(
            "INSERT INTO categories (
                uuid,
                name,
                display_name,
                emoji,
                sort_order,
                is_active,
                is_predefined
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                category.id.to_string(),
                category.name.trim(),
                category.display_name.as_str(),
                category.emoji.trim(),
                category.order,
                bool_to_int(category.is_active),
                bool_to_int(category.is_predefined),
            ],
        )?;
        Ok(category.id)
    }

    fn list_categories(&self) -> RepoResult<Vec<HabitCategory>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CATEGORY_SELECT_SQL} ORDER BY sort_order ASC, name ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn create_log(&self, log: &HabitLog) -> RepoResult<LogId> {
        let habit = self
            .get_habit(log.habit_id)?
            .ok_or(RepoError::NotFound(log.habit_id))?;
        validate_log(log, &habit).into_result()?;

        self.conn.execute(
            "INSERT INTO habit_logs (uuid, habit_id, logged_at, value)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                log.id.to_string(),
                log.habit_id.to_string(),
                log.date.timestamp_millis(),
                log.value,
            ],
        )?;
        Ok(log.id)
    }

    fn list_logs(&self, habit_id: HabitId) -> RepoResult<Vec<HabitLog>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, habit_id, logged_at, value
             FROM habit_logs
             WHERE habit_id = ?1
             ORDER BY logged_at ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([habit_id.to_string()])?;
        let mut logs = Vec::new();
        while let Some(row) = rows.next()? {
            logs.push(parse_log_row(row)?);
        }
        Ok(logs)
    }

    fn clear_all(&self) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch(
            "DELETE FROM habit_logs;
             DELETE FROM habits;
             DELETE FROM categories;",
        )?;
        tx.commit()?;
        Ok(())
    }
}

fn parse_habit_row(row: &Row<'_>) -> RepoResult<Habit> {
    let kind_text: String = row.get("kind")?;
    let kind = HabitKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid habit kind `{kind_text}` in habits.kind"))
    })?;

    let schedule_text: String = row.get("schedule")?;
    let schedule = serde_json::from_str::<HabitSchedule>(&schedule_text).map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid schedule `{schedule_text}` in habits.schedule: {err}"
        ))
    })?;

    let start_text: String = row.get("start_date")?;
    let end_text: Option<String> = row.get("end_date")?;
    let category_text: Option<String> = row.get("category_id")?;

    let habit = Habit {
        id: parse_uuid(&row.get::<_, String>("uuid")?, "habits.uuid")?,
        name: row.get("name")?,
        emoji: row.get("emoji")?,
        color_hex: row.get("color_hex")?,
        kind,
        unit_label: row.get("unit_label")?,
        daily_target: row.get("daily_target")?,
        schedule,
        start_date: parse_date(&start_text, "habits.start_date")?,
        end_date: end_text
            .map(|text| parse_date(&text, "habits.end_date"))
            .transpose()?,
        is_active: parse_flag(row.get("is_active")?, "habits.is_active")?,
        category_id: category_text
            .map(|text| parse_uuid(&text, "habits.category_id"))
            .transpose()?,
        display_order: row.get("display_order")?,
    };
    validate_habit(&habit)
        .into_result()
        .map_err(|err| stored_row_invalid("habits", habit.id, err))?;
    Ok(habit)
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<HabitCategory> {
    let category = HabitCategory {
        id: parse_uuid(&row.get::<_, String>("uuid")?, "categories.uuid")?,
        name: row.get("name")?,
        display_name: row.get("display_name")?,
        emoji: row.get("emoji")?,
        order: row.get("sort_order")?,
        is_active: parse_flag(row.get("is_active")?, "categories.is_active")?,
        is_predefined: parse_flag(row.get("is_predefined")?, "categories.is_predefined")?,
    };
    validate_category(&category)
        .into_result()
        .map_err(|err| stored_row_invalid("categories", category.id, err))?;
    Ok(category)
}

fn parse_log_row(row: &Row<'_>) -> RepoResult<HabitLog> {
    let logged_at: i64 = row.get("logged_at")?;
    let date = Utc
        .timestamp_millis_opt(logged_at)
        .single()
        .ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid timestamp `{logged_at}` in habit_logs.logged_at"
            ))
        })?;

    Ok(HabitLog {
        id: parse_uuid(&row.get::<_, String>("uuid")?, "habit_logs.uuid")?,
        habit_id: parse_uuid(&row.get::<_, String>("habit_id")?, "habit_logs.habit_id")?,
        date,
        value: row.get("value")?,
    })
}

fn stored_row_invalid(table: &str, id: Uuid, err: ValidationError) -> RepoError {
    RepoError::InvalidData(format!("{table} row {id} fails validation: {}", err.reason))
}

fn schedule_to_db(schedule: &HabitSchedule) -> RepoResult<String> {
    serde_json::to_string(schedule)
        .map_err(|err| RepoError::InvalidData(format!("schedule is not serializable: {err}")))
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn parse_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    value
        .parse::<NaiveDate>()
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{value}` in {column}")))
}

fn parse_flag(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
