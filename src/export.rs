//! Plain-text rendering of a single day, offered as a `.txt` download.

use crate::models::{FocusSession, Record};
use serde_json::{Number, Value};
use std::fmt;

const BANNER: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const DEFAULT_TASK: &str = "任务";

pub fn export_filename(date: &str) -> String {
    format!("record_{date}.txt")
}

/// `Content-Disposition` value with the filename as a quoted-string.
pub fn attachment_disposition(date: &str) -> String {
    let filename = export_filename(date)
        .replace('\\', "\\\\")
        .replace('"', "\\\"");
    format!("attachment; filename=\"{filename}\"")
}

pub fn format_record(record: &Record) -> String {
    Report(record).to_string()
}

struct Report<'a>(&'a Record);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;

        writeln!(f, "{BANNER}\n📅 每日记录 - {}\n{BANNER}\n", record.date())?;

        if !record.keywords().is_empty() {
            writeln!(f, "🏷️  关键词: {}\n", record.keywords().join(", "))?;
        }

        writeln!(f, "✅ 今天做了什么:\n{}\n\n📋 明天打算做:", record.today_done())?;
        for (index, plan) in record.tomorrow_plan().iter().enumerate() {
            writeln!(f, "  {}. {plan}", index + 1)?;
        }

        if !record.insights().is_empty() {
            writeln!(f, "\n💭 感悟:\n{}", record.insights())?;
        }

        let sessions = record.focus_sessions();
        if !sessions.is_empty() {
            writeln!(f, "\n⏱️  今日专注时长: {}分钟", total_minutes(sessions))?;
            writeln!(f, "📊 专注记录:")?;
            for session in sessions {
                writeln!(
                    f,
                    "  • {}分钟 - {}",
                    Minutes::of(session),
                    session.task_label().unwrap_or(DEFAULT_TASK)
                )?;
            }
        }

        writeln!(f, "\n{BANNER}")
    }
}

pub fn total_minutes(sessions: &[FocusSession]) -> Minutes {
    sessions
        .iter()
        .map(Minutes::of)
        .fold(Minutes::Whole(0), Minutes::plus)
}

/// Durations stay integral until a float shows up; floats print with a
/// fractional part (`25.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Minutes {
    Whole(i64),
    Fractional(f64),
}

impl Minutes {
    // Non-numeric or absent durations count as zero.
    fn of(session: &FocusSession) -> Self {
        match &session.duration {
            Some(Value::Number(number)) => Self::from_number(number),
            _ => Self::Whole(0),
        }
    }

    fn from_number(number: &Number) -> Self {
        match number.as_i64() {
            Some(whole) => Self::Whole(whole),
            None => Self::Fractional(number.as_f64().unwrap_or(0.0)),
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Self::Whole(value) => value as f64,
            Self::Fractional(value) => value,
        }
    }

    fn plus(self, other: Self) -> Self {
        match (self, other) {
            (Self::Whole(a), Self::Whole(b)) => Self::Whole(a.saturating_add(b)),
            (a, b) => Self::Fractional(a.as_f64() + b.as_f64()),
        }
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whole(value) => write!(f, "{value}"),
            Self::Fractional(value) => write!(f, "{value:?}"),
        }
    }
}
