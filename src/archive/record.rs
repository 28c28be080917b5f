//! Set records and their validation.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};

use crate::csv_table::{join_list, split_list, Row};
use crate::error::{FieldError, LiftlogError, Result};

/// Canonical header of `workouts.csv`.
pub const SET_HEADER: &[&str] = &[
    "workout_id",
    "date",
    "start_time",
    "movement_id",
    "movement_name",
    "set_number",
    "set_type",
    "cluster_id",
    "reps",
    "load",
    "unit",
    "rest_seconds",
    "rpe",
    "tags",
    "notes",
    "created_at",
];

/// Set types that do not trigger a warning.
pub const KNOWN_SET_TYPES: &[&str] = &[
    "normal",
    "work",
    "warmup",
    "ramp",
    "heavy",
    "drop",
    "backoff",
    "amrap",
    "superset",
    "rest-pause",
    "failure",
    "accessory",
];

/// Set type used when none is given.
pub const DEFAULT_SET_TYPE: &str = "work";

/// Date format of the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format of the `start_time` column.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Timestamp format of the `created_at` column.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Check whether a set type is one of [`KNOWN_SET_TYPES`].
pub fn is_known_set_type(set_type: &str) -> bool {
    KNOWN_SET_TYPES.contains(&set_type)
}

/// Generate a short random workout id (8 hex chars).
pub fn generate_workout_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Format a number without a trailing `.0` for whole values.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Repetitions performed in a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reps {
    /// A counted number of reps.
    Count(u32),
    /// As many reps as possible, count not recorded.
    Amrap,
}

impl Reps {
    /// Parse a reps value: a non-negative integer or `AMRAP`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("amrap") {
            return Some(Self::Amrap);
        }
        s.parse::<u32>().ok().map(Self::Count)
    }

    /// The rep count, if one was recorded.
    pub fn count(&self) -> Option<u32> {
        match self {
            Self::Count(n) => Some(*n),
            Self::Amrap => None,
        }
    }
}

impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::Amrap => write!(f, "AMRAP"),
        }
    }
}

impl Serialize for Reps {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u32(*n),
            Self::Amrap => serializer.serialize_str("AMRAP"),
        }
    }
}

/// One stored row of `workouts.csv`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetRecord {
    pub workout_id: String,
    pub date: String,
    pub start_time: String,
    pub movement_id: String,
    /// Movement name when the set was logged; never updated afterwards.
    pub movement_name: String,
    pub set_number: u32,
    pub set_type: String,
    pub cluster_id: String,
    pub reps: Option<Reps>,
    pub load: Option<f64>,
    pub unit: String,
    pub rest_seconds: Option<u32>,
    pub rpe: Option<f64>,
    pub tags: Vec<String>,
    pub notes: String,
    pub created_at: String,
}

impl SetRecord {
    /// `reps × load` when both are numeric.
    pub fn volume(&self) -> Option<f64> {
        let reps = self.reps?.count()?;
        Some(f64::from(reps) * self.load?)
    }

    /// Encode as a CSV row in header order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.workout_id.clone(),
            self.date.clone(),
            self.start_time.clone(),
            self.movement_id.clone(),
            self.movement_name.clone(),
            self.set_number.to_string(),
            self.set_type.clone(),
            self.cluster_id.clone(),
            self.reps.map(|r| r.to_string()).unwrap_or_default(),
            self.load.map(format_number).unwrap_or_default(),
            self.unit.clone(),
            self.rest_seconds.map(|r| r.to_string()).unwrap_or_default(),
            self.rpe.map(format_number).unwrap_or_default(),
            join_list(&self.tags),
            self.notes.clone(),
            self.created_at.clone(),
        ]
    }

    /// Decode from a header-checked CSV row.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the line and the fields that do
    /// not parse.
    pub fn from_row(row: &Row) -> Result<Self> {
        let mut errors = Vec::new();
        let set_number = match row.field(5).trim().parse::<u32>() {
            Ok(n) => n,
            Err(_) => {
                errors.push(FieldError::new("set_number", "not an integer"));
                0
            }
        };
        let reps = parse_optional(row.field(8), "reps", Reps::parse, &mut errors);
        let load = parse_optional(row.field(9), "load", |s| s.parse().ok(), &mut errors);
        let rest_seconds =
            parse_optional(row.field(11), "rest_seconds", |s| s.parse().ok(), &mut errors);
        let rpe = parse_optional(row.field(12), "rpe", |s| s.parse().ok(), &mut errors);

        if !errors.is_empty() {
            for e in &mut errors {
                e.message = format!("{} (line {})", e.message, row.line);
            }
            return Err(LiftlogError::Validation { errors });
        }

        Ok(Self {
            workout_id: row.field(0).trim().to_string(),
            date: row.field(1).trim().to_string(),
            start_time: row.field(2).trim().to_string(),
            movement_id: row.field(3).trim().to_string(),
            movement_name: row.field(4).to_string(),
            set_number,
            set_type: row.field(6).to_string(),
            cluster_id: row.field(7).to_string(),
            reps,
            load,
            unit: row.field(10).to_string(),
            rest_seconds,
            rpe,
            tags: split_list(row.field(13)),
            notes: row.field(14).to_string(),
            created_at: row.field(15).to_string(),
        })
    }

    /// Parse the `created_at` column.
    pub fn created_at_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }

    /// Parse the `date` column.
    pub fn date_value(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

fn parse_optional<T>(
    raw: &str,
    field: &str,
    parse: impl Fn(&str) -> Option<T>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = parse(raw);
    if parsed.is_none() {
        errors.push(FieldError::new(field, format!("cannot parse '{}'", raw)));
    }
    parsed
}

/// Raw, unvalidated set fields as typed by the user.
///
/// Empty strings count as "not given".
#[derive(Debug, Clone, Default)]
pub struct SetInput {
    pub workout_id: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub movement_id: String,
    pub set_number: String,
    pub set_type: Option<String>,
    pub cluster_id: Option<String>,
    pub reps: Option<String>,
    pub load: Option<String>,
    pub unit: Option<String>,
    pub rest_seconds: Option<String>,
    pub rpe: Option<String>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

/// A validated set, ready to append.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSet {
    pub workout_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub movement_id: String,
    pub set_number: u32,
    pub set_type: String,
    pub cluster_id: String,
    pub reps: Option<Reps>,
    pub load: Option<f64>,
    /// Falls back to the movement's default unit when `None`.
    pub unit: Option<String>,
    pub rest_seconds: Option<u32>,
    pub rpe: Option<f64>,
    pub tags: Vec<String>,
    pub notes: String,
}

fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

impl SetInput {
    /// Validate every field, collecting all problems at once.
    ///
    /// `now` supplies the date and start time when they are not given.
    /// `rpe_max` is the top of the RPE scale.
    pub fn validate(&self, now: NaiveDateTime, rpe_max: f64) -> Result<NewSet> {
        let mut errors = Vec::new();

        let movement_id = self.movement_id.trim().to_string();
        if movement_id.is_empty() {
            errors.push(FieldError::new("movement_id", "is required"));
        }

        let workout_id = match &self.workout_id {
            Some(raw) if raw.trim().is_empty() => {
                errors.push(FieldError::new("workout_id", "must not be blank"));
                String::new()
            }
            Some(raw) => raw.trim().to_string(),
            None => generate_workout_id(),
        };

        let date = match given(&self.date) {
            Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT).unwrap_or_else(|_| {
                errors.push(FieldError::new("date", "must be YYYY-MM-DD"));
                now.date()
            }),
            None => now.date(),
        };

        let start_time = match given(&self.start_time) {
            Some(raw) => parse_time(raw).unwrap_or_else(|| {
                errors.push(FieldError::new("start_time", "must be HH:MM or HH:MM:SS"));
                now.time()
            }),
            None => now.time(),
        };

        let set_number = match self.set_number.trim().parse::<u32>() {
            Ok(n) if n >= 1 => n,
            _ => {
                errors.push(FieldError::new("set_number", "must be a positive integer"));
                0
            }
        };

        let reps = given(&self.reps).and_then(|raw| {
            let reps = Reps::parse(raw);
            if reps.is_none() {
                errors.push(FieldError::new(
                    "reps",
                    "must be a non-negative integer or AMRAP",
                ));
            }
            reps
        });

        let load = given(&self.load).and_then(|raw| match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
            _ => {
                errors.push(FieldError::new("load", "must be a non-negative number"));
                None
            }
        });

        let rest_seconds = given(&self.rest_seconds).and_then(|raw| match raw.parse::<u32>() {
            Ok(v) => Some(v),
            Err(_) => {
                errors.push(FieldError::new(
                    "rest_seconds",
                    "must be a non-negative integer",
                ));
                None
            }
        });

        let rpe = given(&self.rpe).and_then(|raw| match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && (0.0..=rpe_max).contains(&v) => Some(v),
            _ => {
                errors.push(FieldError::new(
                    "rpe",
                    format!("must be between 0 and {}", format_number(rpe_max)),
                ));
                None
            }
        });

        if !errors.is_empty() {
            return Err(LiftlogError::Validation { errors });
        }

        Ok(NewSet {
            workout_id,
            date,
            start_time,
            movement_id,
            set_number,
            set_type: given(&self.set_type)
                .map(str::to_lowercase)
                .unwrap_or_else(|| DEFAULT_SET_TYPE.to_string()),
            cluster_id: given(&self.cluster_id).unwrap_or_default().to_string(),
            reps,
            load,
            unit: given(&self.unit).map(String::from),
            rest_seconds,
            rpe,
            tags: self
                .tags
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            notes: given(&self.notes).unwrap_or_default().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use csv::StringRecord;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn input() -> SetInput {
        SetInput {
            movement_id: "barbell-bench-press".to_string(),
            set_number: "1".to_string(),
            reps: Some("5".to_string()),
            load: Some("100".to_string()),
            unit: Some("kg".to_string()),
            ..Default::default()
        }
    }

    fn field_names(err: LiftlogError) -> Vec<String> {
        match err {
            LiftlogError::Validation { errors } => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn header_has_sixteen_columns() {
        assert_eq!(SET_HEADER.len(), 16);
        assert_eq!(SET_HEADER[0], "workout_id");
        assert_eq!(SET_HEADER[15], "created_at");
    }

    #[test]
    fn reps_parse_accepts_counts_and_amrap() {
        assert_eq!(Reps::parse("5"), Some(Reps::Count(5)));
        assert_eq!(Reps::parse(" amrap "), Some(Reps::Amrap));
        assert_eq!(Reps::parse("-1"), None);
        assert_eq!(Reps::parse("five"), None);
    }

    #[test]
    fn format_number_drops_whole_fraction() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(102.5), "102.5");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn workout_ids_are_eight_hex_chars() {
        let id = generate_workout_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, generate_workout_id());
    }

    #[test]
    fn validate_fills_defaults() {
        let set = input().validate(now(), 10.0).unwrap();
        assert_eq!(set.date, now().date());
        assert_eq!(set.start_time, now().time());
        assert_eq!(set.set_type, DEFAULT_SET_TYPE);
        assert_eq!(set.reps, Some(Reps::Count(5)));
        assert_eq!(set.load, Some(100.0));
        assert_eq!(set.workout_id.len(), 8);
    }

    #[test]
    fn validate_collects_every_bad_field() {
        let mut bad = input();
        bad.set_number = "0".to_string();
        bad.reps = Some("-3".to_string());
        bad.load = Some("-1".to_string());
        bad.rest_seconds = Some("soon".to_string());
        bad.rpe = Some("11".to_string());
        bad.date = Some("01/02/2025".to_string());

        let fields = field_names(bad.validate(now(), 10.0).unwrap_err());
        assert_eq!(
            fields,
            vec!["date", "set_number", "reps", "load", "rest_seconds", "rpe"]
        );
    }

    #[test]
    fn validate_respects_rpe_scale() {
        let mut set = input();
        set.rpe = Some("9.5".to_string());
        assert_eq!(set.validate(now(), 10.0).unwrap().rpe, Some(9.5));
        assert!(set.validate(now(), 5.0).is_err());
    }

    #[test]
    fn validate_rejects_missing_movement() {
        let mut set = input();
        set.movement_id = "  ".to_string();
        assert_eq!(field_names(set.validate(now(), 10.0).unwrap_err()), vec!["movement_id"]);
    }

    #[test]
    fn validate_rejects_non_finite_load() {
        let mut set = input();
        set.load = Some("NaN".to_string());
        assert_eq!(field_names(set.validate(now(), 10.0).unwrap_err()), vec!["load"]);
    }

    #[test]
    fn validate_accepts_short_start_time() {
        let mut set = input();
        set.start_time = Some("07:30".to_string());
        let parsed = set.validate(now(), 10.0).unwrap();
        assert_eq!(parsed.start_time.format(TIME_FORMAT).to_string(), "07:30:00");
    }

    #[test]
    fn blank_optional_fields_are_absent() {
        let mut set = input();
        set.load = Some("   ".to_string());
        set.unit = Some(String::new());
        let parsed = set.validate(now(), 10.0).unwrap();
        assert_eq!(parsed.load, None);
        assert_eq!(parsed.unit, None);
    }

    #[test]
    fn volume_needs_counted_reps_and_load() {
        let mut record = SetRecord {
            workout_id: "w1".into(),
            date: "2025-01-01".into(),
            start_time: "12:00:00".into(),
            movement_id: "bench".into(),
            movement_name: "Bench".into(),
            set_number: 1,
            set_type: "work".into(),
            cluster_id: String::new(),
            reps: Some(Reps::Count(5)),
            load: Some(100.0),
            unit: "kg".into(),
            rest_seconds: None,
            rpe: None,
            tags: vec![],
            notes: String::new(),
            created_at: "2025-01-01T12:00:00.000000".into(),
        };
        assert_eq!(record.volume(), Some(500.0));
        record.reps = Some(Reps::Amrap);
        assert_eq!(record.volume(), None);
        record.reps = Some(Reps::Count(5));
        record.load = None;
        assert_eq!(record.volume(), None);
    }

    #[test]
    fn from_row_reports_bad_numbers_with_line() {
        let fields: Vec<&str> = vec![
            "w1", "2025-01-01", "12:00:00", "bench", "Bench", "x", "work", "", "5", "heavy",
            "kg", "", "", "", "", "",
        ];
        let row = Row {
            line: 7,
            record: StringRecord::from(fields),
        };
        let err = SetRecord::from_row(&row).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("set_number"));
        assert!(msg.contains("load"));
        assert!(msg.contains("line 7"));
    }

    #[test]
    fn known_set_types() {
        assert!(is_known_set_type("warmup"));
        assert!(is_known_set_type("rest-pause"));
        assert!(!is_known_set_type("bilbo-baggins"));
    }
}
