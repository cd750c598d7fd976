use crate::{error::AppError, AppState};
use analytics::{HappinessReport, SummaryAverages};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{NaiveDate, Utc};
use core_types::{MAX_INDEX, MIN_INDEX};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Successful responses carry `success: true` next to their payload.
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> Success<T> {
    fn new(data: T) -> Json<Self> {
        Json(Self { success: true, data })
    }
}

/// Body of `POST /api/entries`. Both fields are loosely typed on the wire.
#[derive(Debug, Default, Deserialize)]
pub struct NewEntry {
    pub index: Option<Value>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Saved {
    pub id: i64,
}

/// # GET /api/happiness
/// Computes the full dashboard report as of now in the reporting timezone.
pub async fn get_happiness(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Success<HappinessReport>>, AppError> {
    let today = state.engine.today(Utc::now());
    let ranges = state.engine.required_ranges(today)?;
    let observations = state.db_repo.fetch_observations(&ranges).await?;
    let report = state.engine.compute_for(&observations, today)?;
    Ok(Success::new(report))
}

/// # GET /api/averages
/// Month, year and all-time averages.
pub async fn get_averages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Success<SummaryAverages>>, AppError> {
    let observations = state.db_repo.fetch_all_observations().await?;
    Ok(Success::new(state.engine.summary(&observations, Utc::now())))
}

/// # POST /api/entries
/// Records one happiness index. The date defaults to today.
pub async fn post_entry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewEntry>, JsonRejection>,
) -> Result<Json<Success<Saved>>, AppError> {
    let Json(entry) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let today = state.engine.today(Utc::now());
    let (date, value) = validate_entry(&entry, today)?;
    let id = state.db_repo.save_observation(date, value).await?;
    Ok(Success::new(Saved { id }))
}

/// Checks an incoming entry and resolves its date.
pub fn validate_entry(entry: &NewEntry, today: NaiveDate) -> Result<(NaiveDate, i32), AppError> {
    let raw = match &entry.index {
        None | Some(Value::Null) => return Err(AppError::BadRequest("Missing index".to_string())),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(AppError::BadRequest("Missing index".to_string()));
        }
        Some(raw) => raw,
    };

    let parsed = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let value = parsed
        .filter(|v| (i64::from(MIN_INDEX)..=i64::from(MAX_INDEX)).contains(v))
        .ok_or_else(|| {
            AppError::BadRequest("Index must be integer between -10 and 10".to_string())
        })? as i32;

    let date = match entry.date.as_deref().map(str::trim) {
        None | Some("") => today,
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::BadRequest("Invalid date".to_string()))?,
    };

    Ok((date, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()
    }

    fn entry(index: Value, date: Option<&str>) -> NewEntry {
        NewEntry {
            index: Some(index),
            date: date.map(str::to_string),
        }
    }

    fn message(result: Result<(NaiveDate, i32), AppError>) -> String {
        match result {
            Err(AppError::BadRequest(m)) => m,
            other => panic!("expected a bad request, got {:?}", other),
        }
    }

    #[test]
    fn accepts_integers_and_numeric_strings() {
        assert_eq!(validate_entry(&entry(json!(7), None), today()).unwrap(), (today(), 7));
        assert_eq!(validate_entry(&entry(json!(" -3 "), None), today()).unwrap(), (today(), -3));
    }

    #[test]
    fn explicit_date_overrides_today() {
        let (date, _) = validate_entry(&entry(json!(0), Some("2025-03-30")), today()).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 30).unwrap());
        let (date, _) = validate_entry(&entry(json!(0), Some("  ")), today()).unwrap();
        assert_eq!(date, today());
    }

    #[test]
    fn rejects_missing_index() {
        assert_eq!(message(validate_entry(&NewEntry::default(), today())), "Missing index");
        assert_eq!(message(validate_entry(&entry(json!(""), None), today())), "Missing index");
    }

    #[test]
    fn rejects_out_of_range_or_fractional_index() {
        for bad in [json!(11), json!(-11), json!(2.5), json!("abc"), json!(true)] {
            assert_eq!(
                message(validate_entry(&entry(bad, None), today())),
                "Index must be integer between -10 and 10"
            );
        }
    }

    #[test]
    fn rejects_unparseable_dates() {
        assert_eq!(
            message(validate_entry(&entry(json!(1), Some("yesterday")), today())),
            "Invalid date"
        );
    }
}
