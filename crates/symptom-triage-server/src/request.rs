//! Lenient request body parsing.
//!
//! Bodies are decoded into loosely typed shapes first so that bad input maps
//! to a fixed 400 message instead of a serde rejection.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use symptom_triage_core::models::{DEFAULT_AGE, DEFAULT_GENDER};
use symptom_triage_core::scheduler::{parse_date, parse_priority};
use symptom_triage_core::{PatientReport, RiskLevel};

use crate::error::ApiError;

pub const MISSING_SYMPTOMS: &str = "Symptoms list required";
pub const INVALID_AGE: &str = "Invalid age";
pub const INVALID_HISTORY: &str = "Invalid medicalHistory";
pub const INVALID_DATE: &str = "Invalid preferredDate";
pub const INVALID_RISK: &str = "Invalid riskLevel";
pub const INVALID_BODY: &str = "Invalid request body";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictBody {
    symptoms: Option<Value>,
    age: Option<Value>,
    gender: Option<Value>,
    medical_history: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleBody {
    risk_level: Option<Value>,
    preferred_date: Option<Value>,
}

/// Validated `/schedule` input.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRequest {
    pub risk_level: RiskLevel,
    pub preferred_date: NaiveDate,
}

/// Parse a `/predict` body into a patient report.
pub fn parse_predict(body: &[u8]) -> Result<PatientReport, ApiError> {
    let body: PredictBody =
        serde_json::from_slice(body).map_err(|_| ApiError::BadRequest(MISSING_SYMPTOMS))?;

    let symptoms = match body.symptoms {
        Some(Value::Array(items)) if !items.is_empty() => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(ApiError::BadRequest(MISSING_SYMPTOMS)),
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(ApiError::BadRequest(MISSING_SYMPTOMS)),
    };

    let age = match body.age {
        None | Some(Value::Null) => DEFAULT_AGE,
        Some(value) => parse_age(&value).ok_or(ApiError::BadRequest(INVALID_AGE))?,
    };

    let gender = match body.gender {
        Some(Value::String(s)) => s,
        _ => DEFAULT_GENDER.to_string(),
    };

    let medical_history = match body.medical_history {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Some(_) => return Err(ApiError::BadRequest(INVALID_HISTORY)),
    };

    Ok(PatientReport {
        symptoms,
        age,
        gender,
        medical_history,
    })
}

/// Parse a `/schedule` body; an empty body means all defaults.
pub fn parse_schedule(body: &[u8], today: NaiveDate) -> Result<ScheduleRequest, ApiError> {
    let body: ScheduleBody = if body.iter().all(u8::is_ascii_whitespace) {
        ScheduleBody::default()
    } else {
        serde_json::from_slice(body).map_err(|_| ApiError::BadRequest(INVALID_BODY))?
    };

    let risk_level = match body.risk_level {
        None | Some(Value::Null) => RiskLevel::Medium,
        Some(Value::String(label)) => parse_priority(&label),
        Some(_) => return Err(ApiError::BadRequest(INVALID_RISK)),
    };

    let preferred_date = match body.preferred_date {
        None | Some(Value::Null) => today,
        Some(Value::String(raw)) => {
            parse_date(&raw).map_err(|_| ApiError::BadRequest(INVALID_DATE))?
        }
        Some(_) => return Err(ApiError::BadRequest(INVALID_DATE)),
    };

    Ok(ScheduleRequest {
        risk_level,
        preferred_date,
    })
}

/// Integers, floats (truncated) and numeric strings are all accepted.
fn parse_age(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad_request_message(err: ApiError) -> &'static str {
        match err {
            ApiError::BadRequest(message) => message,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn test_predict_defaults() {
        let report = parse_predict(br#"{"symptoms": ["fever"]}"#).unwrap();
        assert_eq!(report.symptoms, vec!["fever"]);
        assert_eq!(report.age, 30);
        assert_eq!(report.gender, "male");
        assert!(report.medical_history.is_empty());
    }

    #[test]
    fn test_predict_full_body() {
        let report = parse_predict(
            br#"{"symptoms": ["cough"], "age": "45", "gender": "female",
                 "medicalHistory": ["asthma", {"condition": "copd"}, 3]}"#,
        )
        .unwrap();
        assert_eq!(report.age, 45);
        assert_eq!(report.gender, "female");
        assert_eq!(report.history_len(), 3);
        assert_eq!(report.medical_history[0], "asthma");
    }

    #[test]
    fn test_age_variants() {
        assert_eq!(parse_age(&serde_json::json!(61)), Some(61));
        assert_eq!(parse_age(&serde_json::json!(61.9)), Some(61));
        assert_eq!(parse_age(&serde_json::json!(" 70 ")), Some(70));
        assert_eq!(parse_age(&serde_json::json!("old")), None);
        assert_eq!(parse_age(&serde_json::json!(true)), None);
    }

    #[test]
    fn test_predict_rejections() {
        let cases: [&[u8]; 6] = [
            br#"{"symptoms": []}"#,
            br#"{}"#,
            br#"{"symptoms": "fever"}"#,
            br#"{"symptoms": [1, 2]}"#,
            b"not json",
            b"",
        ];
        for body in cases {
            let err = parse_predict(body).unwrap_err();
            assert_eq!(bad_request_message(err), MISSING_SYMPTOMS);
        }

        let err = parse_predict(br#"{"symptoms": ["fever"], "age": "old"}"#).unwrap_err();
        assert_eq!(bad_request_message(err), INVALID_AGE);

        let err = parse_predict(br#"{"symptoms": ["fever"], "medicalHistory": "none"}"#).unwrap_err();
        assert_eq!(bad_request_message(err), INVALID_HISTORY);
    }

    #[test]
    fn test_schedule_defaults() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let bodies: [&[u8]; 3] = [b"", b"{}", b"  "];
        for body in bodies {
            let request = parse_schedule(body, today).unwrap();
            assert_eq!(request.risk_level, RiskLevel::Medium);
            assert_eq!(request.preferred_date, today);
        }
    }

    #[test]
    fn test_schedule_fields() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let request = parse_schedule(
            br#"{"riskLevel": "High", "preferredDate": "2024-06-20"}"#,
            today,
        )
        .unwrap();
        assert_eq!(request.risk_level, RiskLevel::High);
        assert_eq!(
            request.preferred_date,
            NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
        );

        let unknown = parse_schedule(br#"{"riskLevel": "whenever"}"#, today).unwrap();
        assert_eq!(unknown.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_schedule_rejections() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let err = parse_schedule(br#"{"preferredDate": "20/06/2024"}"#, today).unwrap_err();
        assert_eq!(bad_request_message(err), INVALID_DATE);

        let err = parse_schedule(br#"{"riskLevel": 3}"#, today).unwrap_err();
        assert_eq!(bad_request_message(err), INVALID_RISK);

        let err = parse_schedule(b"{oops", today).unwrap_err();
        assert_eq!(bad_request_message(err), INVALID_BODY);
    }
}
