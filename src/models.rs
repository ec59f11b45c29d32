//! データ構造体モジュール

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================
// 社員データ（バックエンド所有、読み取り専用）
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub guid: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub department: Department,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub salary: f64,
    /// 解析できない値は `None`（その行のセルだけ "Invalid Date" 表示）
    #[serde(default, deserialize_with = "deserialize_lenient_utc")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_lenient_utc")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Department {
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl Employee {
    /// 確認ダイアログなどに表示する名前
    pub fn display_name(&self) -> &str {
        &self.first_name
    }
}

/// 編集画面へのルート
pub fn edit_route(guid: &str) -> String {
    format!("/employees/{}", guid)
}

// ============================================
// タイムスタンプ解析
// ============================================

/// バックエンドのタイムスタンプをUTCとして解析
///
/// オフセット付き(RFC 3339)はUTCへ変換し、オフセットなし
/// (`2023-01-01T00:00:00` / `2023-01-01 00:00:00`、`.fff` 付き可)はUTCとみなす。
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    let raw = raw.trim();
    let rfc_err = match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or(rfc_err)
}

// 1件の不正な日時で一覧全体の読み込みを失敗させない
fn deserialize_lenient_utc<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw.as_str().and_then(|s| parse_timestamp(s).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "guid": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "firstName": "Nimal",
            "lastName": "Perera",
            "department": { "guid": "d-1", "name": "Engineering" },
            "emailAddress": "nimal@example.com",
            "age": 31,
            "salary": 1234.5,
            "createdAt": "2023-01-01T00:00:00Z",
            "updatedAt": "2023-02-01T10:15:00.123"
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.first_name, "Nimal");
        assert_eq!(employee.department.name, "Engineering");
        assert_eq!(employee.age, 31);
        assert_eq!(employee.created_at, Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()));
        let updated = employee.updated_at.unwrap();
        assert_eq!(updated.format("%H:%M:%S%.3f").to_string(), "10:15:00.123");
    }

    #[test]
    fn test_missing_department_defaults_to_empty() {
        let json = r#"{
            "guid": "g",
            "firstName": "A",
            "lastName": "B",
            "createdAt": "2023-01-01T00:00:00Z",
            "updatedAt": "2023-01-01T00:00:00Z"
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.department.name, "");
        assert_eq!(employee.salary, 0.0);
    }

    #[test]
    fn test_parse_timestamp_converts_offset_to_utc() {
        let ts = parse_timestamp("2023-01-01T05:30:00+05:30").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_naive_is_utc() {
        let ts = parse_timestamp("2023-06-15T08:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 6, 15, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_space_separator() {
        let ts = parse_timestamp("2023-01-01 00:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        let ts = parse_timestamp("2023-01-01 12:30:45.250").unwrap();
        assert_eq!(ts.format("%H:%M:%S%.3f").to_string(), "12:30:45.250");
    }

    #[test]
    fn test_bad_timestamp_keeps_rest_of_list() {
        let json = r#"[
            { "guid": "g1", "firstName": "A", "lastName": "B",
              "createdAt": "not a date", "updatedAt": "2023-01-01 00:00:00" },
            { "guid": "g2", "firstName": "C", "lastName": "D",
              "createdAt": null, "updatedAt": "2023-01-01T00:00:00Z" },
            { "guid": "g3", "firstName": "E", "lastName": "F" }
        ]"#;
        let employees: Vec<Employee> = serde_json::from_str(json).unwrap();
        assert_eq!(employees.len(), 3);
        assert_eq!(employees[0].created_at, None);
        assert_eq!(employees[0].updated_at, Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()));
        assert_eq!(employees[1].created_at, None);
        assert_eq!(employees[2].updated_at, None);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_edit_route() {
        assert_eq!(edit_route("abc-123"), "/employees/abc-123");
    }
}
