//! HTTP client wrapper - executes the two backend requests and maps their
//! outcomes onto `NetworkResponse`s

use crate::messages::{FailureKind, NetworkResponse};
use crate::models::{LessonRow, SearchResponseBody, TimetableQuery, TimetableResponseBody};

/// Create an HTTP client with a bounded timeout
pub fn create_client(timeout_seconds: u64) -> reqwest::Client {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Message for a transport-level failure
fn transport_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        String::from("Request timed out")
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Best-effort extraction of a server-provided message from a non-2xx body.
/// Falls back to the fixed `HTTP <status>` string when the body is not
/// structured data.
fn api_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|e| e.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| format!("HTTP {}", status))
}

/// `GET /api/search_school?school_name=<query>`
pub async fn search_schools(
    client: &reqwest::Client,
    base_url: &str,
    query: String,
    id: u64,
) -> NetworkResponse {
    let url = format!("{}/api/search_school", base_url);
    let result = client
        .get(&url)
        .query(&[("school_name", query.as_str())])
        .send()
        .await;

    match result {
        Ok(resp) if resp.status().is_success() => {
            match resp.json::<SearchResponseBody>().await {
                Ok(body) => NetworkResponse::SearchCompleted {
                    id,
                    schools: body.schools,
                },
                Err(e) => NetworkResponse::SearchFailed {
                    id,
                    message: format!("Malformed response: {}", e),
                },
            }
        }
        Ok(resp) => {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            NetworkResponse::SearchFailed {
                id,
                message: api_error_message(status, &body),
            }
        }
        Err(e) => NetworkResponse::SearchFailed {
            id,
            message: transport_message(&e),
        },
    }
}

/// `GET /api/timetable?school_code=&office_code=&school_kind=&grade=&class_nm=&date=`
///
/// A 2xx body can itself carry an `error` field; that application-level
/// failure is reported distinctly from transport failures.
pub async fn fetch_timetable(
    client: &reqwest::Client,
    base_url: &str,
    query: TimetableQuery,
    id: u64,
) -> NetworkResponse {
    let url = format!("{}/api/timetable", base_url);
    let result = client
        .get(&url)
        .query(&[
            ("school_code", query.school_code.as_str()),
            ("office_code", query.office_code.as_str()),
            ("school_kind", query.school_kind.as_str()),
            ("grade", query.grade.as_str()),
            ("class_nm", query.class_number.as_str()),
            ("date", query.date.as_str()),
        ])
        .send()
        .await;

    match result {
        Ok(resp) if resp.status().is_success() => {
            match resp.json::<TimetableResponseBody>().await {
                Ok(body) => {
                    if let Some(message) = body.error {
                        NetworkResponse::TimetableFailed {
                            id,
                            message,
                            kind: FailureKind::Application,
                        }
                    } else {
                        NetworkResponse::TimetableCompleted {
                            id,
                            lessons: body
                                .timetable
                                .into_iter()
                                .map(LessonRow::into_entry)
                                .collect(),
                        }
                    }
                }
                Err(e) => NetworkResponse::TimetableFailed {
                    id,
                    message: format!("Malformed response: {}", e),
                    kind: FailureKind::Transport,
                },
            }
        }
        Ok(resp) => {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            NetworkResponse::TimetableFailed {
                id,
                message: api_error_message(status, &body),
                kind: FailureKind::Transport,
            }
        }
        Err(e) => NetworkResponse::TimetableFailed {
            id,
            message: transport_message(&e),
            kind: FailureKind::Transport,
        },
    }
}
