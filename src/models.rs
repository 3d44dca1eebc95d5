use serde::Deserialize;

/// One school search result, identified by (school code, office code).
///
/// Field names on the wire are the NEIS ones the backend passes through
/// unchanged.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SchoolCandidate {
    #[serde(rename = "SCHUL_NM")]
    pub name: String,
    #[serde(rename = "ORG_RDNMA", default)]
    pub road_address: String,
    #[serde(rename = "SD_SCHUL_CODE")]
    pub school_code: String,
    #[serde(rename = "ATPT_OFCDC_SC_CODE")]
    pub office_code: String,
    #[serde(rename = "SCHUL_KND_SC_NM", default)]
    pub school_kind: String,
}

/// Parameters for one timetable lookup, built right before the request
#[derive(Clone, Debug, PartialEq)]
pub struct TimetableQuery {
    pub school_code: String,
    pub office_code: String,
    pub school_kind: String,
    pub grade: String,
    pub class_number: String,
    /// 8-digit calendar date (YYYYMMDD), validated for shape only
    pub date: String,
}

/// One scheduled period on the requested date
#[derive(Clone, Debug, PartialEq)]
pub struct LessonEntry {
    pub period: u32,
    /// Lesson content; may be empty when the API carries no subject
    pub subject: String,
}

/// Wire shape of `GET /api/search_school`
#[derive(Debug, Deserialize)]
pub struct SearchResponseBody {
    #[serde(default)]
    pub schools: Vec<SchoolCandidate>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Wire shape of one timetable row
#[derive(Debug, Deserialize)]
pub struct LessonRow {
    #[serde(rename = "PERIO", default)]
    pub period: String,
    #[serde(rename = "ITRT_CNTNT", default)]
    pub subject: Option<String>,
}

impl LessonRow {
    /// Convert to the domain type. A period that fails to parse sorts first
    /// rather than failing the whole response.
    pub fn into_entry(self) -> LessonEntry {
        LessonEntry {
            period: self.period.trim().parse().unwrap_or(0),
            subject: self.subject.unwrap_or_default(),
        }
    }
}

/// Wire shape of `GET /api/timetable`. The `error` field can accompany a 2xx
/// status, signalling an application-level failure.
#[derive(Debug, Deserialize)]
pub struct TimetableResponseBody {
    #[serde(default)]
    pub timetable: Vec<LessonRow>,
    #[serde(default)]
    pub error: Option<String>,
}
