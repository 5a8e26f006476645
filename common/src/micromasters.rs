//! Profile pieces submitted by the MicroMasters profile tabs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: String,
    pub month: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree_name: String,
    pub graduation_date: String,
    pub field_of_study: Option<String>,
    pub online_degree: bool,
    pub school_name: String,
    pub school_city: String,
    pub school_state_or_territory: String,
    pub school_country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_date_edit: Option<YearMonth>,
}

impl EducationEntry {
    pub fn high_school() -> Self {
        Self {
            degree_name: "hs".to_string(),
            graduation_date: "1998-02-01".to_string(),
            field_of_study: None,
            online_degree: false,
            school_name: "School User".to_string(),
            school_city: "Lexington".to_string(),
            school_state_or_territory: "US-MA".to_string(),
            school_country: "US".to_string(),
            graduation_date_edit: None,
        }
    }

    pub fn college() -> Self {
        Self {
            degree_name: "m".to_string(),
            graduation_date: "2008-12-01".to_string(),
            field_of_study: Some("14.0903".to_string()),
            online_degree: false,
            school_name: "University of Here".to_string(),
            school_city: "Bologna".to_string(),
            school_state_or_territory: "IT-BO".to_string(),
            school_country: "IT".to_string(),
            graduation_date_edit: Some(YearMonth { year: "2008".to_string(), month: "12".to_string() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHistoryEntry {
    pub position: String,
    pub industry: String,
    pub company_name: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub city: String,
    pub country: String,
    pub state_or_territory: String,
    pub start_date_edit: YearMonth,
}

impl WorkHistoryEntry {
    pub fn software_engineer() -> Self {
        Self {
            position: "Senior Software Engineer".to_string(),
            industry: "Computer Software".to_string(),
            company_name: "MIT".to_string(),
            start_date: "2000-01-01".to_string(),
            end_date: None,
            city: "Cambridge".to_string(),
            country: "US".to_string(),
            state_or_territory: "US-MA".to_string(),
            start_date_edit: YearMonth { year: "2000".to_string(), month: "1".to_string() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramEnrollment {
    pub program_id: u32,
}
