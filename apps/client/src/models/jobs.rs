//! Job-listing models shared by the search endpoints and the tracker.
//!
//! The backend aggregates listings from external job boards and returns them
//! with the boards' original title-cased keys, so the wire names here are
//! renamed rather than snake_cased.

use serde::{Deserialize, Serialize};

/// One aggregated job listing as returned by `/search-jobs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Job Type")]
    pub job_type: String,
    #[serde(rename = "Salary")]
    pub salary: String,
    #[serde(rename = "Date Posted")]
    pub date_posted: String,
    #[serde(rename = "Apply Link")]
    pub apply_link: String,
    #[serde(rename = "Source")]
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<Job>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_decodes_title_cased_wire_keys() {
        let body = r#"{
            "jobs": [{
                "Job Title": "Backend Engineer",
                "Company": "Acme",
                "Location": "Remote",
                "Job Type": "fulltime",
                "Salary": "$150k",
                "Date Posted": "2024-11-02",
                "Apply Link": "https://example.com/apply/1",
                "Source": "indeed"
            }],
            "count": 1
        }"#;
        let response: JobSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.count, 1);
        assert_eq!(response.jobs[0].job_title, "Backend Engineer");
        assert_eq!(response.jobs[0].apply_link, "https://example.com/apply/1");
    }

    #[test]
    fn test_job_round_trips_through_wire_names() {
        let job = Job {
            job_title: "SRE".to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["Job Title"], "SRE");
        assert!(value.get("job_title").is_none());
    }
}
