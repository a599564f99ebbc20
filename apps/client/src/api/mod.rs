//! Backend API client — the single point of entry for all Agragrati
//! backend calls.
//!
//! No other module talks HTTP. Every endpoint the backend exposes has one
//! typed method here; the command handlers consume the decoded payloads and
//! hand them to the session store. Requests retry on 429 and 5xx with
//! exponential backoff.

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::insights::{
    CareerPathsInsight, IndustryInsight, InterviewPrepInsight, JobMatchReport, LearningInsight,
    SalaryInsight, SkillGapsInsight,
};
use crate::models::jobs::JobSearchResponse;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gave up after {retries} retries: {message}")]
    Exhausted { retries: u32, message: String },
}

/// FastAPI error envelope: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct BackendError {
    detail: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub groq_api: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadResumeResponse {
    pub resume_text: String,
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct ResumeAnalysisResponse {
    pub analysis: String,
    pub target_role: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    resume_text: &'a str,
    target_role: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct JobSearchRequest<'a> {
    search_term: &'a str,
    location: &'a str,
    results_wanted: u32,
    job_type: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ResumeJobSearchRequest<'a> {
    resume_text: &'a str,
    location: &'a str,
    results_wanted: u32,
    job_type: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct InsightRequest<'a> {
    resume_text: &'a str,
    target_role: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SalaryInsightRequest<'a> {
    resume_text: &'a str,
    target_role: Option<&'a str>,
    location: &'a str,
}

#[derive(Debug, Serialize)]
struct JobMatchRequest<'a> {
    resume_text: &'a str,
    job_description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterRequest {
    pub resume_text: String,
    pub job_title: String,
    pub company_name: String,
    pub job_description: Option<String>,
    pub tone: Option<String>,
    pub additional_info: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub category: String,
    pub difficulty: String,
    pub tips: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct InterviewQuestionsResponse {
    pub questions: Vec<InterviewQuestion>,
}

#[derive(Debug, Serialize)]
struct EvaluateAnswerRequest<'a> {
    question: &'a str,
    answer: &'a str,
    target_role: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerEvaluation {
    pub score: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub sample_answer: String,
}

#[derive(Debug, Serialize)]
struct EnhanceSectionRequest<'a> {
    section_type: &'a str,
    content: &'a str,
    target_role: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceSectionResponse {
    pub enhanced_content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        ApiClient {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// POSTs a JSON body and decodes a JSON response, retrying on 429 and
    /// 5xx with exponential backoff (1s, 2s, 4s).
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let mut last_message = String::new();

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "request to {endpoint} failed (attempt {attempt}), retrying after {}ms",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(self.url(endpoint)).json(body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_message = e.to_string();
                    continue;
                }
            };

            match Self::decode(endpoint, response).await {
                Ok(decoded) => return Ok(decoded),
                Err(ApiError::Api { status, message }) if status == 429 || status >= 500 => {
                    last_message = message;
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(ApiError::Exhausted {
            retries: MAX_RETRIES,
            message: last_message,
        })
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<BackendError>(&body)
                .map(|e| e.detail)
                .unwrap_or(body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        debug!("request to {endpoint} succeeded ({status})");
        Ok(response.json().await?)
    }

    // ────────────────────────────────────────────────────────────────────
    // Endpoints
    // ────────────────────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self.client.get(self.url("/health")).send().await?;
        Self::decode("/health", response).await
    }

    /// Uploads a resume file. Text extraction happens server-side; the
    /// response carries the extracted text, ready for the session store.
    pub async fn upload_resume(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResumeResponse, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.url("/upload-resume"))
            .multipart(form)
            .send()
            .await?;
        Self::decode("/upload-resume", response).await
    }

    pub async fn analyze_resume(
        &self,
        resume_text: &str,
        target_role: Option<&str>,
    ) -> Result<ResumeAnalysisResponse, ApiError> {
        self.post_json(
            "/analyze-resume",
            &AnalyzeRequest {
                resume_text,
                target_role,
            },
        )
        .await
    }

    pub async fn search_jobs(
        &self,
        search_term: &str,
        location: &str,
        results_wanted: u32,
        job_type: Option<&str>,
    ) -> Result<JobSearchResponse, ApiError> {
        self.post_json(
            "/search-jobs",
            &JobSearchRequest {
                search_term,
                location,
                results_wanted,
                job_type,
            },
        )
        .await
    }

    pub async fn search_jobs_by_resume(
        &self,
        resume_text: &str,
        location: &str,
        results_wanted: u32,
        job_type: Option<&str>,
    ) -> Result<JobSearchResponse, ApiError> {
        self.post_json(
            "/search-jobs-by-resume",
            &ResumeJobSearchRequest {
                resume_text,
                location,
                results_wanted,
                job_type,
            },
        )
        .await
    }

    pub async fn career_paths(
        &self,
        resume_text: &str,
        target_role: Option<&str>,
    ) -> Result<CareerPathsInsight, ApiError> {
        self.insight("/career-insights/paths", resume_text, target_role)
            .await
    }

    pub async fn skill_gaps(
        &self,
        resume_text: &str,
        target_role: Option<&str>,
    ) -> Result<SkillGapsInsight, ApiError> {
        self.insight("/career-insights/skill-gaps", resume_text, target_role)
            .await
    }

    pub async fn salary_insights(
        &self,
        resume_text: &str,
        target_role: Option<&str>,
        location: &str,
    ) -> Result<SalaryInsight, ApiError> {
        self.post_json(
            "/career-insights/salary",
            &SalaryInsightRequest {
                resume_text,
                target_role,
                location,
            },
        )
        .await
    }

    pub async fn interview_prep(
        &self,
        resume_text: &str,
        target_role: Option<&str>,
    ) -> Result<InterviewPrepInsight, ApiError> {
        self.insight("/career-insights/interview-prep", resume_text, target_role)
            .await
    }

    pub async fn learning_resources(
        &self,
        resume_text: &str,
        target_role: Option<&str>,
    ) -> Result<LearningInsight, ApiError> {
        self.insight("/career-insights/learning", resume_text, target_role)
            .await
    }

    pub async fn industry_insights(
        &self,
        resume_text: &str,
        target_role: Option<&str>,
    ) -> Result<IndustryInsight, ApiError> {
        self.insight("/career-insights/industry", resume_text, target_role)
            .await
    }

    pub async fn job_match(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<JobMatchReport, ApiError> {
        self.post_json(
            "/job-match",
            &JobMatchRequest {
                resume_text,
                job_description,
            },
        )
        .await
    }

    pub async fn generate_cover_letter(
        &self,
        request: &CoverLetterRequest,
    ) -> Result<CoverLetterResponse, ApiError> {
        self.post_json("/generate-cover-letter", request).await
    }

    pub async fn interview_questions(
        &self,
        resume_text: &str,
        target_role: Option<&str>,
    ) -> Result<InterviewQuestionsResponse, ApiError> {
        self.insight("/interview-questions", resume_text, target_role)
            .await
    }

    pub async fn evaluate_answer(
        &self,
        question: &str,
        answer: &str,
        target_role: Option<&str>,
    ) -> Result<AnswerEvaluation, ApiError> {
        self.post_json(
            "/evaluate-answer",
            &EvaluateAnswerRequest {
                question,
                answer,
                target_role,
            },
        )
        .await
    }

    pub async fn enhance_resume_section(
        &self,
        section_type: &str,
        content: &str,
        target_role: Option<&str>,
    ) -> Result<EnhanceSectionResponse, ApiError> {
        self.post_json(
            "/enhance-resume-section",
            &EnhanceSectionRequest {
                section_type,
                content,
                target_role,
            },
        )
        .await
    }

    /// Shared shape of the resume+role insight endpoints.
    async fn insight<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        resume_text: &str,
        target_role: Option<&str>,
    ) -> Result<T, ApiError> {
        self.post_json(
            endpoint,
            &InsightRequest {
                resume_text,
                target_role,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/".to_string());
        assert_eq!(client.url("/health"), "http://localhost:8000/health");
    }

    #[test]
    fn test_insight_request_serializes_null_role() {
        let body = serde_json::to_value(InsightRequest {
            resume_text: "text",
            target_role: None,
        })
        .unwrap();
        assert_eq!(body["resume_text"], "text");
        assert!(body["target_role"].is_null());
    }

    #[test]
    fn test_backend_error_envelope_parses() {
        let err: BackendError = serde_json::from_str(r#"{"detail": "No file uploaded"}"#).unwrap();
        assert_eq!(err.detail, "No file uploaded");
    }
}
