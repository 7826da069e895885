//! HTTP client for the job board REST API.
//!
//! # Design
//! - One client per app boot; the bearer token is read per request from the shared credential.
//! - Non-success statuses are classified into [`ApiError`] here and nowhere else.
//! - Every list endpoint is normalized to an ordered sequence before it leaves this module.

use crate::core::auth::SharedCredential;
use crate::core::errors::ApiError;
use crate::features::jobs::logic::{ALL_JOBS_PATH, JobQuery};
use gloo_net::http::{Request, Response};
use jobboard_api_models::{
    Application, ApplicationStatus, AuthResponse, GenerateResumeRequest, Identity, JobListResponse,
    JobPage, JobPayload, JobPosting, ListPayload, LoginRequest, RecommendationsResponse,
    RegistrationRequest, StatusUpdate,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    base_url: String,
    credential: SharedCredential,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>, credential: SharedCredential) -> Self {
        Self {
            base_url: base_url.into(),
            credential,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, req: Request) -> Request {
        match self.credential.authorization() {
            Some(value) => req.header("Authorization", &value),
            None => req,
        }
    }

    async fn send(&self, req: Request) -> Result<Response, ApiError> {
        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::from_response(status, &body))
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.send(Request::get(&self.url(path))).await?;
        Self::decode(resp).await
    }

    fn with_json<B: Serialize>(req: Request, body: &B) -> Result<Request, ApiError> {
        req.json(body)
            .map_err(|err| ApiError::Request(err.to_string()))
    }

    /// Authenticated binary download; refuses to run without a stored token.
    async fn fetch_binary(&self, req: Request) -> Result<Vec<u8>, ApiError> {
        if self.credential.authorization().is_none() {
            return Err(ApiError::MissingCredential);
        }
        let resp = self.send(req).await?;
        resp.binary()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub(crate) async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let req = Self::with_json(Request::post(&self.url("/api/auth/login/")), credentials)?;
        Self::decode(self.send(req).await?).await
    }

    pub(crate) async fn register(
        &self,
        request: &RegistrationRequest,
        resume: Option<File>,
    ) -> Result<AuthResponse, ApiError> {
        let form = new_form()?;
        for (name, value) in request.form_fields() {
            append_text(&form, name, &value)?;
        }
        if let Some(file) = resume {
            append_file(&form, "resume", &file)?;
        }
        let req = Request::post(&self.url("/api/auth/register/")).body(form);
        Self::decode(self.send(req).await?).await
    }

    pub(crate) async fn current_user(&self) -> Result<Identity, ApiError> {
        self.get_json("/api/auth/user/").await
    }

    pub(crate) async fn upload_resume(&self, file: File) -> Result<(), ApiError> {
        let form = new_form()?;
        append_file(&form, "resume", &file)?;
        self.send(Request::put(&self.url("/api/auth/resume/")).body(form))
            .await?;
        Ok(())
    }

    pub(crate) async fn delete_resume(&self) -> Result<(), ApiError> {
        self.send(Request::delete(&self.url("/api/auth/resume/")))
            .await?;
        Ok(())
    }

    pub(crate) async fn fetch_jobs(&self, query: &JobQuery) -> Result<JobPage, ApiError> {
        let response: JobListResponse = self.get_json(&query.to_path()).await?;
        Ok(response.into_page())
    }

    pub(crate) async fn fetch_all_jobs(&self) -> Result<Vec<JobPosting>, ApiError> {
        let response: JobListResponse = self.get_json(ALL_JOBS_PATH).await?;
        Ok(response.into_jobs())
    }

    pub(crate) async fn fetch_job(&self, id: i64) -> Result<JobPosting, ApiError> {
        self.get_json(&format!("/api/jobs/{id}/")).await
    }

    pub(crate) async fn create_job(&self, payload: &JobPayload) -> Result<JobPosting, ApiError> {
        let req = Self::with_json(Request::post(&self.url("/api/jobs/")), payload)?;
        Self::decode(self.send(req).await?).await
    }

    pub(crate) async fn update_job(
        &self,
        id: i64,
        payload: &JobPayload,
    ) -> Result<JobPosting, ApiError> {
        let req = Self::with_json(Request::put(&self.url(&format!("/api/jobs/{id}/"))), payload)?;
        Self::decode(self.send(req).await?).await
    }

    pub(crate) async fn delete_job(&self, id: i64) -> Result<(), ApiError> {
        self.send(Request::delete(&self.url(&format!("/api/jobs/{id}/"))))
            .await?;
        Ok(())
    }

    pub(crate) async fn fetch_recommendations(&self) -> Result<Vec<JobPosting>, ApiError> {
        let response: RecommendationsResponse =
            self.get_json("/api/jobs/recommendations/").await?;
        Ok(response.recommendations)
    }

    pub(crate) async fn fetch_applications(&self) -> Result<Vec<Application>, ApiError> {
        let response: ListPayload<Application> = self.get_json("/api/applications/").await?;
        Ok(response.into_items())
    }

    pub(crate) async fn submit_application(
        &self,
        job_id: i64,
        cover_letter: &str,
        resume: Option<File>,
    ) -> Result<(), ApiError> {
        let form = new_form()?;
        append_text(&form, "job", &job_id.to_string())?;
        if !cover_letter.is_empty() {
            append_text(&form, "cover_letter", cover_letter)?;
        }
        if let Some(file) = resume {
            append_file(&form, "resume", &file)?;
        }
        self.send(Request::post(&self.url("/api/applications/")).body(form))
            .await?;
        Ok(())
    }

    pub(crate) async fn update_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Application, ApiError> {
        let req = Self::with_json(
            Request::put(&self.url(&format!("/api/applications/{id}/"))),
            &StatusUpdate { status },
        )?;
        Self::decode(self.send(req).await?).await
    }

    pub(crate) async fn download_application_resume(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        let path = format!("/api/applications/{id}/download-resume/");
        self.fetch_binary(Request::get(&self.url(&path))).await
    }

    pub(crate) async fn download_own_resume(&self) -> Result<Vec<u8>, ApiError> {
        self.fetch_binary(Request::get(&self.url("/api/users/me/download-resume/")))
            .await
    }

    pub(crate) async fn generate_resume(
        &self,
        request: &GenerateResumeRequest,
    ) -> Result<Vec<u8>, ApiError> {
        let req = Self::with_json(
            Request::post(&self.url("/api/auth/generate-resume/")),
            request,
        )?;
        self.fetch_binary(req).await
    }
}

fn new_form() -> Result<FormData, ApiError> {
    FormData::new().map_err(|err| ApiError::Request(format!("form data: {err:?}")))
}

fn append_text(form: &FormData, name: &str, value: &str) -> Result<(), ApiError> {
    form.append_with_str(name, value)
        .map_err(|err| ApiError::Request(format!("field {name}: {err:?}")))
}

fn append_file(form: &FormData, name: &str, file: &File) -> Result<(), ApiError> {
    form.append_with_blob_and_filename(name, file, &file.name())
        .map_err(|err| ApiError::Request(format!("file {name}: {err:?}")))
}
