use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::applications;
use super::handlers::authentication;
use super::handlers::companies;
use super::handlers::interviews;
use super::handlers::jobs;
use super::middleware::authenticate as auth_middleware;
use crate::domain::application::ports::JobApplicationRepository;
use crate::domain::application::ports::JobApplicationServicePort;
use crate::domain::application::service::JobApplicationService;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::auth::service::AuthService;
use crate::domain::company::ports::CompanyRepository;
use crate::domain::company::ports::CompanyServicePort;
use crate::domain::company::service::CompanyService;
use crate::domain::interview::ports::InterviewRepository;
use crate::domain::interview::ports::InterviewServicePort;
use crate::domain::interview::service::InterviewService;
use crate::domain::job::ports::JobRepository;
use crate::domain::job::ports::JobServicePort;
use crate::domain::job::service::JobService;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub company_service: Arc<dyn CompanyServicePort>,
    pub job_service: Arc<dyn JobServicePort>,
    pub application_service: Arc<dyn JobApplicationServicePort>,
    pub interview_service: Arc<dyn InterviewServicePort>,
}

impl AppState {
    /// Wire every domain service over the given repositories.
    pub fn from_repositories<CS, CR, JR, AR, IR>(
        credentials: Arc<CS>,
        companies: Arc<CR>,
        jobs: Arc<JR>,
        applications: Arc<AR>,
        interviews: Arc<IR>,
        tokens: Arc<TokenService>,
    ) -> Self
    where
        CS: CredentialStore,
        CR: CompanyRepository,
        JR: JobRepository,
        AR: JobApplicationRepository,
        IR: InterviewRepository,
    {
        Self {
            auth_service: Arc::new(AuthService::new(credentials, tokens)),
            company_service: Arc::new(CompanyService::new(Arc::clone(&companies))),
            job_service: Arc::new(JobService::new(Arc::clone(&jobs), Arc::clone(&companies))),
            application_service: Arc::new(JobApplicationService::new(
                Arc::clone(&applications),
                Arc::clone(&jobs),
                companies,
            )),
            interview_service: Arc::new(InterviewService::new(interviews, applications, jobs)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/register", post(authentication::register))
        .route("/api/auth/login", post(authentication::login))
        .route("/api/companies", get(companies::list_companies))
        .route("/api/companies/:company_id", get(companies::get_company))
        .route("/api/jobs", get(jobs::list_jobs))
        .route(
            "/api/jobs/upcoming-deadlines",
            get(jobs::list_upcoming_deadlines),
        )
        .route("/api/jobs/:job_id", get(jobs::get_job));

    let protected_routes = Router::new()
        .route(
            "/api/companies/profile",
            get(companies::get_profile).put(companies::update_profile),
        )
        .route(
            "/api/companies/:company_id",
            delete(companies::delete_company),
        )
        .route("/api/jobs", post(jobs::create_job))
        .route("/api/jobs/mine", get(jobs::list_my_jobs))
        .route(
            "/api/jobs/:job_id",
            patch(jobs::update_job).delete(jobs::delete_job),
        )
        .route("/api/jobs/:job_id/deactivate", post(jobs::deactivate_job))
        .route("/api/applications/apply", post(applications::apply_for_job))
        .route(
            "/api/applications",
            post(applications::create_application).get(applications::list_my_applications),
        )
        .route(
            "/api/applications/:application_id",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
        .route(
            "/api/applications/job/:job_id",
            get(applications::list_applications_for_job),
        )
        .route(
            "/api/interviews",
            post(interviews::schedule_interview).get(interviews::list_interviews),
        )
        .route("/api/interviews/upcoming", get(interviews::list_upcoming))
        .route("/api/interviews/completed", get(interviews::list_completed))
        .route(
            "/api/interviews/application/:application_id",
            get(interviews::list_for_application),
        )
        .route(
            "/api/interviews/:interview_id",
            get(interviews::get_interview)
                .put(interviews::update_interview)
                .delete(interviews::delete_interview),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
