//! End-to-end behaviour of the DOM-free controllers.

use jobboard_api_models::{
    Application, ApplicationStatus, AuthResponse, JobListResponse, JobPage,
};
use jobboard_ui::config::UiConfig;
use jobboard_ui::core::auth::{
    ACCESS_TOKEN_COOKIE, MemoryStorage, SESSION_COOKIES, SessionManager, SessionStorage,
    SharedCredential,
};
use jobboard_ui::core::errors::ApiError;
use jobboard_ui::core::logic::{PageToken, page_window};
use jobboard_ui::features::applications::logic::{
    STATUS_FORBIDDEN_MESSAGE, StatusFilter, filter_applications, status_targets,
};
use jobboard_ui::features::applications::state::{ApplicationsState, StatusUpdateOutcome};
use jobboard_ui::features::jobs::logic::FilterKey;
use jobboard_ui::features::jobs::state::{FetchOutcome, JobListState};
use jobboard_ui::features::resume::logic::{ResumeFileError, validate_resume};
use serde_json::json;

const MB: u64 = 1024 * 1024;

fn page(total_pages: u32, titles: &[&str]) -> JobPage {
    let jobs: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(idx, title)| {
            json!({"id": idx + 1, "title": title, "created_at": "2024-05-01T00:00:00Z"})
        })
        .collect();
    serde_json::from_value::<JobListResponse>(json!({
        "jobs": jobs,
        "current_page": 1,
        "total_pages": total_pages,
        "total_jobs": titles.len(),
    }))
    .expect("paginated fixture")
    .into_page()
}

fn application(id: i64, status: &str, title: &str) -> Application {
    serde_json::from_value(json!({
        "id": id,
        "job": {"id": id * 100, "title": title, "created_at": "2024-05-01T00:00:00Z"},
        "applicant": {"id": 5, "username": "dev", "first_name": "Ada", "last_name": "Lovelace"},
        "status": status,
        "applied_at": "2024-05-03T00:00:00Z"
    }))
    .expect("application fixture")
}

#[test]
fn settled_debounce_queries_latest_values_on_page_one() {
    let mut state = JobListState::new(&UiConfig::default());
    let first = state.start();
    assert_eq!(state.apply_response(first.seq, Ok(page(4, &["a"]))), FetchOutcome::Applied);
    let paged = state.go_to_page(3).expect("in range");
    state.apply_response(paged.seq, Ok(page(4, &["c"])));

    state.set_search("ru", 1_000);
    state.set_search("rust", 1_200);
    state.set_filter(FilterKey::Location, "Berlin", 1_400);
    assert!(state.poll(1_800).is_none());

    let ticket = state.poll(1_900).expect("settled");
    assert_eq!(ticket.query.page, 1);
    assert_eq!(ticket.query.criteria.term, "rust");
    assert_eq!(ticket.query.criteria.filters.location, "Berlin");
    assert!(ticket.query.to_path().contains("search=rust"));
}

#[test]
fn older_response_never_overwrites_newer_one() {
    let mut state = JobListState::new(&UiConfig::default());
    let older = state.start();
    state.set_search("go", 0);
    let newer = state.poll(600).expect("settled");

    assert_eq!(state.apply_response(newer.seq, Ok(page(1, &["newer"]))), FetchOutcome::Applied);
    assert_eq!(state.apply_response(older.seq, Ok(page(1, &["older"]))), FetchOutcome::Stale);
    assert_eq!(state.jobs[0].title, "newer");
    assert!(!state.loading);
}

#[test]
fn out_of_range_pages_are_ignored() {
    let mut state = JobListState::new(&UiConfig::default());
    let first = state.start();
    state.apply_response(first.seq, Ok(page(5, &["a"])));
    let before = state.latest_seq();
    assert!(state.go_to_page(0).is_none());
    assert!(state.go_to_page(6).is_none());
    assert_eq!(state.latest_seq(), before);
    assert!(state.go_to_page(5).is_some());
}

#[test]
fn failed_fetch_empties_results() {
    let mut state = JobListState::new(&UiConfig::default());
    let first = state.start();
    state.apply_response(first.seq, Ok(page(3, &["a", "b"])));
    let next = state.go_to_page(2).expect("in range");
    let outcome = state.apply_response(next.seq, Err(ApiError::Network("offline".into())));
    assert!(matches!(outcome, FetchOutcome::Failed(ApiError::Network(_))));
    assert!(state.jobs.is_empty());
    assert_eq!(state.meta.current_page, 1);
}

#[test]
fn windowed_pages_for_ten() {
    use PageToken::{Ellipsis, Page};
    assert_eq!(
        page_window(1, 10),
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
    );
    assert_eq!(
        page_window(10, 10),
        vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
    );
    assert_eq!(
        page_window(5, 10),
        vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
    );
}

#[test]
fn resume_files_are_checked_size_first() {
    let max = UiConfig::default().max_resume_bytes;
    assert_eq!(validate_resume("cv.pdf", 6 * MB, max), Err(ResumeFileError::TooLarge));
    assert_eq!(
        validate_resume("cv.txt", 2 * MB, max),
        Err(ResumeFileError::UnsupportedFormat)
    );
    assert_eq!(validate_resume("CV.DOCX", 2 * MB, max), Ok(()));
    assert_eq!(ResumeFileError::TooLarge.to_string(), "Resume must be less than 5MB");
}

#[test]
fn status_workflow_offers_other_statuses_and_always_clears_marker() {
    assert_eq!(
        status_targets(ApplicationStatus::Applied),
        vec![
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Rejected,
            ApplicationStatus::Hired
        ]
    );

    let mut state = ApplicationsState::new(&UiConfig::default());
    state.set_all(vec![application(1, "applied", "Backend Dev")]);

    assert!(state.begin_status_update(1));
    let outcome = state.finish_status_update(1, Err(ApiError::Forbidden { message: None }));
    assert_eq!(outcome, StatusUpdateOutcome::Forbidden);
    assert_eq!(
        outcome.notice().map(|notice| notice.message),
        Some(STATUS_FORBIDDEN_MESSAGE.to_string())
    );
    assert!(!state.is_updating(1));
    assert_eq!(state.get(1).map(|a| a.status), Some(ApplicationStatus::Applied));

    assert!(state.begin_status_update(1));
    let outcome = state.finish_status_update(1, Ok(application(1, "hired", "Backend Dev")));
    assert_eq!(outcome, StatusUpdateOutcome::Updated);
    assert!(!state.is_updating(1));
    assert_eq!(state.get(1).map(|a| a.status), Some(ApplicationStatus::Hired));
}

#[test]
fn logout_leaves_no_cookie_and_no_credential() {
    let credential = SharedCredential::default();
    let mut manager = SessionManager::new(MemoryStorage::default(), credential.clone(), 7);
    let response: AuthResponse = serde_json::from_value(json!({
        "access": "tok",
        "refresh": "ref",
        "user": {"id": 1, "username": "dev", "role": "developer"}
    }))
    .expect("auth fixture");
    manager.establish(response);
    assert_eq!(credential.authorization().as_deref(), Some("Bearer tok"));
    assert_eq!(manager.storage().lifetime_days(ACCESS_TOKEN_COOKIE), Some(7));

    manager.clear();
    for key in SESSION_COOKIES {
        assert!(manager.storage().read(key).is_none());
    }
    assert!(credential.authorization().is_none());
}

#[test]
fn local_filter_matches_title_or_status() {
    let items = vec![
        application(1, "applied", "Backend Dev"),
        application(2, "hired", "Frontend Dev"),
    ];
    let by_term = filter_applications(&items, "frontend", StatusFilter::All);
    assert_eq!(by_term.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2]);
    let by_status = filter_applications(&items, "", StatusFilter::parse("applied"));
    assert_eq!(by_status.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1]);
}
