//! Dashboard tabs and stat cards per role.

use crate::features::applications::logic::count_with_status;
use jobboard_api_models::{Application, ApplicationStatus, Role};

/// Dashboard tab.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashboardTab {
    /// Applications sent (developer) or received (employer).
    #[default]
    Applications,
    /// Employer's open postings.
    MyJobs,
    /// Developer resume builder.
    ResumeBuilder,
}

impl DashboardTab {
    /// Tab caption for `role`.
    #[must_use]
    pub const fn label(self, role: Role) -> &'static str {
        match (self, role) {
            (Self::Applications, Role::Developer) => "My Applications",
            (Self::Applications, _) => "Job Applications",
            (Self::MyJobs, _) => "My Job Posts",
            (Self::ResumeBuilder, _) => "Resume Builder",
        }
    }
}

/// Tabs visible to `role`, in display order.
#[must_use]
pub fn tabs_for(role: Role) -> Vec<DashboardTab> {
    match role {
        Role::Developer => vec![DashboardTab::Applications, DashboardTab::ResumeBuilder],
        Role::Employer => vec![DashboardTab::Applications, DashboardTab::MyJobs],
        Role::Admin => vec![DashboardTab::Applications],
    }
}

/// One headline number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatCard {
    /// Count shown.
    pub value: usize,
    /// Caption.
    pub label: &'static str,
}

/// Headline numbers for `role`.
///
/// `active_jobs` is only read for non-developers.
#[must_use]
pub fn dashboard_stats(role: Role, applications: &[Application], active_jobs: usize) -> [StatCard; 3] {
    let hired = count_with_status(applications, &[ApplicationStatus::Hired]);
    match role {
        Role::Developer => [
            StatCard {
                value: applications.len(),
                label: "Total Applications",
            },
            StatCard {
                value: count_with_status(
                    applications,
                    &[ApplicationStatus::Shortlisted, ApplicationStatus::Hired],
                ),
                label: "Positive Responses",
            },
            StatCard {
                value: hired,
                label: "Jobs Landed",
            },
        ],
        Role::Employer | Role::Admin => [
            StatCard {
                value: active_jobs,
                label: "Active Job Posts",
            },
            StatCard {
                value: applications.len(),
                label: "Total Applications",
            },
            StatCard {
                value: hired,
                label: "Successful Hires",
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application(id: i64, status: &str) -> Application {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "job": {"id": 1, "title": "T", "created_at": "2024-05-01T12:00:00Z"},
            "applicant": {"id": 2, "username": "a"},
            "status": status,
            "applied_at": "2024-05-02T08:30:00Z"
        }))
        .expect("application fixture")
    }

    #[test]
    fn tabs_depend_on_role() {
        assert_eq!(
            tabs_for(Role::Developer),
            vec![DashboardTab::Applications, DashboardTab::ResumeBuilder]
        );
        assert!(tabs_for(Role::Employer).contains(&DashboardTab::MyJobs));
        assert_eq!(DashboardTab::Applications.label(Role::Developer), "My Applications");
        assert_eq!(DashboardTab::Applications.label(Role::Employer), "Job Applications");
    }

    #[test]
    fn stats_count_by_status() {
        let apps = vec![
            application(1, "applied"),
            application(2, "shortlisted"),
            application(3, "hired"),
        ];
        let developer = dashboard_stats(Role::Developer, &apps, 0);
        assert_eq!(developer.map(|card| card.value), [3, 2, 1]);
        let employer = dashboard_stats(Role::Employer, &apps, 4);
        assert_eq!(employer.map(|card| card.value), [4, 3, 1]);
        assert_eq!(employer[0].label, "Active Job Posts");
    }
}
