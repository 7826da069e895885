//! Job search criteria and query building.
//!
//! # Design
//! - Keep free-text inputs as strings for lossless editing.
//! - Enumerated filters are typed; unknown values mean "any".
//! - Empty values never reach the query string.

use std::fmt;

/// Employment type filter values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobType {
    /// Full-time employment.
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Fixed-term contract.
    Contract,
    /// Internship.
    Internship,
    /// Remote position.
    Remote,
}

impl JobType {
    /// Every job type in display order.
    pub const ALL: [Self; 5] = [
        Self::FullTime,
        Self::PartTime,
        Self::Contract,
        Self::Internship,
        Self::Remote,
    ];

    /// Query and display value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
            Self::Remote => "Remote",
        }
    }

    /// Parse a query value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// Seniority filter values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExperienceLevel {
    /// Entry level.
    Entry,
    /// Mid level.
    Mid,
    /// Senior level.
    Senior,
    /// Lead.
    Lead,
    /// Executive.
    Executive,
}

impl ExperienceLevel {
    /// Every level in display order.
    pub const ALL: [Self; 5] = [
        Self::Entry,
        Self::Mid,
        Self::Senior,
        Self::Lead,
        Self::Executive,
    ];

    /// Query and display value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "Entry",
            Self::Mid => "Mid",
            Self::Senior => "Senior",
            Self::Lead => "Lead",
            Self::Executive => "Executive",
        }
    }

    /// Parse a query value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }
}

/// Result ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Most recent first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
    /// Highest salary first.
    SalaryHigh,
    /// Lowest salary first.
    SalaryLow,
    /// Company name.
    Company,
}

impl SortKey {
    /// Every sort key in display order.
    pub const ALL: [Self; 5] = [
        Self::Newest,
        Self::Oldest,
        Self::SalaryHigh,
        Self::SalaryLow,
        Self::Company,
    ];

    /// Query value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::SalaryHigh => "salary-high",
            Self::SalaryLow => "salary-low",
            Self::Company => "company",
        }
    }

    /// Select label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
            Self::SalaryHigh => "Salary: High to Low",
            Self::SalaryLow => "Salary: Low to High",
            Self::Company => "Company Name",
        }
    }

    /// Parse a query value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field filter selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKey {
    /// Location substring.
    Location,
    /// Lower salary bound.
    MinSalary,
    /// Upper salary bound.
    MaxSalary,
    /// Employment type.
    JobType,
    /// Seniority.
    Experience,
}

/// Field filters as edited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobFilters {
    /// Location substring.
    pub location: String,
    /// Lower salary bound as typed.
    pub min_salary: String,
    /// Upper salary bound as typed.
    pub max_salary: String,
    /// Employment type, `None` for any.
    pub job_type: Option<JobType>,
    /// Seniority, `None` for any.
    pub experience: Option<ExperienceLevel>,
}

impl JobFilters {
    /// Update one filter from its raw input value.
    pub fn set(&mut self, key: FilterKey, value: &str) {
        match key {
            FilterKey::Location => self.location = value.to_string(),
            FilterKey::MinSalary => self.min_salary = value.to_string(),
            FilterKey::MaxSalary => self.max_salary = value.to_string(),
            FilterKey::JobType => self.job_type = JobType::parse(value),
            FilterKey::Experience => self.experience = ExperienceLevel::parse(value),
        }
    }

    /// Number of filters carrying a value.
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            !self.location.is_empty(),
            !self.min_salary.is_empty(),
            !self.max_salary.is_empty(),
            self.job_type.is_some(),
            self.experience.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Debounced part of the criteria: free-text term plus field filters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobCriteria {
    /// Free-text search term.
    pub term: String,
    /// Field filters.
    pub filters: JobFilters,
}

impl JobCriteria {
    /// Non-empty filters, plus one when a term is present.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count() + usize::from(!self.term.is_empty())
    }

    /// Whether any term or filter is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active_filter_count() > 0
    }
}

/// Fully specified server query for one page of jobs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobQuery {
    /// Term and filters.
    pub criteria: JobCriteria,
    /// Ordering.
    pub sort: SortKey,
    /// 1-based page.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl JobQuery {
    /// Path and query string for the jobs endpoint.
    #[must_use]
    pub fn to_path(&self) -> String {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("sort", self.sort.as_str().to_string()),
        ];
        let filters = &self.criteria.filters;
        let optional = [
            ("search", self.criteria.term.as_str()),
            ("location", filters.location.as_str()),
            ("minSalary", filters.min_salary.as_str()),
            ("maxSalary", filters.max_salary.as_str()),
            ("jobType", filters.job_type.map_or("", JobType::as_str)),
            (
                "experience",
                filters.experience.map_or("", ExperienceLevel::as_str),
            ),
        ];
        params.extend(
            optional
                .into_iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(key, value)| (key, value.to_string())),
        );
        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("/api/jobs/?{query}")
    }
}

/// Path listing every posting without pagination.
pub const ALL_JOBS_PATH: &str = "/api/jobs/?all=true";

#[cfg(test)]
mod tests {
    use super::*;

    fn query(criteria: JobCriteria) -> JobQuery {
        JobQuery {
            criteria,
            sort: SortKey::Newest,
            page: 1,
            page_size: 9,
        }
    }

    #[test]
    fn empty_criteria_only_send_paging_and_sort() {
        assert_eq!(
            query(JobCriteria::default()).to_path(),
            "/api/jobs/?page=1&pageSize=9&sort=newest"
        );
    }

    #[test]
    fn filters_are_encoded_in_fixed_order() {
        let mut criteria = JobCriteria {
            term: "rust dev".into(),
            ..JobCriteria::default()
        };
        criteria.filters.set(FilterKey::JobType, "Full-time");
        criteria.filters.set(FilterKey::MinSalary, "50000");
        criteria.filters.set(FilterKey::Location, "São Paulo");
        let mut q = query(criteria);
        q.sort = SortKey::SalaryHigh;
        q.page = 3;
        assert_eq!(
            q.to_path(),
            "/api/jobs/?page=3&pageSize=9&sort=salary-high&search=rust%20dev\
             &location=S%C3%A3o%20Paulo&minSalary=50000&jobType=Full-time"
        );
    }

    #[test]
    fn unknown_enumerated_values_clear_the_filter() {
        let mut filters = JobFilters::default();
        filters.set(FilterKey::Experience, "Senior");
        assert_eq!(filters.experience, Some(ExperienceLevel::Senior));
        filters.set(FilterKey::Experience, "");
        assert_eq!(filters.experience, None);
    }

    #[test]
    fn active_count_includes_term() {
        let mut criteria = JobCriteria::default();
        assert!(!criteria.is_active());
        criteria.filters.set(FilterKey::Location, "Berlin");
        criteria.filters.set(FilterKey::JobType, "Remote");
        assert_eq!(criteria.active_filter_count(), 2);
        criteria.term = "go".into();
        assert_eq!(criteria.active_filter_count(), 3);
    }

    #[test]
    fn sort_keys_round_trip_their_query_values() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SortKey::parse("random"), None);
    }
}
