//! Whole-corpus consistency checks.
//!
//! Validation is a complete scan: every issue is collected into a
//! [`ValidationReport`] and nothing stops early. Errors block publishing;
//! warnings are advisory. Vacancies are reported on their own.

mod committees;
mod legislators;
mod offices;
mod social;
mod vacancies;

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Chamber, Legislator};
use crate::store::Collection;

pub use committees::validate_committees;
pub use offices::validate_offices;
pub use social::validate_social_media;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding, located by collection and subject (a bioguide, state, or
/// committee code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub collection: Collection,
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };
        write!(f, "{tag} {} {}: {}", self.collection, self.subject, self.message)
    }
}

/// An apportioned seat with no current holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vacancy {
    pub chamber: Chamber,
    pub state: String,
    /// House district; `None` for the Senate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<u32>,
}

impl fmt::Display for Vacancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.chamber, self.district) {
            (Chamber::House, Some(d)) => write!(f, "VACANCY house {}-{d}", self.state),
            _ => write!(f, "VACANCY senate {}", self.state),
        }
    }
}

/// Options for [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reference date separating current from ended terms.
    pub as_of: NaiveDate,
    pub warn_missing_birthday: bool,
    pub warn_missing_url: bool,
}

impl ValidationOptions {
    /// All advisory checks enabled.
    #[must_use]
    pub const fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            warn_missing_birthday: true,
            warn_missing_url: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub vacancies: Vec<Vacancy>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, collection: Collection, subject: impl Into<String>, message: impl Into<String>) {
        self.errors.push(Issue {
            severity: Severity::Error,
            collection,
            subject: subject.into(),
            message: message.into(),
        });
    }

    pub fn warning(&mut self, collection: Collection, subject: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Issue {
            severity: Severity::Warning,
            collection,
            subject: subject.into(),
            message: message.into(),
        });
    }

    /// Append everything from `other`.
    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.vacancies.extend(other.vacancies);
    }

    /// No errors. Warnings and vacancies do not count.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Process exit status: 0 when clean, 1 when any error was found.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.is_clean())
    }

    /// Errors mentioning `subject`, for tests and targeted reruns.
    #[must_use]
    pub fn errors_for(&self, subject: &str) -> Vec<&Issue> {
        self.errors.iter().filter(|i| i.subject == subject).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in self.errors.iter().chain(&self.warnings) {
            writeln!(f, "{issue}")?;
        }
        for vacancy in &self.vacancies {
            writeln!(f, "{vacancy}")?;
        }
        write!(
            f,
            "{} error(s), {} warning(s), {} vacanc{}",
            self.errors.len(),
            self.warnings.len(),
            self.vacancies.len(),
            if self.vacancies.len() == 1 { "y" } else { "ies" }
        )
    }
}

/// Validate the legislator collections: per-record invariants, identifier
/// uniqueness across both collections, Senate rank distribution, current
/// office uniqueness and vacancies.
#[must_use]
pub fn validate(
    current: &[Legislator],
    historical: &[Legislator],
    options: &ValidationOptions,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    for legislator in current {
        legislators::check_legislator(&mut report, Collection::LegislatorsCurrent, legislator, options);
    }
    for legislator in historical {
        legislators::check_legislator(&mut report, Collection::LegislatorsHistorical, legislator, options);
    }
    legislators::check_unique_ids(&mut report, current, historical);
    legislators::check_senate_ranks(&mut report, current);
    legislators::check_office_uniqueness(&mut report, current);
    report.vacancies = vacancies::find_vacancies(current);

    tracing::info!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        vacancies = report.vacancies.len(),
        "validated legislators"
    );
    report
}
