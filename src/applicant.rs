//! The canonical applicant record and the default table both ingestion paths share.
//!
//! Loaders never build an [`ApplicantRecord`] directly. They produce a partial
//! [`ApplicantFields`] and hand it to [`normalize`], which fills every absent key
//! from the declared defaults below.

use std::fmt;

use serde::Deserialize;

pub const DEFAULT_APPLICATION_TERM: &str = "Fall 2026";
pub const DEFAULT_COLLEGE: &str = "Stanford";
pub const DEFAULT_AGE: u32 = 17;
pub const DEFAULT_BIRTH_COUNTRY: &str = "United States";
pub const DEFAULT_SIBLINGS: u32 = 0;

/// Citizenship as the application forms ask for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Citizenship {
    UsCitizen,
    PermanentResident,
    International,
}

impl Citizenship {
    /// Citizen wins over permanent resident; neither means international.
    pub fn derive(us_citizen: bool, permanent_resident: bool) -> Self {
        if us_citizen {
            Citizenship::UsCitizen
        } else if permanent_resident {
            Citizenship::PermanentResident
        } else {
            Citizenship::International
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Citizenship::UsCitizen => "US Citizen",
            Citizenship::PermanentResident => "US Permanent Resident",
            Citizenship::International => "International",
        }
    }
}

impl fmt::Display for Citizenship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Login for the application portal.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Applicant attributes as a source supplies them. Every field is optional; unknown
/// JSON keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApplicantFields {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<u32>,
    pub colleges: Option<Vec<String>>,
    pub application_term: Option<String>,
    pub first_generation: Option<bool>,
    pub honors_college: Option<bool>,
    pub criminal_history: Option<bool>,
    pub academic_disciplinary_history: Option<bool>,
    pub legal_disciplinary_history: Option<bool>,
    pub military_service: Option<bool>,
    pub military_relatives: Option<bool>,
    pub us_citizen: Option<bool>,
    pub permanent_resident: Option<bool>,
    pub has_green_card: Option<bool>,
    pub arts_portfolio: Option<bool>,
    pub birth_country: Option<String>,
    pub birth_state: Option<String>,
    pub lived_outside_us: Option<bool>,
    pub parents_attended_stanford: Option<bool>,
    pub parents_employed_stanford: Option<bool>,
    pub relatives_employed_stanford: Option<bool>,
    pub parents_separate_address: Option<bool>,
    pub siblings: Option<u32>,
    pub siblings_applying_to_college: Option<bool>,
}

impl ApplicantFields {
    /// Fixed profile used in free-text mode, where the file is only echoed to the
    /// agent and never parsed.
    pub fn placeholder_profile() -> Self {
        Self {
            email: Some(PLACEHOLDER_EMAIL.to_string()),
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            age: Some(17),
            colleges: Some(vec!["Stanford".to_string(), "Harvard".to_string()]),
            application_term: Some(DEFAULT_APPLICATION_TERM.to_string()),
            first_generation: Some(true),
            permanent_resident: Some(true),
            has_green_card: Some(true),
            birth_country: Some("United States".to_string()),
            birth_state: Some("Idaho".to_string()),
            siblings: Some(1),
            ..Self::default()
        }
    }
}

pub const PLACEHOLDER_EMAIL: &str = "applicant@example.com";
pub const PLACEHOLDER_PASSWORD: &str = "change-me";

/// The normalized applicant. Built once per run by [`normalize`] and only read
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantRecord {
    pub credentials: Credentials,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub colleges: Vec<String>,
    pub application_term: String,
    pub first_generation: bool,
    pub honors_college: bool,
    pub criminal_history: bool,
    pub academic_disciplinary_history: bool,
    pub legal_disciplinary_history: bool,
    pub military_service: bool,
    pub military_relatives: bool,
    pub citizenship_status: Citizenship,
    pub has_green_card: bool,
    pub arts_portfolio: bool,
    pub birth_country: String,
    pub birth_state: String,
    pub lived_outside_us: bool,
    pub parents_attended_stanford: bool,
    pub parents_employed_stanford: bool,
    pub relatives_employed_stanford: bool,
    pub parents_separate_address: bool,
    pub siblings: u32,
    pub siblings_applying_to_college: bool,
    /// Verbatim source text or the re-serialized JSON document.
    pub full_context: String,
}

impl ApplicantRecord {
    pub fn email(&self) -> &str {
        &self.credentials.email
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Apply the default table to a partial record.
///
/// An empty or blank-only college list counts as absent so the record always
/// names at least one college.
pub fn normalize(
    fields: ApplicantFields,
    password: Option<String>,
    full_context: String,
) -> ApplicantRecord {
    let colleges: Vec<String> = fields
        .colleges
        .unwrap_or_default()
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    let colleges = if colleges.is_empty() {
        vec![DEFAULT_COLLEGE.to_string()]
    } else {
        colleges
    };

    let flag = |v: Option<bool>| v.unwrap_or(false);

    ApplicantRecord {
        credentials: Credentials {
            email: fields.email.unwrap_or_default(),
            password: password.unwrap_or_default(),
        },
        first_name: fields.first_name.unwrap_or_default(),
        last_name: fields.last_name.unwrap_or_default(),
        age: fields.age.unwrap_or(DEFAULT_AGE),
        colleges,
        application_term: fields
            .application_term
            .unwrap_or_else(|| DEFAULT_APPLICATION_TERM.to_string()),
        first_generation: flag(fields.first_generation),
        honors_college: flag(fields.honors_college),
        criminal_history: flag(fields.criminal_history),
        academic_disciplinary_history: flag(fields.academic_disciplinary_history),
        legal_disciplinary_history: flag(fields.legal_disciplinary_history),
        military_service: flag(fields.military_service),
        military_relatives: flag(fields.military_relatives),
        citizenship_status: Citizenship::derive(
            flag(fields.us_citizen),
            flag(fields.permanent_resident),
        ),
        has_green_card: flag(fields.has_green_card),
        arts_portfolio: flag(fields.arts_portfolio),
        birth_country: fields
            .birth_country
            .unwrap_or_else(|| DEFAULT_BIRTH_COUNTRY.to_string()),
        birth_state: fields.birth_state.unwrap_or_default(),
        lived_outside_us: flag(fields.lived_outside_us),
        parents_attended_stanford: flag(fields.parents_attended_stanford),
        parents_employed_stanford: flag(fields.parents_employed_stanford),
        relatives_employed_stanford: flag(fields.relatives_employed_stanford),
        parents_separate_address: flag(fields.parents_separate_address),
        siblings: fields.siblings.unwrap_or(DEFAULT_SIBLINGS),
        siblings_applying_to_college: flag(fields.siblings_applying_to_college),
        full_context,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citizenship_is_derived_from_two_flags() {
        assert_eq!(Citizenship::derive(true, false), Citizenship::UsCitizen);
        assert_eq!(Citizenship::derive(true, true), Citizenship::UsCitizen);
        assert_eq!(
            Citizenship::derive(false, true),
            Citizenship::PermanentResident
        );
        assert_eq!(Citizenship::derive(false, false), Citizenship::International);
        assert_eq!(Citizenship::PermanentResident.to_string(), "US Permanent Resident");
    }

    #[test]
    fn empty_fields_take_every_default() {
        let record = normalize(ApplicantFields::default(), None, String::new());
        assert_eq!(record.email(), "");
        assert_eq!(record.credentials.password, "");
        assert_eq!(record.age, DEFAULT_AGE);
        assert_eq!(record.colleges, vec![DEFAULT_COLLEGE.to_string()]);
        assert_eq!(record.application_term, "Fall 2026");
        assert_eq!(record.birth_country, "United States");
        assert_eq!(record.siblings, 0);
        assert_eq!(record.citizenship_status, Citizenship::International);
        assert!(!record.first_generation);
        assert!(!record.has_green_card);
        assert!(!record.siblings_applying_to_college);
    }

    #[test]
    fn blank_college_list_falls_back_to_default() {
        let fields = ApplicantFields {
            colleges: Some(vec![" ".to_string(), String::new()]),
            ..ApplicantFields::default()
        };
        let record = normalize(fields, None, String::new());
        assert_eq!(record.colleges, vec!["Stanford".to_string()]);
    }

    #[test]
    fn college_order_is_kept() {
        let fields = ApplicantFields {
            colleges: Some(vec!["Yale".into(), " MIT ".into(), "Brown".into()]),
            ..ApplicantFields::default()
        };
        let record = normalize(fields, None, String::new());
        assert_eq!(record.colleges, vec!["Yale", "MIT", "Brown"]);
    }

    #[test]
    fn placeholder_profile_is_a_permanent_resident() {
        let record = normalize(
            ApplicantFields::placeholder_profile(),
            Some(PLACEHOLDER_PASSWORD.into()),
            "ctx".into(),
        );
        assert_eq!(record.full_name(), "John Doe");
        assert_eq!(record.colleges, vec!["Stanford", "Harvard"]);
        assert_eq!(record.citizenship_status, Citizenship::PermanentResident);
        assert!(record.first_generation);
        assert_eq!(record.birth_state, "Idaho");
        assert_eq!(record.siblings, 1);
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials {
            email: "a@b.com".into(),
            password: "hunter2".into(),
        };
        let shown = format!("{creds:?}");
        assert!(shown.contains("a@b.com"));
        assert!(!shown.contains("hunter2"));
    }
}
