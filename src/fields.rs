//! The fixed catalog of fields a CSV column can be mapped onto.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldCategory {
    Personal,
    Business,
    System,
    Special,
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldCategory::Personal => "Personal",
            FieldCategory::Business => "Business",
            FieldCategory::System => "System",
            FieldCategory::Special => "Special",
        };
        f.write_str(label)
    }
}

/// Canonical enrichment field identifiers, serialized in SCREAMING_SNAKE_CASE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    PersonalAddress,
    PersonalZip,
    PersonalState,
    PersonalCity,
    PersonalEmail,
    #[serde(rename = "SHA256_PERSONAL_EMAIL")]
    Sha256PersonalEmail,
    BusinessEmail,
    CompanyName,
    CompanyDomain,
    CompanyIndustry,
    LinkedinUrl,
    UpId,
    /// Excludes the column from submitted records.
    DoNotImport,
}

impl TargetField {
    /// Catalog order, as presented to users.
    pub const ALL: [TargetField; 17] = [
        TargetField::FirstName,
        TargetField::LastName,
        TargetField::Email,
        TargetField::PhoneNumber,
        TargetField::PersonalAddress,
        TargetField::PersonalZip,
        TargetField::PersonalState,
        TargetField::PersonalCity,
        TargetField::PersonalEmail,
        TargetField::Sha256PersonalEmail,
        TargetField::BusinessEmail,
        TargetField::CompanyName,
        TargetField::CompanyDomain,
        TargetField::CompanyIndustry,
        TargetField::LinkedinUrl,
        TargetField::UpId,
        TargetField::DoNotImport,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            TargetField::FirstName => "FIRST_NAME",
            TargetField::LastName => "LAST_NAME",
            TargetField::Email => "EMAIL",
            TargetField::PhoneNumber => "PHONE_NUMBER",
            TargetField::PersonalAddress => "PERSONAL_ADDRESS",
            TargetField::PersonalZip => "PERSONAL_ZIP",
            TargetField::PersonalState => "PERSONAL_STATE",
            TargetField::PersonalCity => "PERSONAL_CITY",
            TargetField::PersonalEmail => "PERSONAL_EMAIL",
            TargetField::Sha256PersonalEmail => "SHA256_PERSONAL_EMAIL",
            TargetField::BusinessEmail => "BUSINESS_EMAIL",
            TargetField::CompanyName => "COMPANY_NAME",
            TargetField::CompanyDomain => "COMPANY_DOMAIN",
            TargetField::CompanyIndustry => "COMPANY_INDUSTRY",
            TargetField::LinkedinUrl => "LINKEDIN_URL",
            TargetField::UpId => "UP_ID",
            TargetField::DoNotImport => "DO_NOT_IMPORT",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TargetField::FirstName => "First Name",
            TargetField::LastName => "Last Name",
            TargetField::Email => "Email",
            TargetField::PhoneNumber => "Phone Number",
            TargetField::PersonalAddress => "Personal Address",
            TargetField::PersonalZip => "Personal Zip",
            TargetField::PersonalState => "Personal State",
            TargetField::PersonalCity => "Personal City",
            TargetField::PersonalEmail => "Personal Email",
            TargetField::Sha256PersonalEmail => "SHA256 Personal Email",
            TargetField::BusinessEmail => "Business Email",
            TargetField::CompanyName => "Company Name",
            TargetField::CompanyDomain => "Company Domain",
            TargetField::CompanyIndustry => "Company Industry",
            TargetField::LinkedinUrl => "LinkedIn URL",
            TargetField::UpId => "UP ID",
            TargetField::DoNotImport => "Do Not Import",
        }
    }

    pub const fn category(self) -> FieldCategory {
        match self {
            TargetField::FirstName
            | TargetField::LastName
            | TargetField::Email
            | TargetField::PhoneNumber
            | TargetField::PersonalAddress
            | TargetField::PersonalZip
            | TargetField::PersonalState
            | TargetField::PersonalCity
            | TargetField::PersonalEmail
            | TargetField::Sha256PersonalEmail => FieldCategory::Personal,
            TargetField::BusinessEmail
            | TargetField::CompanyName
            | TargetField::CompanyDomain
            | TargetField::CompanyIndustry
            | TargetField::LinkedinUrl => FieldCategory::Business,
            TargetField::UpId => FieldCategory::System,
            TargetField::DoNotImport => FieldCategory::Special,
        }
    }

    /// False only for [`TargetField::DoNotImport`].
    pub const fn is_importable(self) -> bool {
        !matches!(self, TargetField::DoNotImport)
    }

    /// Key used for this field inside submitted records.
    pub fn record_key(self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        TargetField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown target field '{wanted}'"))
    }
}
