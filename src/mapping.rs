//! Column-to-field mapping: heuristic detection, user overrides, validation,
//! and conversion of parsed rows into submission records.
//!
//! ## Detection
//!
//! [`detect_field()`] normalizes the header (lowercase, with `_`, spaces, and
//! `-` removed) and walks an ordered rule list. The first rule whose condition
//! holds decides the field and its confidence; later rules are never consulted.
//! Some rules also look at the column's sample values, so a header-less hint
//! such as an `@` address still maps to an email field.
//!
//! Postal-code headers are matched before phone headers because numeric zip
//! samples also satisfy the phone pattern.
//!
//! ## Overrides
//!
//! [`FieldMapping::set_mapped_field()`] is the only way to change a mapping
//! after detection and always clears the auto-mapped flag, even when the
//! chosen field equals the detected one.

use std::{str::FromStr, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    analyzer::{ColumnStats, analyze_column},
    error::MappingError,
    fields::TargetField,
    parser::{Row, is_blank, trim_blank},
};

/// Detections scoring above this value are flagged as auto-mapped.
pub const AUTO_MAP_THRESHOLD: u8 = 70;

pub const NOTHING_MAPPED: &str = "At least one field must be mapped";

/// Outcome of running the detection rules against one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub field: Option<TargetField>,
    pub confidence: u8,
}

impl Detection {
    const NONE: Detection = Detection {
        field: None,
        confidence: 0,
    };

    const fn of(field: TargetField, confidence: u8) -> Self {
        Detection {
            field: Some(field),
            confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub csv_column: String,
    mapped_field: Option<TargetField>,
    pub confidence: u8,
    pub completeness: u8,
    pub samples: Vec<String>,
    is_auto_mapped: bool,
}

impl FieldMapping {
    /// Builds a mapping as the detector would, deriving the auto-mapped flag
    /// from `confidence`.
    pub fn new(
        csv_column: impl Into<String>,
        mapped_field: Option<TargetField>,
        confidence: u8,
        completeness: u8,
        samples: Vec<String>,
    ) -> Self {
        Self {
            csv_column: csv_column.into(),
            mapped_field,
            confidence,
            completeness,
            samples,
            is_auto_mapped: confidence > AUTO_MAP_THRESHOLD,
        }
    }

    pub fn from_stats(stats: &ColumnStats) -> Self {
        let detection = detect_field(&stats.name, &stats.samples);
        Self::new(
            stats.name.clone(),
            detection.field,
            detection.confidence,
            stats.completeness,
            stats.samples.clone(),
        )
    }

    pub fn mapped_field(&self) -> Option<TargetField> {
        self.mapped_field
    }

    pub fn is_auto_mapped(&self) -> bool {
        self.is_auto_mapped
    }

    /// Records a user choice. The mapping is no longer considered automatic.
    pub fn set_mapped_field(&mut self, field: Option<TargetField>) {
        self.mapped_field = field;
        self.is_auto_mapped = false;
    }

    /// The target field when this column contributes to submitted records.
    pub fn accepted_field(&self) -> Option<TargetField> {
        self.mapped_field.filter(|field| field.is_importable())
    }
}

/// A `COLUMN=FIELD` decision supplied on the command line or in a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOverride {
    pub column: String,
    /// `None` clears the mapping.
    pub field: Option<TargetField>,
}

impl FromStr for MappingOverride {
    type Err = MappingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (column, field) = value
            .rsplit_once('=')
            .ok_or_else(|| MappingError::MalformedOverride(value.to_string()))?;
        let column = trim_blank(column);
        if column.is_empty() {
            return Err(MappingError::MalformedOverride(value.to_string()));
        }
        let field = trim_blank(field);
        let field = if field.eq_ignore_ascii_case("none") || field.is_empty() {
            None
        } else {
            Some(
                field
                    .parse::<TargetField>()
                    .map_err(|_| MappingError::UnknownField(field.to_string()))?,
            )
        };
        Ok(MappingOverride {
            column: column.to_string(),
            field,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl MappingValidation {
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

/// Proposes one mapping per column, in column order.
pub fn detect_fields(columns: &[String], rows: &[Row]) -> Vec<FieldMapping> {
    columns
        .iter()
        .map(|column| FieldMapping::from_stats(&analyze_column(column, rows)))
        .collect()
}

pub fn detect_field(column_name: &str, samples: &[String]) -> Detection {
    let probe = Probe {
        normalized: normalize_header(column_name),
        samples,
    };
    RULES
        .iter()
        .find(|rule| (rule.applies)(&probe))
        .map(|rule| (rule.detect)(&probe))
        .unwrap_or(Detection::NONE)
}

/// Applies a user decision to the mapping for `column`.
pub fn apply_override(
    mappings: &mut [FieldMapping],
    decision: &MappingOverride,
) -> Result<(), MappingError> {
    let mapping = mappings
        .iter_mut()
        .find(|mapping| mapping.csv_column == decision.column)
        .ok_or_else(|| MappingError::ColumnNotFound(decision.column.clone()))?;
    mapping.set_mapped_field(decision.field);
    Ok(())
}

/// Marks every column as excluded.
pub fn skip_all(mappings: &mut [FieldMapping]) {
    for mapping in mappings {
        mapping.set_mapped_field(Some(TargetField::DoNotImport));
    }
}

pub fn auto_mapped_count(mappings: &[FieldMapping]) -> usize {
    mappings.iter().filter(|m| m.is_auto_mapped()).count()
}

/// Requires at least one column mapped to an importable field. Several columns
/// may target the same field.
pub fn validate_mappings(mappings: &[FieldMapping]) -> MappingValidation {
    let mut errors = Vec::new();
    if !mappings.iter().any(|m| m.accepted_field().is_some()) {
        errors.push(NOTHING_MAPPED.to_string());
    }
    MappingValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Accepted target fields in mapping order, duplicates included.
pub fn mapped_columns(mappings: &[FieldMapping]) -> Vec<TargetField> {
    mappings
        .iter()
        .filter_map(FieldMapping::accepted_field)
        .collect()
}

/// Converts one row into a record keyed by lowercase field identifiers.
///
/// Blank values are left out rather than stored as empty strings. When two
/// columns feed the same field, the later non-blank value wins.
pub fn transform_row(row: &Row, mappings: &[FieldMapping]) -> Map<String, Value> {
    let mut record = Map::new();
    for mapping in mappings {
        let Some(field) = mapping.accepted_field() else {
            continue;
        };
        let Some(value) = row.get(&mapping.csv_column) else {
            continue;
        };
        if is_blank(value) {
            continue;
        }
        record.insert(
            field.record_key(),
            Value::String(trim_blank(value).to_string()),
        );
    }
    record
}

pub fn transform_rows(rows: &[Row], mappings: &[FieldMapping]) -> Vec<Map<String, Value>> {
    rows.iter().map(|row| transform_row(row, mappings)).collect()
}

struct Probe<'a> {
    normalized: String,
    samples: &'a [String],
}

impl Probe<'_> {
    fn has(&self, token: &str) -> bool {
        self.normalized.contains(token)
    }

    fn has_any(&self, tokens: &[&str]) -> bool {
        tokens.iter().any(|token| self.has(token))
    }

    fn is_one_of(&self, names: &[&str]) -> bool {
        names.contains(&self.normalized.as_str())
    }

    fn any_sample(&self, predicate: impl Fn(&str) -> bool) -> bool {
        self.samples.iter().any(|sample| predicate(sample))
    }
}

struct Rule {
    applies: fn(&Probe<'_>) -> bool,
    detect: fn(&Probe<'_>) -> Detection,
}

static RULES: [Rule; 13] = [
    Rule {
        applies: looks_like_email,
        detect: email_kind,
    },
    Rule {
        applies: looks_like_first_name,
        detect: |_| Detection::of(TargetField::FirstName, 95),
    },
    Rule {
        applies: looks_like_last_name,
        detect: |_| Detection::of(TargetField::LastName, 95),
    },
    Rule {
        applies: |p| p.has_any(&["zip", "postal", "postcode"]),
        detect: |_| Detection::of(TargetField::PersonalZip, 90),
    },
    Rule {
        applies: looks_like_phone,
        detect: |_| Detection::of(TargetField::PhoneNumber, 85),
    },
    Rule {
        applies: looks_like_company_name,
        detect: |_| Detection::of(TargetField::CompanyName, 90),
    },
    Rule {
        applies: looks_like_domain,
        detect: |_| Detection::of(TargetField::CompanyDomain, 85),
    },
    Rule {
        applies: |p| p.has("linkedin") || p.any_sample(|s| s.contains("linkedin.com")),
        detect: |_| Detection::of(TargetField::LinkedinUrl, 95),
    },
    Rule {
        applies: |p| p.has_any(&["address", "street"]),
        detect: |_| Detection::of(TargetField::PersonalAddress, 80),
    },
    Rule {
        applies: |p| p.has("city"),
        detect: |_| Detection::of(TargetField::PersonalCity, 90),
    },
    Rule {
        applies: |p| p.has_any(&["state", "province"]),
        detect: |_| Detection::of(TargetField::PersonalState, 90),
    },
    Rule {
        applies: |p| p.has_any(&["industry", "sector"]),
        detect: |_| Detection::of(TargetField::CompanyIndustry, 85),
    },
    Rule {
        applies: |p| p.has("upid") || p.is_one_of(&["id"]),
        detect: |_| Detection::of(TargetField::UpId, 80),
    },
];

fn looks_like_email(p: &Probe<'_>) -> bool {
    p.has("email") || p.is_one_of(&["e"]) || p.any_sample(|s| email_pattern().is_match(s))
}

fn email_kind(p: &Probe<'_>) -> Detection {
    if p.has_any(&["business", "work"]) {
        Detection::of(TargetField::BusinessEmail, 95)
    } else if p.has("personal") {
        Detection::of(TargetField::PersonalEmail, 95)
    } else {
        Detection::of(TargetField::Email, 90)
    }
}

fn looks_like_first_name(p: &Probe<'_>) -> bool {
    (p.has("first") && p.has("name")) || p.is_one_of(&["firstname", "fname", "givenname"])
}

fn looks_like_last_name(p: &Probe<'_>) -> bool {
    (p.has("last") && p.has("name"))
        || p.is_one_of(&["lastname", "lname", "surname", "familyname"])
}

fn looks_like_phone(p: &Probe<'_>) -> bool {
    p.has_any(&["phone", "tel", "mobile", "cell"]) || p.any_sample(|s| phone_pattern().is_match(s))
}

fn looks_like_company_name(p: &Probe<'_>) -> bool {
    (p.has("company") && p.has("name"))
        || p.is_one_of(&["company", "companyname", "organization", "business"])
}

fn looks_like_domain(p: &Probe<'_>) -> bool {
    p.has_any(&["domain", "website"]) || p.any_sample(|s| domain_pattern().is_match(s))
}

fn normalize_header(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|ch| !matches!(ch, '_' | '-') && !ch.is_whitespace())
        .collect()
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("valid phone regex"))
}

fn domain_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9-]+\.[A-Za-z]{2,}$").expect("valid domain regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn normalize_header_strips_separators() {
        assert_eq!(normalize_header("First Name"), "firstname");
        assert_eq!(normalize_header("PERSONAL_ZIP"), "personalzip");
        assert_eq!(normalize_header("e-mail"), "email");
        assert_eq!(normalize_header("Up\tId"), "upid");
    }

    #[test]
    fn zip_header_wins_over_phone_samples() {
        let detection = detect_field("PERSONAL_ZIP", &samples(&["10001", "94105"]));
        assert_eq!(detection, Detection::of(TargetField::PersonalZip, 90));
    }

    #[test]
    fn email_samples_override_unhelpful_header() {
        let detection = detect_field("contact", &samples(&["ana@example.org"]));
        assert_eq!(detection, Detection::of(TargetField::Email, 90));
    }

    #[test]
    fn email_rule_precedes_name_rules() {
        let detection = detect_field("first_name_email", &[]);
        assert_eq!(detection.field, Some(TargetField::Email));
    }

    #[test]
    fn telephone_substring_matches_inside_other_words() {
        // "hotel" contains "tel"
        let detection = detect_field("hotel", &[]);
        assert_eq!(detection.field, Some(TargetField::PhoneNumber));
    }

    #[test]
    fn bare_domain_samples_detected() {
        let detection = detect_field("site", &samples(&["Acme-Corp.IO"]));
        assert_eq!(detection, Detection::of(TargetField::CompanyDomain, 85));
    }

    #[test]
    fn domain_samples_only_match_ascii_letters() {
        // U+017F and U+212A case-fold to ASCII letters
        assert_eq!(detect_field("x", &samples(&["ab.\u{17f}e"])), Detection::NONE);
        assert_eq!(detect_field("x", &samples(&["ab.\u{212a}m"])), Detection::NONE);
        assert_eq!(
            detect_field("x", &samples(&["AB.Km"])),
            Detection::of(TargetField::CompanyDomain, 85)
        );
    }

    #[test]
    fn identifier_header_maps_to_up_id() {
        assert_eq!(detect_field("ID", &[]).field, Some(TargetField::UpId));
        assert_eq!(detect_field("up_id", &[]).field, Some(TargetField::UpId));
        assert_eq!(detect_field("identifier", &[]), Detection::NONE);
    }

    #[test]
    fn override_parsing_accepts_none_and_rejects_unknown_fields() {
        let decision: MappingOverride = "Work Email=business_email".parse().expect("parse");
        assert_eq!(decision.column, "Work Email");
        assert_eq!(decision.field, Some(TargetField::BusinessEmail));

        let cleared: MappingOverride = "a=b=NONE".parse().expect("parse");
        assert_eq!(cleared.column, "a=b");
        assert_eq!(cleared.field, None);

        assert_eq!(
            "Email=PHONE".parse::<MappingOverride>(),
            Err(MappingError::UnknownField("PHONE".to_string()))
        );
        assert!(matches!(
            "Email".parse::<MappingOverride>(),
            Err(MappingError::MalformedOverride(_))
        ));
    }
}
