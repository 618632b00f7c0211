//! External references and name/value properties.

use super::Hash;
use crate::schema::{SchemaVersion, VersionGated};
use std::fmt;

/// Link to a resource outside the BOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReference {
    /// Reference type
    pub reference_type: ExternalReferenceType,
    /// Target URL or BOM-Link
    pub url: String,
    /// Free-text comment
    pub comment: Option<String>,
    /// Hashes of the referenced resource (1.3+)
    pub hashes: Vec<Hash>,
}

impl ExternalReference {
    /// Create a reference without comment or hashes.
    #[must_use]
    pub fn new(reference_type: ExternalReferenceType, url: impl Into<String>) -> Self {
        Self {
            reference_type,
            url: url.into(),
            comment: None,
            hashes: Vec::new(),
        }
    }
}

/// Name/value pair (1.3+ on most owners).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: Option<String>,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

macro_rules! external_reference_types {
    ($($variant:ident => ($wire:literal, $since:ident)),+ $(,)?) => {
        /// External reference classification.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ExternalReferenceType {
            $($variant,)+
        }

        impl ExternalReferenceType {
            /// Parse the `type` wire value; unrecognised values map to [`Self::Other`].
            #[must_use]
            pub fn from_wire(value: &str) -> Self {
                match value.trim() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other,
                }
            }

            /// The `type` wire value.
            #[must_use]
            pub const fn as_wire(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl VersionGated for ExternalReferenceType {
            fn since(&self) -> SchemaVersion {
                match self {
                    $(Self::$variant => SchemaVersion::$since,)+
                }
            }
        }
    };
}

external_reference_types! {
    Vcs => ("vcs", V1_1),
    IssueTracker => ("issue-tracker", V1_1),
    Website => ("website", V1_1),
    Advisories => ("advisories", V1_1),
    Bom => ("bom", V1_1),
    MailingList => ("mailing-list", V1_1),
    Social => ("social", V1_1),
    Chat => ("chat", V1_1),
    Documentation => ("documentation", V1_1),
    Support => ("support", V1_1),
    Distribution => ("distribution", V1_1),
    License => ("license", V1_1),
    BuildMeta => ("build-meta", V1_1),
    BuildSystem => ("build-system", V1_1),
    Other => ("other", V1_1),
    ReleaseNotes => ("release-notes", V1_4),
    DistributionIntake => ("distribution-intake", V1_5),
    SecurityContact => ("security-contact", V1_5),
    ModelCard => ("model-card", V1_5),
    Log => ("log", V1_5),
    Configuration => ("configuration", V1_5),
    Evidence => ("evidence", V1_5),
    Formulation => ("formulation", V1_5),
    Attestation => ("attestation", V1_5),
    ThreatModel => ("threat-model", V1_5),
    AdversaryModel => ("adversary-model", V1_5),
    RiskAssessment => ("risk-assessment", V1_5),
    VulnerabilityAssertion => ("vulnerability-assertion", V1_5),
    ExploitabilityStatement => ("exploitability-statement", V1_5),
    PentestReport => ("pentest-report", V1_5),
    StaticAnalysisReport => ("static-analysis-report", V1_5),
    DynamicAnalysisReport => ("dynamic-analysis-report", V1_5),
    RuntimeAnalysisReport => ("runtime-analysis-report", V1_5),
    ComponentAnalysisReport => ("component-analysis-report", V1_5),
    MaturityReport => ("maturity-report", V1_5),
    CertificationReport => ("certification-report", V1_5),
    CodifiedInfrastructure => ("codified-infrastructure", V1_5),
    QualityMetrics => ("quality-metrics", V1_5),
    Poam => ("poam", V1_5),
    SourceDistribution => ("source-distribution", V1_6),
    ElectronicSignature => ("electronic-signature", V1_6),
    DigitalSignature => ("digital-signature", V1_6),
    Rfc9116 => ("rfc-9116", V1_6),
}

impl fmt::Display for ExternalReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_type_wire_values() {
        assert_eq!(
            ExternalReferenceType::from_wire("issue-tracker"),
            ExternalReferenceType::IssueTracker
        );
        assert_eq!(ExternalReferenceType::Rfc9116.as_wire(), "rfc-9116");
        assert_eq!(
            ExternalReferenceType::from_wire("telepathy"),
            ExternalReferenceType::Other
        );
    }

    #[test]
    fn test_reference_type_gating() {
        assert!(ExternalReferenceType::Vcs.admitted_in(SchemaVersion::V1_1));
        assert!(!ExternalReferenceType::ReleaseNotes.admitted_in(SchemaVersion::V1_3));
        assert!(ExternalReferenceType::ReleaseNotes.admitted_in(SchemaVersion::V1_4));
        assert!(!ExternalReferenceType::SecurityContact.admitted_in(SchemaVersion::V1_4));
    }
}
