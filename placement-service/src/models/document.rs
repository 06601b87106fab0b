//! Document model - student compliance documents and their approval lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Document kinds the system accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Immunization,
    BackgroundCheck,
    CprCertification,
    HealthClearance,
    LiabilityInsurance,
    Other,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Immunization => "immunization",
            DocumentType::BackgroundCheck => "background_check",
            DocumentType::CprCertification => "cpr_certification",
            DocumentType::HealthClearance => "health_clearance",
            DocumentType::LiabilityInsurance => "liability_insurance",
            DocumentType::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "immunization" => Some(DocumentType::Immunization),
            "background_check" => Some(DocumentType::BackgroundCheck),
            "cpr_certification" => Some(DocumentType::CprCertification),
            "health_clearance" => Some(DocumentType::HealthClearance),
            "liability_insurance" => Some(DocumentType::LiabilityInsurance),
            "other" => Some(DocumentType::Other),
            _ => None,
        }
    }
}

/// Document lifecycle states.
///
/// `parse` is fail-closed: an unknown status code maps to `None`, never to
/// `Pending`, so a corrupt row can never become approvable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
    Expired,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
            DocumentStatus::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DocumentStatus::Pending),
            "approved" => Some(DocumentStatus::Approved),
            "rejected" => Some(DocumentStatus::Rejected),
            "expired" => Some(DocumentStatus::Expired),
            _ => None,
        }
    }
}

/// Errors from invalid lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStateError {
    /// Transition attempted from a non-Pending state.
    NotPending { current: &'static str },
    /// Rejection submitted without a reason.
    MissingRejectionReason,
}

impl std::fmt::Display for DocumentStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStateError::NotPending { current } => {
                write!(f, "Document is {} and can no longer be verified", current)
            }
            DocumentStateError::MissingRejectionReason => {
                write!(f, "Rejecting a document requires a reason")
            }
        }
    }
}

impl std::error::Error for DocumentStateError {}

/// Document entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub document_id: Uuid,
    pub document_name: String,
    pub doc_type: DocumentType,
    pub url: String,
    pub student_id: Uuid,
    pub status_code: String,
    pub verified_by: Option<Uuid>,
    pub verified_utc: Option<DateTime<Utc>>,
    pub validation_checks: HashMap<String, bool>,
    pub validation_notes: Option<String>,
    pub created_utc: DateTime<Utc>,
}

impl Document {
    /// Create a new pending document for a student.
    pub fn new(document_name: String, doc_type: DocumentType, url: String, student_id: Uuid) -> Self {
        Self {
            document_id: Uuid::new_v4(),
            document_name,
            doc_type,
            url,
            student_id,
            status_code: DocumentStatus::Pending.as_str().to_string(),
            verified_by: None,
            verified_utc: None,
            validation_checks: HashMap::new(),
            validation_notes: None,
            created_utc: Utc::now(),
        }
    }

    /// Typed status. `None` for unknown codes.
    pub fn status(&self) -> Option<DocumentStatus> {
        DocumentStatus::parse(&self.status_code)
    }

    /// Approve a pending document, recording who verified it and when.
    pub fn approve(&mut self, verified_by: Uuid) -> Result<(), DocumentStateError> {
        self.ensure_pending()?;
        self.status_code = DocumentStatus::Approved.as_str().to_string();
        self.verified_by = Some(verified_by);
        self.verified_utc = Some(Utc::now());
        Ok(())
    }

    /// Reject a pending document. A non-empty reason is required.
    pub fn reject(&mut self, verified_by: Uuid, reason: &str) -> Result<(), DocumentStateError> {
        if reason.trim().is_empty() {
            return Err(DocumentStateError::MissingRejectionReason);
        }
        self.ensure_pending()?;
        self.status_code = DocumentStatus::Rejected.as_str().to_string();
        self.verified_by = Some(verified_by);
        self.verified_utc = Some(Utc::now());
        self.validation_notes = Some(reason.to_string());
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), DocumentStateError> {
        match self.status() {
            Some(DocumentStatus::Pending) => Ok(()),
            Some(other) => Err(DocumentStateError::NotPending {
                current: other.as_str(),
            }),
            None => Err(DocumentStateError::NotPending { current: "unknown" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_doc() -> Document {
        Document::new(
            "CPR card".to_string(),
            DocumentType::CprCertification,
            "https://files.example/cpr.pdf".to_string(),
            Uuid::new_v4(),
        )
    }

    #[test]
    fn approve_records_verifier() {
        let mut doc = pending_doc();
        let manager = Uuid::new_v4();
        doc.approve(manager).unwrap();
        assert_eq!(doc.status(), Some(DocumentStatus::Approved));
        assert_eq!(doc.verified_by, Some(manager));
        assert!(doc.verified_utc.is_some());
    }

    #[test]
    fn approve_twice_is_rejected() {
        let mut doc = pending_doc();
        doc.approve(Uuid::new_v4()).unwrap();
        let err = doc.approve(Uuid::new_v4()).unwrap_err();
        assert_eq!(err, DocumentStateError::NotPending { current: "approved" });
    }

    #[test]
    fn reject_requires_reason() {
        let mut doc = pending_doc();
        let err = doc.reject(Uuid::new_v4(), "   ").unwrap_err();
        assert_eq!(err, DocumentStateError::MissingRejectionReason);
        assert_eq!(doc.status(), Some(DocumentStatus::Pending));
    }

    #[test]
    fn reject_records_reason() {
        let mut doc = pending_doc();
        doc.reject(Uuid::new_v4(), "expired card").unwrap();
        assert_eq!(doc.status(), Some(DocumentStatus::Rejected));
        assert_eq!(doc.validation_notes.as_deref(), Some("expired card"));
    }

    #[test]
    fn unknown_status_code_is_not_pending() {
        let mut doc = pending_doc();
        doc.status_code = "in-review".to_string();
        assert_eq!(doc.status(), None);
        assert!(doc.approve(Uuid::new_v4()).is_err());
    }
}
