use crate::types::GlobalStatus;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// StatusRecord
// ---------------------------------------------------------------------------

/// Raw status row as persisted. Historical rows are loosely coded: some carry
/// a stable machine `code`, some only a human label under `label`, `name` or
/// `key`, some neither. Every field is optional on purpose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl StatusRecord {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            label: Some(label.into()),
            name: None,
            key: None,
        }
    }

    /// Best human-readable rendering of the record, for audit messages.
    pub fn display_label(&self) -> &str {
        free_text(self)
            .or(self.code.as_deref())
            .unwrap_or("inconnu")
    }
}

// ---------------------------------------------------------------------------
// Decision tables
// ---------------------------------------------------------------------------

/// Machine-code keyword groups, checked first and in this order. A lowercased
/// code matching any keyword (substring) resolves to the paired status.
const CODE_GROUPS: &[(GlobalStatus, &[&str])] = &[
    (GlobalStatus::Draft, &["draft", "prospect", "created"]),
    (
        GlobalStatus::MedicalReview,
        &["medical_review", "pending_medical", "awaiting_medical"],
    ),
    (
        GlobalStatus::MedicalMoreInfo,
        &["need_info", "medical_more_info", "incomplete"],
    ),
    (
        GlobalStatus::Rejected,
        &["rejected_medical", "rejected", "refused"],
    ),
    (
        GlobalStatus::Scheduled,
        &["surgery_scheduled", "scheduled", "confirmed"],
    ),
    (
        GlobalStatus::CommercialInProgress,
        &[
            "validated_medical",
            "approved_medical",
            "commercial",
            "quote_pending",
            "awaiting_quote",
        ],
    ),
];

/// One row of the free-text table: matches when the lowercased text contains
/// any of `any` and none of `none`.
struct TextRule {
    status: GlobalStatus,
    any: &'static [&'static str],
    none: &'static [&'static str],
}

/// French-label keyword groups, evaluated in this exact order; the ordering is
/// the tie-break for text matching several groups and must not be reordered.
/// The `none` guard on the review row keeps "Validé médicalement" (which
/// contains "médicale") out of the review-pending bucket.
const TEXT_RULES: &[TextRule] = &[
    TextRule {
        status: GlobalStatus::Draft,
        any: &["créé", "brouillon", "dossier", "prospect"],
        none: &[],
    },
    TextRule {
        status: GlobalStatus::MedicalReview,
        any: &["revue médicale", "médicale", "medical_review"],
        none: &["validé"],
    },
    TextRule {
        status: GlobalStatus::MedicalMoreInfo,
        any: &[
            "à compléter",
            "incomplet",
            "infos supplémentaires",
            "complément",
            "need_info",
            "more_info",
        ],
        none: &[],
    },
    TextRule {
        status: GlobalStatus::Rejected,
        any: &["refus", "rejet", "rejected"],
        none: &[],
    },
    TextRule {
        status: GlobalStatus::Scheduled,
        any: &[
            "programmé",
            "scheduled",
            "confirmé",
            "confirmed",
            "acompte",
            "deposit",
        ],
        none: &[],
    },
    TextRule {
        status: GlobalStatus::CommercialInProgress,
        any: &[
            "validé",
            "devis",
            "date",
            "programmation",
            "chirurgie",
            "chirurgien",
            "commercial",
            "quote",
            "surgeon",
        ],
        none: &[],
    },
];

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

/// First non-empty free-text field, in fixed extractor order.
fn free_text(record: &StatusRecord) -> Option<&str> {
    [
        record.label.as_deref(),
        record.name.as_deref(),
        record.key.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|s| !s.is_empty())
}

/// Map a persisted status record to its canonical global status.
///
/// Total and pure: a missing record, an unrecognized code and unmatched text
/// all fall back to `Draft`. The code table takes priority over the label
/// fields; an unrecognized code still gets a second chance through the
/// free-text table.
pub fn normalize(record: Option<&StatusRecord>) -> GlobalStatus {
    let Some(record) = record else {
        return GlobalStatus::Draft;
    };

    if let Some(code) = record.code.as_deref() {
        let code = code.trim().to_lowercase();
        if !code.is_empty() {
            for (status, keywords) in CODE_GROUPS {
                if keywords.iter().any(|k| code.contains(k)) {
                    return *status;
                }
            }
        }
    }

    let Some(text) = free_text(record) else {
        return GlobalStatus::Draft;
    };
    let text = text.to_lowercase();
    for rule in TEXT_RULES {
        if rule.any.iter().any(|k| text.contains(k)) && !rule.none.iter().any(|k| text.contains(k))
        {
            return rule.status;
        }
    }

    GlobalStatus::Draft
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
