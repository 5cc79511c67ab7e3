//! Explanation Generator
//!
//! Produces two plain-language explanations for a record, one for payment
//! operations staff and one for developers, from category/severity templates.
//!
//! Templates may use the placeholders `{code}`, `{name}`, `{detail}`,
//! `{cause}` and `{fix}`.

use crate::core::catalog::{Category, ErrorRecord, Severity};

/// Substituted for `{cause}` when a record lists no common causes.
pub const CAUSE_FALLBACK: &str = "no common cause is documented for this code";

/// Substituted for `{fix}` when a record lists no fix steps.
pub const FIX_FALLBACK: &str = "review the rejection details with your payment provider";

/// Recognised placeholders.
pub const PLACEHOLDERS: [&str; 5] = ["{code}", "{name}", "{detail}", "{cause}", "{fix}"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub for_operations: String,
    pub for_developers: String,
}

// ============================================================================
// Template Table
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct SeverityTemplates {
    pub fatal: &'static str,
    pub temporary: &'static str,
}

impl SeverityTemplates {
    pub fn get(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Fatal => self.fatal,
            Severity::Temporary => self.temporary,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CategoryTemplates {
    pub category: Category,
    pub operations: SeverityTemplates,
    pub developers: SeverityTemplates,
}

/// Used for categories missing from a table.
pub const OTHER_TEMPLATES: CategoryTemplates = CategoryTemplates {
    category: Category::Other,
    operations: SeverityTemplates {
        fatal: "Payment rejected ({code}: {name}). The {detail}. Review the specific error details and contact your payment provider for guidance.",
        temporary: "Payment processing delayed ({code}). The {detail}. Monitor the payment status and contact support if not resolved.",
    },
    developers: SeverityTemplates {
        fatal: "Error {code} ({name}): Unclassified rejection. Parse the full AddtlInf element for bank-specific error details. Log complete pacs.002/camt.053 response for debugging. Contact payment gateway support with MsgId for investigation.",
        temporary: "Error {code}: Processing delay. Monitor via status inquiry (pacs.028). Implement webhook or polling for status updates. Most temporary errors resolve within 4 hours.",
    },
};

pub static TEMPLATES: &[CategoryTemplates] = &[
    CategoryTemplates {
        category: Category::Account,
        operations: SeverityTemplates {
            fatal: "This payment was rejected due to an account problem ({code}: {name}). The {detail}. Contact the beneficiary or sender to verify account details and request updated banking information before resubmitting.",
            temporary: "This payment is on hold due to a temporary account issue ({code}). The {detail}. This may resolve automatically, but consider contacting the account holder to verify status.",
        },
        developers: SeverityTemplates {
            fatal: "Error {code} ({name}): Account validation failed. Check the following XML elements: DbtrAcct/Id/IBAN or CdtrAcct/Id/IBAN. Ensure the account exists, is active, and currency matches. Implement pre-submission account validation via API if available.",
            temporary: "Error {code}: Temporary account status issue. The account may be under maintenance or pending activation. Implement retry logic with exponential backoff (recommended: 3 retries, 5/15/60 min intervals).",
        },
    },
    CategoryTemplates {
        category: Category::Amount,
        operations: SeverityTemplates {
            fatal: "Payment rejected due to an amount issue ({code}: {name}). The {detail}. Review the payment amount, check for limits or restrictions, and adjust before resubmitting.",
            temporary: "Payment delayed due to amount validation ({code}). The {detail}. Check daily/transaction limits and retry when limits reset.",
        },
        developers: SeverityTemplates {
            fatal: "Error {code} ({name}): Amount validation failed. Verify InstdAmt or EqvtAmt elements. Check: (1) Amount > 0, (2) Within transaction limits, (3) Currency code valid (ISO 4217), (4) Decimal places match currency. Implement client-side amount validation before submission.",
            temporary: "Error {code}: Amount limit temporarily exceeded. Check IntrBkSttlmAmt against daily aggregate limits. Implement limit tracking to prevent over-submission.",
        },
    },
    CategoryTemplates {
        category: Category::Party,
        operations: SeverityTemplates {
            fatal: "Payment rejected due to party identification issue ({code}: {name}). The {detail}. Verify the sender or beneficiary details (name, address, ID) and correct before resubmitting.",
            temporary: "Payment on hold for party verification ({code}). The {detail}. Additional documentation may be required.",
        },
        developers: SeverityTemplates {
            fatal: "Error {code} ({name}): Party identification failed. Check Dbtr/Nm, Cdtr/Nm, and related Id elements. Ensure: (1) Name format matches bank requirements, (2) Address is complete, (3) ID type/number valid. Consider implementing name matching algorithm for validation.",
            temporary: "Error {code}: Party verification pending. The bank may require additional KYC data. Prepare to supply SplmtryData with additional party information if requested.",
        },
    },
    CategoryTemplates {
        category: Category::Routing,
        operations: SeverityTemplates {
            fatal: "Payment failed due to routing issue ({code}: {name}). The {detail}. Verify BIC/SWIFT codes, correspondent bank details, and clearing system identifiers before retry.",
            temporary: "Payment delayed due to routing issue ({code}). The {detail}. The intermediary bank may be temporarily unavailable.",
        },
        developers: SeverityTemplates {
            fatal: "Error {code} ({name}): Routing lookup failed. Verify: (1) CdtrAgt/FinInstnId/BICFI is valid 8 or 11 char BIC, (2) ClrSysMmbId if using national clearing, (3) Correspondent chain is complete. Use SWIFT BIC directory API for validation.",
            temporary: "Error {code}: Intermediary agent temporarily unavailable. The correspondent bank may be offline. Implement circuit breaker pattern and route via alternate correspondent if available.",
        },
    },
    CategoryTemplates {
        category: Category::Regulatory,
        operations: SeverityTemplates {
            fatal: "Payment blocked for regulatory/compliance reasons ({code}: {name}). The {detail}. Review sanctions lists, AML requirements, and ensure all regulatory documentation is complete.",
            temporary: "Payment under regulatory review ({code}). The {detail}. Additional compliance documentation may speed up processing.",
        },
        developers: SeverityTemplates {
            fatal: "Error {code} ({name}): Regulatory check failed. Review: (1) RgltryRptg elements for completeness, (2) Purp/Cd matches allowed values, (3) Party names against sanctions lists. Implement pre-flight regulatory screening.",
            temporary: "Error {code}: Regulatory review in progress. Payment queued for compliance check. No action needed - monitor via pacs.002 status messages.",
        },
    },
    CategoryTemplates {
        category: Category::System,
        operations: SeverityTemplates {
            fatal: "Payment failed due to a system error ({code}: {name}). The {detail}. This is typically a technical issue - retry later or contact your payment provider's support.",
            temporary: "Payment delayed due to system issues ({code}). The {detail}. The system should recover automatically - retry in a few minutes.",
        },
        developers: SeverityTemplates {
            fatal: "Error {code} ({name}): System-level failure. This indicates infrastructure issues. Log full error context, implement retry with backoff. If persistent, escalate to payment gateway support. Check GrpHdr/CreDtTm is within acceptable window.",
            temporary: "Error {code}: Transient system error. Implement automatic retry: (1) Wait 30 seconds, (2) Retry with same MsgId, (3) Max 3 attempts. If using SWIFT, check for network status updates.",
        },
    },
    CategoryTemplates {
        category: Category::Mandate,
        operations: SeverityTemplates {
            fatal: "Direct debit/mandate issue ({code}: {name}). The {detail}. Verify the mandate is active and valid, check authorization dates, and ensure proper setup before retry.",
            temporary: "Mandate processing delayed ({code}). The {detail}. Allow additional time for mandate verification.",
        },
        developers: SeverityTemplates {
            fatal: "Error {code} ({name}): Mandate validation failed. Check MndtRltdInf elements: MndtId, DtOfSgntr, FrqcyPrd. Ensure mandate is registered and active in creditor's mandate management system before submission.",
            temporary: "Error {code}: Mandate activation pending. New mandates may take 1-3 business days. Implement mandate status polling before first collection attempt.",
        },
    },
    CategoryTemplates {
        category: Category::Duplicate,
        operations: SeverityTemplates {
            fatal: "Duplicate payment detected ({code}: {name}). The {detail}. This payment appears to have been submitted before. Verify whether the original was processed.",
            temporary: "Potential duplicate flagged ({code}). The {detail}. Review recent transactions before resubmitting.",
        },
        developers: SeverityTemplates {
            fatal: "Error {code} ({name}): Duplicate detected. The MsgId or EndToEndId matches a previous submission. Implement idempotency: (1) Track submitted IDs, (2) Check before submission, (3) Query status of original. Consider TxId uniqueness per UTC day.",
            temporary: "Error {code}: Potential duplicate flagged for review. Your deduplication window may overlap with the bank's. Adjust EndToEndId generation to include microsecond precision.",
        },
    },
    CategoryTemplates {
        category: Category::Cancellation,
        operations: SeverityTemplates {
            fatal: "Cancellation failed ({code}: {name}). The {detail}. The original payment may have already been processed or the cancellation window has passed.",
            temporary: "Cancellation pending ({code}). The {detail}. Allow time for the cancellation request to be processed.",
        },
        developers: SeverityTemplates {
            fatal: "Error {code} ({name}): Cancellation request rejected. Check CtrlSum and NbOfTxs in camt.056 match original. Cancellation may be rejected if payment already settled. Query payment status via camt.052 before cancellation.",
            temporary: "Error {code}: Cancellation request queued. Implement async callback handler for camt.029 response. Settlement finality rules may delay cancellation processing.",
        },
    },
    CategoryTemplates {
        category: Category::Narrative,
        operations: SeverityTemplates {
            fatal: "Payment rejected due to narrative/reference issue ({code}: {name}). The {detail}. Review payment description, reference fields, and ensure no prohibited characters or content.",
            temporary: "Payment held for narrative review ({code}). The {detail}. Review may be required for the payment description.",
        },
        developers: SeverityTemplates {
            fatal: "Error {code} ({name}): Narrative validation failed. Check RmtInf/Ustrd for: (1) Prohibited characters (avoid &, <, >), (2) Max length (140 chars for SEPA), (3) Encoding (UTF-8). Sanitize user input before message construction.",
            temporary: "Error {code}: Narrative under review. Structured remittance (RmtInf/Strd) may process faster than unstructured. Consider using Cdtr/Ref for critical reference data.",
        },
    },
    OTHER_TEMPLATES,
];

/// Templates for `category`, falling back to the table's `Other` entry and
/// then to [`OTHER_TEMPLATES`].
pub fn templates_for(table: &[CategoryTemplates], category: Category) -> &CategoryTemplates {
    table
        .iter()
        .find(|t| t.category == category)
        .or_else(|| table.iter().find(|t| t.category == Category::Other))
        .unwrap_or(&OTHER_TEMPLATES)
}

// ============================================================================
// Generation
// ============================================================================

/// Explanations for `record` from the built-in templates.
pub fn explain(record: &ErrorRecord) -> Explanation {
    explain_with(TEMPLATES, record)
}

pub fn explain_with(table: &[CategoryTemplates], record: &ErrorRecord) -> Explanation {
    let templates = templates_for(table, record.category);
    let values = Substitutions::from_record(record);

    Explanation {
        for_operations: values.apply(templates.operations.get(record.severity)),
        for_developers: values.apply(templates.developers.get(record.severity)),
    }
}

struct Substitutions<'a> {
    code: &'a str,
    name: &'a str,
    detail: String,
    cause: &'a str,
    fix: &'a str,
}

impl<'a> Substitutions<'a> {
    fn from_record(record: &'a ErrorRecord) -> Self {
        let detail = [
            record.description.short.as_str(),
            record.description.detailed.as_str(),
            record.name.as_str(),
        ]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or("error occurred")
        .to_lowercase();

        Self {
            code: &record.code,
            name: if record.name.is_empty() {
                "Unknown"
            } else {
                &record.name
            },
            detail,
            cause: record
                .common_causes
                .first()
                .map(String::as_str)
                .unwrap_or(CAUSE_FALLBACK),
            fix: record
                .how_to_fix
                .steps
                .first()
                .map(String::as_str)
                .unwrap_or(FIX_FALLBACK),
        }
    }

    fn apply(&self, template: &str) -> String {
        template
            .replace("{code}", self.code)
            .replace("{name}", self.name)
            .replace("{detail}", &self.detail)
            .replace("{cause}", self.cause)
            .replace("{fix}", self.fix)
    }
}
