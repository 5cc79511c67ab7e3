//! Reference Guides
//!
//! Bundled background material linked from error records. Message-type
//! guides are keyed by the tags in `ErrorRecord::message_types`; error-family
//! overviews are keyed by category and code prefix.

use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::catalog::{Catalog, Category, ErrorRecord};

// ============================================================================
// Message Type Guides
// ============================================================================

/// One element of a message worth knowing about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyField {
    pub path: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    /// `"CODE - note"` entries for errors raised on this element.
    pub common_errors: &'static [&'static str],
}

const fn field(
    path: &'static str,
    name: &'static str,
    description: &'static str,
    required: bool,
    common_errors: &'static [&'static str],
) -> KeyField {
    KeyField {
        path,
        name,
        description,
        required,
        common_errors,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageGuide {
    /// Message identifier as used in record tags, e.g. `pacs.008`.
    pub id: &'static str,
    pub full_name: &'static str,
    /// ISO 20022 business area.
    pub area: &'static str,
    pub description: &'static str,
    pub use_cases: &'static [&'static str],
    pub key_fields: &'static [KeyField],
    pub common_errors: &'static [&'static str],
    pub related_messages: &'static [&'static str],
    pub example_xpath: &'static str,
}

pub static MESSAGE_GUIDES: &[MessageGuide] = &[
    MessageGuide {
        id: "pacs.008",
        full_name: "FIToFICustomerCreditTransfer",
        area: "Payments Clearing and Settlement",
        description: "The most commonly used ISO 20022 payment message. Used by financial institutions to transfer funds on behalf of their customers to another financial institution. This is the core credit transfer message in SWIFT and domestic clearing systems.",
        use_cases: &[
            "Cross-border customer payments (SWIFT gpi)",
            "Domestic instant payments (FedNow, TIPS, Faster Payments)",
            "SEPA Credit Transfers (SCT)",
            "Corporate treasury payments",
            "Payroll and supplier payments",
        ],
        key_fields: &[
            field("/Document/FIToFICstmrCdtTrf/GrpHdr/MsgId", "Message ID", "Unique identifier assigned by the instructing party", true, &["AM05 - Duplicate Message ID"]),
            field("/Document/FIToFICstmrCdtTrf/GrpHdr/CreDtTm", "Creation DateTime", "Date and time when the message was created", true, &["DT01 - Invalid Date"]),
            field("/Document/FIToFICstmrCdtTrf/GrpHdr/NbOfTxs", "Number of Transactions", "Total count of individual transactions in the message", true, &[]),
            field("/Document/FIToFICstmrCdtTrf/GrpHdr/SttlmInf/SttlmMtd", "Settlement Method", "Method used to settle the payment (INDA, INGA, COVE, CLRG)", true, &[]),
            field("/Document/FIToFICstmrCdtTrf/CdtTrfTxInf/PmtId/InstrId", "Instruction ID", "Unique ID assigned by instructing party for the transaction", false, &[]),
            field("/Document/FIToFICstmrCdtTrf/CdtTrfTxInf/PmtId/EndToEndId", "End-to-End ID", "Unique ID assigned by the originator, passed through entire chain", true, &["FF01 - Invalid End-to-End ID format"]),
            field("/Document/FIToFICstmrCdtTrf/CdtTrfTxInf/PmtId/UETR", "UETR", "Unique End-to-end Transaction Reference (SWIFT gpi)", true, &["FF01 - Missing or invalid UETR"]),
            field("/Document/FIToFICstmrCdtTrf/CdtTrfTxInf/IntrBkSttlmAmt", "Interbank Settlement Amount", "Amount to be settled between financial institutions", true, &["AM01 - Zero Amount", "AM02 - Amount exceeds limit"]),
            field("/Document/FIToFICstmrCdtTrf/CdtTrfTxInf/ChrgBr", "Charge Bearer", "Party that bears the charges (DEBT, CRED, SHAR, SLEV)", true, &[]),
            field("/Document/FIToFICstmrCdtTrf/CdtTrfTxInf/Dbtr", "Debtor", "Party that owes the money (payer/originator)", true, &["BE01 - Inconsistent Debtor information"]),
            field("/Document/FIToFICstmrCdtTrf/CdtTrfTxInf/DbtrAcct/Id/IBAN", "Debtor Account (IBAN)", "Account of the debtor to be debited", true, &["AC01 - Invalid Account", "AC04 - Closed Account"]),
            field("/Document/FIToFICstmrCdtTrf/CdtTrfTxInf/DbtrAgt/FinInstnId/BICFI", "Debtor Agent BIC", "BIC of the debtor's financial institution", true, &["RC01 - Invalid BIC"]),
            field("/Document/FIToFICstmrCdtTrf/CdtTrfTxInf/CdtrAgt/FinInstnId/BICFI", "Creditor Agent BIC", "BIC of the creditor's financial institution", true, &["RC01 - Invalid BIC", "AG01 - Agent not found"]),
            field("/Document/FIToFICstmrCdtTrf/CdtTrfTxInf/Cdtr", "Creditor", "Party that receives the money (beneficiary)", true, &["BE04 - Missing Creditor information"]),
            field("/Document/FIToFICstmrCdtTrf/CdtTrfTxInf/CdtrAcct/Id/IBAN", "Creditor Account (IBAN)", "Account of the creditor to be credited", true, &["AC01 - Invalid Account", "AC06 - Blocked Account"]),
        ],
        common_errors: &[
            "AC01 - Incorrect Account Number",
            "AC04 - Closed Account Number",
            "AC06 - Blocked Account",
            "AG01 - Transaction Forbidden (Agent)",
            "AM01 - Zero Amount",
            "AM02 - Not Allowed Amount",
            "AM05 - Duplication",
            "BE01 - Inconsistent With End Customer",
            "RC01 - Bank Identifier Incorrect",
            "FF01 - Invalid File Format",
        ],
        related_messages: &["pacs.002", "pacs.004", "camt.053", "camt.054"],
        example_xpath: "/Document/FIToFICstmrCdtTrf/CdtTrfTxInf[1]/PmtId/EndToEndId",
    },
    MessageGuide {
        id: "pacs.009",
        full_name: "FinancialInstitutionCreditTransfer",
        area: "Payments Clearing and Settlement",
        description: "Used for credit transfers between financial institutions where no underlying customer payment exists. Typically used for bank-to-bank transfers, cover payments, treasury movements, and interbank settlements.",
        use_cases: &[
            "Cover payments for correspondent banking",
            "Interbank liquidity transfers",
            "Treasury and funding operations",
            "Nostro/Vostro account funding",
            "Central bank settlement movements",
        ],
        key_fields: &[
            field("/Document/FICdtTrf/GrpHdr/MsgId", "Message ID", "Unique identifier for the message", true, &["AM05 - Duplicate Message ID"]),
            field("/Document/FICdtTrf/GrpHdr/CreDtTm", "Creation DateTime", "Date and time when the message was created", true, &[]),
            field("/Document/FICdtTrf/GrpHdr/NbOfTxs", "Number of Transactions", "Total count of credit transfer instructions", true, &[]),
            field("/Document/FICdtTrf/GrpHdr/SttlmInf/SttlmMtd", "Settlement Method", "Settlement method (typically INDA or CLRG)", true, &[]),
            field("/Document/FICdtTrf/CdtTrfTxInf/PmtId/InstrId", "Instruction ID", "Unique instruction identifier", false, &[]),
            field("/Document/FICdtTrf/CdtTrfTxInf/PmtId/EndToEndId", "End-to-End ID", "End-to-end reference (often NOTPROVIDED for FI transfers)", true, &[]),
            field("/Document/FICdtTrf/CdtTrfTxInf/PmtId/UETR", "UETR", "Unique End-to-end Transaction Reference", true, &[]),
            field("/Document/FICdtTrf/CdtTrfTxInf/IntrBkSttlmAmt", "Interbank Settlement Amount", "Amount and currency of the transfer", true, &["AM01 - Zero Amount", "AM03 - Currency mismatch"]),
            field("/Document/FICdtTrf/CdtTrfTxInf/InstgAgt/FinInstnId/BICFI", "Instructing Agent BIC", "BIC of the instructing financial institution", true, &["RC01 - Invalid BIC"]),
            field("/Document/FICdtTrf/CdtTrfTxInf/InstdAgt/FinInstnId/BICFI", "Instructed Agent BIC", "BIC of the instructed financial institution", true, &["RC01 - Invalid BIC"]),
            field("/Document/FICdtTrf/CdtTrfTxInf/Dbtr/FinInstnId/BICFI", "Debtor FI BIC", "BIC of the debtor financial institution", true, &[]),
            field("/Document/FICdtTrf/CdtTrfTxInf/DbtrAcct/Id/Othr/Id", "Debtor Account", "Account identifier at the debtor FI", false, &[]),
            field("/Document/FICdtTrf/CdtTrfTxInf/Cdtr/FinInstnId/BICFI", "Creditor FI BIC", "BIC of the creditor financial institution", true, &[]),
            field("/Document/FICdtTrf/CdtTrfTxInf/CdtrAcct/Id/Othr/Id", "Creditor Account", "Account identifier at the creditor FI", false, &[]),
        ],
        common_errors: &[
            "AC01 - Incorrect Account Number",
            "AG01 - Transaction Forbidden",
            "AM01 - Zero Amount",
            "AM03 - Not Allowed Currency",
            "AM05 - Duplication",
            "RC01 - Bank Identifier Incorrect",
            "RC04 - Creditor Bank Identifier Incorrect",
            "FOCR - Following Cancellation Request",
        ],
        related_messages: &["pacs.002", "pacs.008", "camt.056"],
        example_xpath: "/Document/FICdtTrf/CdtTrfTxInf[1]/IntrBkSttlmAmt",
    },
    MessageGuide {
        id: "camt.053",
        full_name: "BankToCustomerStatement",
        area: "Cash Management",
        description: "Provides detailed information about all entries booked to an account. Used to report end-of-day account statements to customers, including opening/closing balances, all transactions, and their details. Essential for reconciliation and cash management.",
        use_cases: &[
            "End-of-day account statements",
            "Cash position reporting",
            "Treasury reconciliation",
            "Automated cash management",
            "Corporate ERP integration",
            "Regulatory reporting inputs",
        ],
        key_fields: &[
            field("/Document/BkToCstmrStmt/GrpHdr/MsgId", "Message ID", "Unique message identifier", true, &[]),
            field("/Document/BkToCstmrStmt/GrpHdr/CreDtTm", "Creation DateTime", "When the statement was generated", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Id", "Statement ID", "Unique identifier for the statement", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/ElctrncSeqNb", "Electronic Sequence Number", "Sequential number for statement ordering", false, &[]),
            field("/Document/BkToCstmrStmt/Stmt/CreDtTm", "Statement Creation DateTime", "When this specific statement was created", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/FrToDt/FrDtTm", "From DateTime", "Start of the statement period", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/FrToDt/ToDtTm", "To DateTime", "End of the statement period", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Acct/Id/IBAN", "Account IBAN", "IBAN of the account being reported", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Acct/Ccy", "Account Currency", "Currency of the account", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Bal/Tp/CdOrPrtry/Cd", "Balance Type Code", "Type of balance (OPBD, CLBD, ITBD, etc.)", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Bal/Amt", "Balance Amount", "Balance amount with currency", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Bal/CdtDbtInd", "Credit/Debit Indicator", "Whether balance is credit (CRDT) or debit (DBIT)", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Ntry/Amt", "Entry Amount", "Amount of the transaction entry", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Ntry/CdtDbtInd", "Entry Credit/Debit", "Whether entry is credit or debit", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Ntry/Sts/Cd", "Entry Status", "Status of entry (BOOK, PDNG, INFO)", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Ntry/BookgDt/Dt", "Booking Date", "Date when entry was booked", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Ntry/ValDt/Dt", "Value Date", "Value date of the entry", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Ntry/BkTxCd/Domn/Cd", "Bank Transaction Code Domain", "Domain of the transaction (PMNT, CAMT, etc.)", true, &[]),
            field("/Document/BkToCstmrStmt/Stmt/Ntry/NtryDtls/TxDtls/Refs/EndToEndId", "Entry End-to-End ID", "End-to-end reference from original payment", false, &[]),
        ],
        common_errors: &[
            "AC01 - Incorrect Account Number",
            "DT01 - Invalid Date",
            "AM03 - Currency Mismatch",
            "NARR - Missing Narrative",
            "FF01 - Invalid File Format",
            "DUPL - Duplicate Statement",
        ],
        related_messages: &["camt.052", "camt.054", "pacs.008", "pacs.002"],
        example_xpath: "/Document/BkToCstmrStmt/Stmt/Ntry[1]/NtryDtls/TxDtls/Refs/EndToEndId",
    },
];

/// Guide for a message tag, ignoring case and any version suffix
/// (`pacs.008.001.08` resolves to `pacs.008`).
pub fn message_guide(tag: &str) -> Option<&'static MessageGuide> {
    let tag = tag.trim();
    let base = match tag.match_indices('.').nth(1) {
        Some((second_dot, _)) => &tag[..second_dot],
        None => tag,
    };
    MESSAGE_GUIDES
        .iter()
        .find(|guide| guide.id.eq_ignore_ascii_case(base))
}

// ============================================================================
// Error Family Guides
// ============================================================================

/// How errors of a family usually behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilySeverity {
    Fatal,
    Temporary,
    Mixed,
}

impl FamilySeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            FamilySeverity::Fatal => "fatal",
            FamilySeverity::Temporary => "temporary",
            FamilySeverity::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRef {
    pub code: &'static str,
    pub name: &'static str,
}

const fn code(code: &'static str, name: &'static str) -> CodeRef {
    CodeRef { code, name }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyGuide {
    pub id: &'static str,
    pub name: &'static str,
    /// Code prefixes (or whole four-letter codes) belonging to the family.
    pub prefixes: &'static [&'static str],
    /// Catalog category covered, if the family has one.
    pub category: Option<Category>,
    pub description: &'static str,
    pub common_codes: &'static [CodeRef],
    pub typical_causes: &'static [&'static str],
    pub resolution: &'static str,
    pub severity: FamilySeverity,
}

pub static FAMILY_GUIDES: &[FamilyGuide] = &[
    FamilyGuide {
        id: "account",
        name: "Account Errors",
        prefixes: &["AC"],
        category: Some(Category::Account),
        description: "Account-related errors occur when there are issues with the debtor or creditor account. These include invalid account numbers, closed accounts, blocked accounts, or accounts that cannot process the specific transaction type.",
        common_codes: &[
            code("AC01", "Incorrect Account Number"),
            code("AC04", "Closed Account Number"),
            code("AC06", "Blocked Account"),
            code("AC13", "Invalid Debtor Account Type"),
            code("AC14", "Invalid Creditor Account Type"),
        ],
        typical_causes: &[
            "Account number changed or incorrect",
            "Account closed by customer or bank",
            "Account frozen due to legal/compliance reasons",
            "Account type does not support the transaction",
            "IBAN check digit validation failure",
        ],
        resolution: "Verify account details with the beneficiary. Check account status with the receiving bank. Update account information in your system. For blocked accounts, investigate with compliance team.",
        severity: FamilySeverity::Fatal,
    },
    FamilyGuide {
        id: "amount",
        name: "Amount Errors",
        prefixes: &["AM"],
        category: Some(Category::Amount),
        description: "Amount-related errors occur when there are issues with the transaction amount or currency. This includes insufficient funds, duplicate payments, amount limits exceeded, or currency mismatches.",
        common_codes: &[
            code("AM01", "Zero Amount"),
            code("AM02", "Not Allowed Amount"),
            code("AM03", "Not Allowed Currency"),
            code("AM04", "Insufficient Funds"),
            code("AM05", "Duplication"),
            code("AM09", "Wrong Amount"),
        ],
        typical_causes: &[
            "Insufficient balance in debtor account",
            "Payment amount exceeds transaction or daily limits",
            "Duplicate message ID or end-to-end reference",
            "Currency not supported by corridor or account",
            "Amount validation failed (zero, negative, too many decimals)",
        ],
        resolution: "Check account balance and available funds. Verify transaction limits with the bank. Ensure unique message IDs for each transaction. Confirm currency support for the payment corridor. Validate amount format and decimals.",
        severity: FamilySeverity::Mixed,
    },
    FamilyGuide {
        id: "party",
        name: "Party Identification Errors",
        prefixes: &["BE"],
        category: Some(Category::Party),
        description: "Beneficiary and debtor identification errors occur when there are issues with party information. This includes missing names, mismatched details, or inconsistent identification between different message elements.",
        common_codes: &[
            code("BE01", "Inconsistent With End Customer"),
            code("BE04", "Missing Creditor Address"),
            code("BE05", "Unrecognised Initiating Party"),
            code("BE06", "Unknown End Customer"),
            code("BE07", "Missing Debtor Address"),
        ],
        typical_causes: &[
            "Name mismatch between account holder and payment instruction",
            "Missing or incomplete address information",
            "Beneficiary details do not match account records",
            "Special characters or formatting issues in names",
            "Country code mismatch with account location",
        ],
        resolution: "Verify beneficiary name matches account holder exactly. Include complete address with country code. Avoid special characters that may not be supported. Check name/account matching requirements for the destination country.",
        severity: FamilySeverity::Fatal,
    },
    FamilyGuide {
        id: "routing",
        name: "Routing & Clearing Errors",
        prefixes: &["RC", "AG"],
        category: Some(Category::Routing),
        description: "Routing and clearing errors occur when there are issues with bank identification codes (BIC), clearing system codes, or the routing path. These prevent the payment from reaching the correct financial institution.",
        common_codes: &[
            code("RC01", "Bank Identifier Incorrect"),
            code("RC04", "Invalid Creditor Bank BIC"),
            code("RC07", "Invalid Debtor Bank BIC"),
            code("AG01", "Transaction Forbidden"),
            code("AG02", "Invalid Bank Operation Code"),
        ],
        typical_causes: &[
            "Invalid or non-existent BIC code",
            "BIC does not match account IBAN country",
            "Bank not reachable via the payment scheme",
            "Clearing system code incorrect",
            "Intermediary bank routing issue",
        ],
        resolution: "Validate BIC against SWIFT directory or ISO 9362. Ensure BIC matches IBAN country code. Check if bank participates in the payment scheme (SWIFT, SEPA, etc.). Verify clearing system codes are correct.",
        severity: FamilySeverity::Fatal,
    },
    FamilyGuide {
        id: "regulatory",
        name: "Regulatory & Compliance Errors",
        prefixes: &["RR", "AG", "CUST"],
        category: Some(Category::Regulatory),
        description: "Regulatory and compliance errors occur when payments fail due to sanctions screening, missing regulatory information, or compliance policy violations. These are often related to AML/CFT requirements.",
        common_codes: &[
            code("RR01", "Missing Regulatory Reporting"),
            code("RR02", "Invalid Regulatory Reporting"),
            code("RR04", "Regulatory Reason"),
            code("CUST", "Requested By Customer"),
            code("AG07", "Transaction Not Supported"),
        ],
        typical_causes: &[
            "Sanctions screening hit (OFAC, UN, EU)",
            "Missing legal entity identifier (LEI)",
            "Missing purpose of payment or remittance info",
            "Cross-border reporting requirements not met",
            "PEP (Politically Exposed Person) flagged",
        ],
        resolution: "Check sanctions lists and PEP databases. Include all required regulatory fields (purpose code, LEI). Provide complete remittance information. Contact compliance team for sanctions hits. Ensure proper KYC/AML documentation.",
        severity: FamilySeverity::Fatal,
    },
    FamilyGuide {
        id: "system",
        name: "System & Technical Errors",
        prefixes: &["FF", "AB", "TECH"],
        category: Some(Category::System),
        description: "System and technical errors occur due to message format issues, system downtime, communication failures, or XML validation errors. These are often temporary and can be retried.",
        common_codes: &[
            code("FF01", "Invalid File Format"),
            code("FF05", "Invalid Local Instrument"),
            code("AB03", "Invalid Debtor Account Number"),
            code("AB05", "Invalid Creditor Account Number"),
            code("TECH", "Technical Problem"),
        ],
        typical_causes: &[
            "XML schema validation failure",
            "Invalid characters in fields",
            "Field length exceeded",
            "System timeout or unavailable",
            "Network connectivity issues",
            "Message structure incorrect",
        ],
        resolution: "Validate XML against ISO 20022 schema. Check character encoding (UTF-8). Verify field lengths and formats. Retry after system downtime. Review technical specifications for the payment scheme.",
        severity: FamilySeverity::Temporary,
    },
    FamilyGuide {
        id: "mandate",
        name: "Mandate Errors",
        prefixes: &["MD", "MM", "SL"],
        category: Some(Category::Mandate),
        description: "Mandate-related errors occur in direct debit transactions when there are issues with the mandate (authorization). This includes missing mandates, revoked mandates, or mandate details that do not match the payment instruction.",
        common_codes: &[
            code("MD01", "No Mandate"),
            code("MD02", "Missing Mandatory Info"),
            code("MD06", "Refund Request By End Customer"),
            code("MD07", "End Customer Deceased"),
            code("SL01", "Specific Service Offered By Debtor Agent"),
        ],
        typical_causes: &[
            "Mandate not found in bank system",
            "Mandate cancelled or expired",
            "Customer disputes the debit",
            "Mandate reference incorrect",
            "First collection vs. recurring flag mismatch",
        ],
        resolution: "Verify mandate is registered with debtor bank. Check mandate reference matches. Ensure mandate is active and not expired. For disputes, provide proof of mandate to the bank. Update mandate status in your system.",
        severity: FamilySeverity::Fatal,
    },
    FamilyGuide {
        id: "datetime",
        name: "Date & Time Errors",
        prefixes: &["DT", "CH"],
        category: None,
        description: "Date and time errors occur when there are issues with timing, cut-off times, or date validation. This includes past dates, future dates beyond limits, or missed processing deadlines.",
        common_codes: &[
            code("DT01", "Invalid Date"),
            code("DT02", "Invalid Value Date"),
            code("CH03", "Requested Execution Date Too Far In Future"),
            code("CH04", "Requested Execution Date Too Soon"),
            code("CH11", "Cut-off Time"),
        ],
        typical_causes: &[
            "Payment submitted after daily cut-off time",
            "Requested execution date is a non-business day",
            "Date format invalid or parsing error",
            "Value date in the past",
            "Future date exceeds allowed timeframe",
        ],
        resolution: "Check payment scheme cut-off times. Validate dates against business day calendars. Use ISO 8601 date format (YYYY-MM-DD). Ensure value date is within acceptable range. Submit payments before cut-off.",
        severity: FamilySeverity::Temporary,
    },
];

/// Family guide by id (`account`) or by the label of its category.
pub fn family_guide(name: &str) -> Option<&'static FamilyGuide> {
    let name = name.trim();
    FAMILY_GUIDES.iter().find(|guide| {
        guide.id.eq_ignore_ascii_case(name)
            || guide
                .category
                .is_some_and(|c| c.label().eq_ignore_ascii_case(name))
    })
}

pub fn family_guide_for_category(category: Category) -> Option<&'static FamilyGuide> {
    FAMILY_GUIDES
        .iter()
        .find(|guide| guide.category == Some(category))
}

/// Family a code belongs to, by its two-letter prefix or the whole code.
///
/// Prefixes shared between families resolve to the first family listing them.
pub fn family_guide_for_code(code: &str) -> Option<&'static FamilyGuide> {
    let code = code.trim().to_uppercase();
    let prefix: String = code.chars().take(2).collect();
    FAMILY_GUIDES
        .iter()
        .find(|guide| guide.prefixes.iter().any(|p| *p == code || *p == prefix))
}

// ============================================================================
// Topics
// ============================================================================

/// Any bundled guide, addressed by its static id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideTopic {
    Message(&'static str),
    Family(&'static str),
}

/// Requested guide topic does not exist.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("No guide for \"{topic}\".")]
#[diagnostic(
    code(guides::not_found),
    help("run `--guide` without a topic to list the available guides")
)]
pub struct GuideMiss {
    pub topic: String,
}

impl GuideTopic {
    /// Every guide: message types first, then error families.
    pub fn all() -> Vec<GuideTopic> {
        MESSAGE_GUIDES
            .iter()
            .map(|g| GuideTopic::Message(g.id))
            .chain(FAMILY_GUIDES.iter().map(|g| GuideTopic::Family(g.id)))
            .collect()
    }

    /// Resolve a message tag, family id, or category label.
    pub fn resolve(input: &str) -> Result<GuideTopic, GuideMiss> {
        if let Some(guide) = message_guide(input) {
            return Ok(GuideTopic::Message(guide.id));
        }
        if let Some(guide) = family_guide(input) {
            return Ok(GuideTopic::Family(guide.id));
        }
        Err(GuideMiss {
            topic: input.trim().to_string(),
        })
    }

    pub fn id(self) -> &'static str {
        match self {
            GuideTopic::Message(id) | GuideTopic::Family(id) => id,
        }
    }

    pub fn title(self) -> String {
        match self {
            GuideTopic::Message(id) => match message_guide(id) {
                Some(guide) => format!("{} {}", guide.id, guide.full_name),
                None => id.to_string(),
            },
            GuideTopic::Family(id) => match family_guide(id) {
                Some(guide) => guide.name.to_string(),
                None => id.to_string(),
            },
        }
    }
}

// ============================================================================
// Catalog Links
// ============================================================================

/// A record's message-type tag with no bundled guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedTag {
    pub code: String,
    pub tag: String,
}

/// Every `(code, tag)` pair in the catalog whose tag has no guide.
pub fn unresolved_message_types(catalog: &Catalog) -> Vec<UnresolvedTag> {
    catalog
        .records()
        .iter()
        .flat_map(|record| {
            record
                .message_types
                .iter()
                .filter(|tag| message_guide(tag).is_none())
                .map(|tag| UnresolvedTag {
                    code: record.code.clone(),
                    tag: tag.clone(),
                })
        })
        .collect()
}

/// Guides reachable from a record: its message types, then its family.
pub fn topics_for(record: &ErrorRecord) -> Vec<GuideTopic> {
    let mut topics: Vec<GuideTopic> = Vec::new();
    for tag in &record.message_types {
        if let Some(guide) = message_guide(tag) {
            let topic = GuideTopic::Message(guide.id);
            if !topics.contains(&topic) {
                topics.push(topic);
            }
        }
    }
    let family = family_guide_for_category(record.category)
        .or_else(|| family_guide_for_code(&record.code));
    if let Some(guide) = family {
        topics.push(GuideTopic::Family(guide.id));
    }
    topics
}

/// Catalog records tagged with the guide's message type.
pub fn records_for_message(catalog: &Catalog, id: &str) -> Vec<Arc<ErrorRecord>> {
    catalog
        .records()
        .iter()
        .filter(|record| {
            record
                .message_types
                .iter()
                .any(|tag| message_guide(tag).is_some_and(|g| g.id.eq_ignore_ascii_case(id)))
        })
        .cloned()
        .collect()
}

/// Catalog records belonging to a family, by category or code prefix.
pub fn records_for_family(catalog: &Catalog, guide: &FamilyGuide) -> Vec<Arc<ErrorRecord>> {
    catalog
        .records()
        .iter()
        .filter(|record| {
            guide.category == Some(record.category)
                || family_guide_for_code(&record.code).is_some_and(|g| g.id == guide.id)
        })
        .cloned()
        .collect()
}
