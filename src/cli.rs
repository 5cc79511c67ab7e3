//! Command-line interface: argument parsing and the plain-text output of the
//! one-shot `--print`, `--search`, and `--guide` commands.

use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::core::catalog::{Catalog, Category, ErrorRecord, LookupMiss, Severity};
use crate::core::deep_link;
use crate::core::explain::explain;
use crate::core::guides::{
    self, FamilyGuide, GuideMiss, GuideTopic, MessageGuide, FAMILY_GUIDES, MESSAGE_GUIDES,
};
use crate::core::search::{FuzzyMatcher, SearchFilters, SearchPipeline};
use crate::core::view_model::EMPTY_RESULTS;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "mx-error-guide", version)]
#[command(about = "Look up ISO 20022 payment rejection codes")]
pub struct Cli {
    /// Error code or link to open in the TUI (AC04, #AC04, /error/AC04, or a full URL)
    pub code: Option<String>,

    /// Print one error code with its explanations, then exit
    #[arg(long, value_name = "CODE", conflicts_with = "search")]
    pub print: Option<String>,

    /// Print the codes matching a search query, then exit
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Print a message-type guide or error-family overview; lists the guides without a topic
    #[arg(
        long,
        value_name = "TOPIC",
        num_args = 0..=1,
        default_missing_value = "",
        conflicts_with_all = ["print", "search"]
    )]
    pub guide: Option<String>,

    /// Only list codes in this category (with --search)
    #[arg(long, value_name = "CATEGORY", requires = "search", value_parser = parse_category)]
    pub category: Option<Category>,

    /// Only list codes with this severity: fatal or temporary (with --search)
    #[arg(long, value_name = "SEVERITY", requires = "search", value_parser = parse_severity)]
    pub severity: Option<Severity>,

    /// Catalog JSON file to use instead of the bundled one
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// What a parsed command line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Tui { deep_link: Option<String> },
    Print(String),
    Search { query: String, filters: SearchFilters },
    /// `None` lists every guide.
    Guide(Option<String>),
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if let Some(code) = &self.print {
            return Mode::Print(code.clone());
        }
        if let Some(topic) = &self.guide {
            let topic = topic.trim();
            return Mode::Guide((!topic.is_empty()).then(|| topic.to_string()));
        }
        if let Some(query) = &self.search {
            return Mode::Search {
                query: query.clone(),
                filters: SearchFilters {
                    category: self.category,
                    severity: self.severity,
                },
            };
        }
        Mode::Tui {
            deep_link: self.code.clone(),
        }
    }
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse(s).ok_or_else(|| {
        let known: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        format!("unknown category '{s}' (expected one of: {})", known.join(", "))
    })
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    Severity::parse(s).ok_or_else(|| format!("unknown severity '{s}' (expected fatal or temporary)"))
}

// ============================================================================
// Output
// ============================================================================

/// Resolve a code or link and render the record.
pub fn print_record(catalog: &Catalog, input: &str) -> Result<String, LookupMiss> {
    let code = deep_link::parse(input).unwrap_or_else(|| input.trim().to_string());
    let record = catalog.lookup(&code)?;
    Ok(render_record(&record))
}

/// Full plain-text rendering of a record.
pub fn render_record(record: &ErrorRecord) -> String {
    let mut out = String::new();
    let explanation = explain(record);

    let _ = writeln!(out, "{}  {}", record.code, record.name);
    let _ = writeln!(out, "{} | {}", record.category, record.severity);
    let _ = writeln!(out, "Link: {}", deep_link::route_for(&record.code));

    section(&mut out, "Description");
    paragraph(&mut out, &record.description.short);
    paragraph(&mut out, &record.description.detailed);

    section(&mut out, "For Operations");
    paragraph(&mut out, &explanation.for_operations);

    section(&mut out, "For Developers");
    paragraph(&mut out, &explanation.for_developers);

    list(&mut out, "Common Causes", &record.common_causes, Bullet::Dash);
    list(&mut out, "How to Fix", &record.how_to_fix.steps, Bullet::Numbered);
    if let Some(prevention) = &record.how_to_fix.prevention {
        section(&mut out, "Prevention");
        paragraph(&mut out, prevention);
    }
    list(&mut out, "XPath Locations", &record.xpath_locations, Bullet::Dash);
    list(&mut out, "Message Types", &record.message_types, Bullet::Dash);
    list(&mut out, "Market Practices", &record.market_practices, Bullet::Dash);

    let topics = guides::topics_for(record);
    if !topics.is_empty() {
        section(&mut out, "Guides");
        for topic in topics {
            let _ = writeln!(out, "  - {} (--guide {})", topic.title(), topic.id());
        }
    }

    if !record.resources.is_empty() {
        section(&mut out, "Resources");
        for resource in &record.resources {
            let _ = writeln!(out, "  - {} <{}>", resource.title, resource.url);
        }
    }

    out
}

/// One line per match plus a summary footer.
pub fn render_search<M: FuzzyMatcher>(
    catalog: &Catalog,
    pipeline: &SearchPipeline<M>,
    query: &str,
    filters: &SearchFilters,
) -> String {
    let results = pipeline.search(catalog, query, filters);
    let mut out = String::new();

    if results.is_empty() {
        let _ = writeln!(out, "{EMPTY_RESULTS}");
    }
    for record in &results {
        let _ = writeln!(out, "{}", result_line(record));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", summary_line(catalog, results.len()));
    out
}

/// Render one guide, or the guide index when no topic is given.
pub fn print_guide(catalog: &Catalog, topic: Option<&str>) -> Result<String, GuideMiss> {
    let Some(topic) = topic else {
        return Ok(render_guide_index(catalog));
    };
    let text = match GuideTopic::resolve(topic)? {
        GuideTopic::Message(id) => guides::message_guide(id).map(|g| render_message_guide(catalog, g)),
        GuideTopic::Family(id) => guides::family_guide(id).map(|g| render_family_guide(catalog, g)),
    };
    text.ok_or_else(|| GuideMiss {
        topic: topic.trim().to_string(),
    })
}

/// Every bundled guide, plus catalog tags that have none.
pub fn render_guide_index(catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Reference guides (open one with --guide TOPIC)");

    section(&mut out, "Message Types");
    for guide in MESSAGE_GUIDES {
        let _ = writeln!(out, "  {:<10} {}", guide.id, guide.full_name);
    }

    section(&mut out, "Error Families");
    for guide in FAMILY_GUIDES {
        let prefixes = guide.prefixes.join("/");
        let _ = writeln!(out, "  {:<10} {:<32} {}", guide.id, guide.name, prefixes);
    }

    let mut missing: Vec<String> = guides::unresolved_message_types(catalog)
        .into_iter()
        .map(|u| u.tag)
        .collect();
    missing.sort();
    missing.dedup();
    if !missing.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No guide bundled for: {}", missing.join(", "));
    }
    out
}

pub fn render_message_guide(catalog: &Catalog, guide: &MessageGuide) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", guide.id, guide.full_name);
    let _ = writeln!(out, "{}", guide.area);

    section(&mut out, "Overview");
    paragraph(&mut out, guide.description);
    list(&mut out, "Use Cases", guide.use_cases, Bullet::Dash);

    section(&mut out, "Key Fields");
    for field in guide.key_fields {
        let flag = if field.required { "required" } else { "optional" };
        let _ = writeln!(out, "  {} ({flag})", field.name);
        let _ = writeln!(out, "    {}", field.path);
        let _ = writeln!(out, "    {}", field.description);
        for error in field.common_errors {
            let _ = writeln!(out, "    ! {error}");
        }
    }

    list(&mut out, "Common Errors", guide.common_errors, Bullet::Dash);
    list(&mut out, "Related Messages", guide.related_messages, Bullet::Dash);
    section(&mut out, "Example XPath");
    paragraph(&mut out, guide.example_xpath);

    let records = guides::records_for_message(catalog, guide.id);
    catalog_codes(&mut out, &records);
    out
}

pub fn render_family_guide(catalog: &Catalog, guide: &FamilyGuide) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", guide.name);
    let _ = writeln!(
        out,
        "Prefixes {} | usually {}",
        guide.prefixes.join(", "),
        guide.severity.as_str()
    );

    section(&mut out, "Overview");
    paragraph(&mut out, guide.description);

    section(&mut out, "Common Codes");
    for code in guide.common_codes {
        let _ = writeln!(out, "  {:<6} {}", code.code, code.name);
    }

    list(&mut out, "Typical Causes", guide.typical_causes, Bullet::Dash);
    section(&mut out, "Resolution");
    paragraph(&mut out, guide.resolution);

    let records = guides::records_for_family(catalog, guide);
    catalog_codes(&mut out, &records);
    out
}

fn catalog_codes(out: &mut String, records: &[Arc<ErrorRecord>]) {
    if records.is_empty() {
        return;
    }
    section(out, "In the Catalog");
    for record in records {
        let _ = writeln!(out, "  {:<6} {}", record.code, record.name);
    }
}

fn result_line(record: &Arc<ErrorRecord>) -> String {
    format!(
        "{:<6} {:<10} {:<13} {}",
        record.code,
        record.severity.as_str(),
        record.category.label(),
        record.name
    )
}

/// `N of M errors` plus catalog version and per-category counts.
pub fn summary_line(catalog: &Catalog, shown: usize) -> String {
    let metadata = catalog.metadata();
    let mut line = format!("{} of {} errors", shown, catalog.len());
    if !metadata.version.is_empty() {
        let _ = write!(line, " | catalog v{}", metadata.version);
        if !metadata.generated.is_empty() {
            let _ = write!(line, " ({})", metadata.generated);
        }
    }
    let counts: Vec<String> = catalog
        .category_counts()
        .into_iter()
        .map(|(category, count)| format!("{category} {count}"))
        .collect();
    if !counts.is_empty() {
        let _ = write!(line, " | {}", counts.join(", "));
    }
    line
}

enum Bullet {
    Dash,
    Numbered,
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));
}

fn paragraph(out: &mut String, text: &str) {
    if !text.is_empty() {
        let _ = writeln!(out, "{text}");
    }
}

fn list<S: AsRef<str>>(out: &mut String, title: &str, items: &[S], bullet: Bullet) {
    if items.is_empty() {
        return;
    }
    section(out, title);
    for (i, item) in items.iter().enumerate() {
        let item = item.as_ref();
        let _ = match bullet {
            Bullet::Dash => writeln!(out, "  - {item}"),
            Bullet::Numbered => writeln!(out, "  {}. {item}", i + 1),
        };
    }
}
