//! # Template rendering
//!
//! Turns a profile into a standalone HTML page or a plain-text resume. Both
//! templates take the same [`ProfileDraft`] shape and only differ in markup.

mod modern;
mod old_aesthetic;

pub use modern::ModernTemplate;
pub use old_aesthetic::OldAestheticTemplate;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ProfileDraft, TemplateId};
use crate::wizard::FinalizedPortfolio;

/// Number of skills featured in the hero section.
pub const HERO_SKILL_COUNT: usize = 4;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap_or_else(|err| unreachable!("whitespace pattern is invalid: {err}"))
});

/// A visual template for a portfolio.
pub trait TemplateRenderer: Send + Sync {
    /// Template this renderer draws.
    fn template(&self) -> TemplateId;

    /// Full HTML document for `profile`. All user text is escaped.
    fn render(&self, profile: &ProfileDraft) -> String;

    /// Plain-text resume for `profile`.
    fn resume(&self, profile: &ProfileDraft) -> String;
}

static MODERN: ModernTemplate = ModernTemplate;
static OLD_AESTHETIC: OldAestheticTemplate = OldAestheticTemplate;

/// Renderer of `template`.
#[must_use]
pub fn renderer_for(template: TemplateId) -> &'static dyn TemplateRenderer {
    match template {
        TemplateId::Modern => &MODERN,
        TemplateId::OldAesthetic => &OLD_AESTHETIC,
    }
}

/// HTML page for `profile` in `template`.
#[must_use]
pub fn render_page(template: TemplateId, profile: &ProfileDraft) -> String {
    renderer_for(template).render(profile)
}

/// Render a portfolio straight out of the wizard with its chosen template.
#[must_use]
pub fn render_finalized(portfolio: &FinalizedPortfolio) -> String {
    render_page(portfolio.template(), portfolio.profile())
}

/// `Jane  Doe` becomes `jane-doe-resume.txt`.
#[must_use]
pub fn resume_file_name(name: &str) -> String {
    let slug = WHITESPACE_RUN.replace_all(name, "-").to_lowercase();
    format!("{slug}-resume.txt")
}

/// First sentence of the about text, terminated with a period.
#[must_use]
pub fn headline(about: &str) -> String {
    let first = about.split('.').next().unwrap_or_default();
    format!("{}.", first.trim())
}

/// Skills shown in the hero section.
#[must_use]
pub fn hero_skills(skills: &[String]) -> &[String] {
    &skills[..skills.len().min(HERO_SKILL_COUNT)]
}

/// Upper-cased first character of the name, used as a portrait placeholder.
#[must_use]
pub fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Escape text for HTML element and attribute content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escaped `<li>` items for a list of entries.
fn list_items(entries: &[String]) -> String {
    entries
        .iter()
        .map(|entry| format!("<li>{}</li>", escape_html(entry)))
        .collect()
}

/// Wraps rendered sections in a full HTML document.
fn document(title: &str, stylesheet: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{stylesheet}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_html(title)
    )
}
