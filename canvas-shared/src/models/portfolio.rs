//! Portfolio models: templates, the profile draft and create bodies.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::EnumIter;
use thiserror::Error;

/// Visual templates a portfolio can be rendered with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumIter)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    /// Gradient hero with skill chips.
    Modern,
    /// Serif, letterhead-style classic layout.
    OldAesthetic,
}

impl TemplateId {
    /// Return the identifier used on the wire and in route paths.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::OldAesthetic => "old-aesthetic",
        }
    }

    /// Human readable template name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Modern => "Modern Template",
            Self::OldAesthetic => "Old Aesthetic Template",
        }
    }

    /// One-line description shown next to the template choice.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Modern => "Clean, minimal design with modern aesthetics",
            Self::OldAesthetic => "Elegant, timeless design with classic typography",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a template identifier is not one of the known templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown template `{0}` (expected `modern` or `old-aesthetic`)")]
pub struct UnknownTemplate(pub String);

impl FromStr for TemplateId {
    type Err = UnknownTemplate;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "modern" => Ok(Self::Modern),
            "old-aesthetic" => Ok(Self::OldAesthetic),
            other => Err(UnknownTemplate(other.to_string())),
        }
    }
}

/// Contact block shown on the portfolio page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactDetails {
    /// Public contact email.
    pub email: String,
    /// Public contact mobile number.
    pub mobile: String,
}

/// The profile a user fills in before generating a portfolio.
///
/// The same shape is sent to the server, returned by portfolio lookups and
/// consumed by the template renderers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileDraft {
    /// Name shown on the portfolio.
    pub name: String,
    /// Skills in the order they were added.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Hobbies in the order they were added.
    #[serde(default)]
    pub hobbies: Vec<String>,
    /// About text; its first sentence becomes the headline.
    pub about: String,
    /// Contact block.
    #[serde(rename = "contactDetails")]
    pub contact_details: ContactDetails,
}

/// Profile data as embedded in a create request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PortfolioData {
    /// Profile fields, flattened into the object.
    #[serde(flatten)]
    pub profile: ProfileDraft,
    /// Template repeated inside the data, as the server stores it.
    pub template_selected: TemplateId,
}

/// Request body for `POST /portfolios`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatePortfolioRequest {
    /// Template to render with.
    pub template: TemplateId,
    /// Profile plus template selection.
    pub data: PortfolioData,
}

impl CreatePortfolioRequest {
    /// Build the request body for the given template and profile.
    #[must_use]
    pub fn new(template: TemplateId, profile: ProfileDraft) -> Self {
        Self {
            template,
            data: PortfolioData {
                profile,
                template_selected: template,
            },
        }
    }
}

/// Identifiers assigned by the server to a new portfolio.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CreatedPortfolio {
    /// Public identifier used in routes and lookups.
    #[serde(default)]
    pub unique_identifier: Option<String>,
    /// Storage id of the record.
    #[serde(default)]
    pub portfolio_id: Option<String>,
    /// App route of the new portfolio, as suggested by the server.
    #[serde(default)]
    pub url: Option<String>,
}

/// Response body for `POST /portfolios`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CreatePortfolioResponse {
    /// Confirmation text.
    #[serde(default)]
    pub message: Option<String>,
    /// Identifiers of the new portfolio.
    #[serde(default)]
    pub data: Option<CreatedPortfolio>,
}

impl CreatePortfolioResponse {
    /// The non-empty unique identifier, if the server supplied one.
    #[must_use]
    pub fn unique_identifier(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.unique_identifier.as_deref())
            .filter(|id| !id.trim().is_empty())
    }
}
