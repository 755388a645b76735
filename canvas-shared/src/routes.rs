//! Navigation targets of the portfolio application.

use std::fmt;

use crate::models::TemplateId;

/// Pages a flow can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing page.
    Home,
    /// Sign-in form.
    Login,
    /// Account creation form.
    Register,
    /// The portfolio wizard.
    Portfolios,
    /// A generated portfolio shown through its template.
    Portfolio {
        /// Template namespace of the route.
        template: TemplateId,
        /// Identifier assigned at creation.
        unique_id: String,
    },
    /// Anything unrecognised.
    NotFound,
}

impl Route {
    /// Route of a generated portfolio under its template namespace.
    pub fn portfolio(template: TemplateId, unique_id: impl Into<String>) -> Self {
        Self::Portfolio {
            template,
            unique_id: unique_id.into(),
        }
    }

    /// Path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Portfolios => "/portfolios".to_string(),
            Self::Portfolio {
                template,
                unique_id,
            } => format!("/{}/{unique_id}", template.as_str()),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Resolve a path back into a route. Unknown paths map to [`Route::NotFound`].
    #[must_use]
    pub fn recognize(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => return Self::Home,
            "/login" => return Self::Login,
            "/register" => return Self::Register,
            "/portfolios" => return Self::Portfolios,
            _ => {}
        }

        let mut segments = trimmed.trim_start_matches('/').split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(template), Some(unique_id), None) if !unique_id.is_empty() => template
                .parse::<TemplateId>()
                .map_or(Self::NotFound, |template| Self::portfolio(template, unique_id)),
            _ => Self::NotFound,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
