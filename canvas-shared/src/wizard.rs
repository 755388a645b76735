//! In-memory state of the two-step portfolio form.
//!
//! Step one collects the template, name and skills; step two collects the
//! about text and contact details. Moving forward is gated on the step-one
//! validators, and a draft can only leave the wizard through
//! [`PortfolioWizard::finalize`], which runs the full validation.

use thiserror::Error;

use crate::models::{ProfileDraft, TemplateId};
use crate::validation::{self, FieldErrors};

/// Steps of the portfolio form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    /// Template choice plus name and skills.
    #[default]
    Step1Selection,
    /// About text and contact details.
    Step2Details,
}

impl WizardStep {
    /// One-based position of the step, as shown to users.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Step1Selection => 1,
            Self::Step2Details => 2,
        }
    }
}

/// Single-valued text fields of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    /// Name shown on the portfolio.
    Name,
    /// Free-text about section.
    About,
    /// Public contact email.
    ContactEmail,
    /// Public contact mobile number.
    ContactMobile,
}

/// Reasons a draft cannot leave the wizard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    /// [`PortfolioWizard::finalize`] was called before reaching step two.
    #[error("portfolio can only be submitted from the details step")]
    NotOnDetailsStep,
    /// At least one field failed validation.
    #[error("{0}")]
    Invalid(FieldErrors),
}

/// A draft that passed every portfolio validator, paired with its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedPortfolio {
    template: TemplateId,
    profile: ProfileDraft,
}

impl FinalizedPortfolio {
    /// Template the portfolio is rendered with.
    #[must_use]
    pub fn template(&self) -> TemplateId {
        self.template
    }

    /// The validated profile.
    #[must_use]
    pub fn profile(&self) -> &ProfileDraft {
        &self.profile
    }

    /// Split into template and profile.
    #[must_use]
    pub fn into_parts(self) -> (TemplateId, ProfileDraft) {
        (self.template, self.profile)
    }
}

/// Draft state of the portfolio form, starting on step one with empty fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioWizard {
    step: WizardStep,
    template: Option<TemplateId>,
    draft: ProfileDraft,
}

impl PortfolioWizard {
    /// An empty wizard on step one.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Chosen template, if any.
    #[must_use]
    pub fn template(&self) -> Option<TemplateId> {
        self.template
    }

    /// Field values entered so far.
    #[must_use]
    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// Choose the template; a later choice replaces an earlier one.
    pub fn select_template(&mut self, template: TemplateId) {
        self.template = Some(template);
    }

    /// Replace the value of a text field. Values are stored as entered.
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProfileField::Name => self.draft.name = value,
            ProfileField::About => self.draft.about = value,
            ProfileField::ContactEmail => self.draft.contact_details.email = value,
            ProfileField::ContactMobile => self.draft.contact_details.mobile = value,
        }
    }

    /// Append a skill. Returns `false` and leaves the list untouched when the
    /// trimmed value is blank or already present.
    pub fn add_skill(&mut self, value: &str) -> bool {
        push_unique(&mut self.draft.skills, value)
    }

    /// Remove a skill by exact match. Returns whether anything was removed.
    pub fn remove_skill(&mut self, value: &str) -> bool {
        remove_exact(&mut self.draft.skills, value)
    }

    /// Append a hobby with the same rules as [`Self::add_skill`].
    pub fn add_hobby(&mut self, value: &str) -> bool {
        push_unique(&mut self.draft.hobbies, value)
    }

    /// Remove a hobby by exact match. Returns whether anything was removed.
    pub fn remove_hobby(&mut self, value: &str) -> bool {
        remove_exact(&mut self.draft.hobbies, value)
    }

    /// Errors that currently block the active step.
    #[must_use]
    pub fn step_errors(&self) -> FieldErrors {
        match self.step {
            WizardStep::Step1Selection => validation::validate_step_one(self.template, &self.draft),
            WizardStep::Step2Details => validation::validate_step_two(&self.draft),
        }
    }

    /// Move from step one to step two.
    ///
    /// Already being on step two is not an error; the step is returned as is.
    ///
    /// # Errors
    /// Returns the step-one errors, leaving the step unchanged, when any
    /// step-one field is invalid.
    pub fn advance_step(&mut self) -> Result<WizardStep, FieldErrors> {
        if self.step == WizardStep::Step1Selection {
            validation::validate_step_one(self.template, &self.draft).into_result()?;
            self.step = WizardStep::Step2Details;
        }
        Ok(self.step)
    }

    /// Go back to step one. Field values are kept.
    pub fn retreat_step(&mut self) -> WizardStep {
        self.step = WizardStep::Step1Selection;
        self.step
    }

    /// Validate the whole draft and hand it out for submission.
    ///
    /// # Errors
    /// [`WizardError::NotOnDetailsStep`] when called from step one, or
    /// [`WizardError::Invalid`] with every failing field.
    pub fn finalize(&self) -> Result<FinalizedPortfolio, WizardError> {
        if self.step != WizardStep::Step2Details {
            return Err(WizardError::NotOnDetailsStep);
        }
        validation::validate_portfolio(self.template, &self.draft)
            .into_result()
            .map_err(WizardError::Invalid)?;
        let template = self.template.ok_or_else(|| {
            WizardError::Invalid(validation::validate_portfolio(None, &self.draft))
        })?;
        Ok(FinalizedPortfolio {
            template,
            profile: self.draft.clone(),
        })
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() || list.iter().any(|existing| existing == trimmed) {
        return false;
    }
    list.push(trimmed.to_string());
    true
}

fn remove_exact(list: &mut Vec<String>, value: &str) -> bool {
    let before = list.len();
    list.retain(|existing| existing != value);
    list.len() != before
}
