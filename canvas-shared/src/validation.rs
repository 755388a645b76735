//! Field validation for the registration, login and portfolio forms.
//!
//! Every function here is pure: the same input always yields the same
//! result. Group validators return a [`FieldErrors`] map that only contains
//! failing fields; an empty map means the group is valid.

use std::{collections::BTreeMap, fmt};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Profession, ProfileDraft, TemplateId};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\S+@\S+\.\S+").unwrap_or_else(|err| unreachable!("email pattern: {err}"))
});

/// Minimum password length accepted at registration.
pub const REGISTRATION_PASSWORD_MIN: usize = 8;
/// Minimum password length accepted at login.
pub const LOGIN_PASSWORD_MIN: usize = 6;
/// Accepted digit count range for phone numbers.
pub const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Registration: full name.
    FullName,
    /// Registration and login: account email.
    Email,
    /// Registration: phone number.
    Phone,
    /// Registration: profession choice.
    Profession,
    /// Registration and login: password.
    Password,
    /// Registration: password confirmation.
    ConfirmPassword,
    /// Registration: terms checkbox.
    AcceptTerms,
    /// Portfolio step one: template choice.
    Template,
    /// Portfolio step one: name.
    Name,
    /// Portfolio step one: skills list.
    Skills,
    /// Portfolio step two: about text.
    About,
    /// Portfolio step two: contact email.
    ContactEmail,
    /// Portfolio step two: contact mobile number.
    Mobile,
}

impl Field {
    /// Key the field is reported under.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Profession => "profession",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::AcceptTerms => "acceptTerms",
            Self::Template => "template",
            Self::Name => "name",
            Self::Skills => "skills",
            Self::About => "about",
            Self::ContactEmail => "contactDetails.email",
            Self::Mobile => "contactDetails.mobile",
        }
    }

    /// Label used when composing messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Email | Self::ContactEmail => "Email",
            Self::Phone => "Phone number",
            Self::Profession => "Profession",
            Self::Password => "Password",
            Self::ConfirmPassword => "Password confirmation",
            Self::AcceptTerms => "Terms",
            Self::Template => "Template",
            Self::Name => "Name",
            Self::Skills => "Skills",
            Self::About => "About section",
            Self::Mobile => "Mobile number",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors that can occur during form validation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValidationError {
    /// Field is required but empty
    Required,
    /// Email does not look like `local@domain.tld`
    InvalidEmail,
    /// Password is shorter than the minimum for this form
    PasswordTooShort {
        /// Minimum length of the form that rejected it.
        min: usize,
    },
    /// Password has no ASCII uppercase letter
    MissingUppercase,
    /// Password has no digit
    MissingDigit,
    /// Password confirmation doesn't match password
    PasswordsDoNotMatch,
    /// Phone number does not have 10 to 15 digits
    InvalidPhone,
    /// No skill was added
    NoSkills,
    /// No template was chosen
    TemplateNotSelected,
    /// No profession was chosen
    ProfessionNotSelected,
    /// Terms and conditions were not accepted
    TermsNotAccepted,
}

impl ValidationError {
    /// Message shown next to `field`.
    #[must_use]
    pub fn message(self, field: Field) -> String {
        match self {
            Self::Required => format!("{} is required", field.label()),
            Self::InvalidEmail => "Email is invalid".to_string(),
            Self::PasswordTooShort { min } => {
                format!("Password must be at least {min} characters")
            }
            Self::MissingUppercase => "Must contain at least one uppercase letter".to_string(),
            Self::MissingDigit => "Must contain at least one number".to_string(),
            Self::PasswordsDoNotMatch => "Passwords do not match".to_string(),
            Self::InvalidPhone => format!("{} is invalid", field.label()),
            Self::NoSkills => "Add at least one skill".to_string(),
            Self::TemplateNotSelected => "Please select a template".to_string(),
            Self::ProfessionNotSelected => "Please select your profession".to_string(),
            Self::TermsNotAccepted => "You must accept the terms and conditions".to_string(),
        }
    }
}

/// Failing fields of a form, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, ValidationError>);

impl FieldErrors {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a single field check. Passing checks are ignored.
    pub fn check(&mut self, field: Field, outcome: Result<(), ValidationError>) {
        if let Err(error) = outcome {
            self.0.insert(field, error);
        }
    }

    /// Record `error` for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: Field, error: ValidationError) {
        self.0.insert(field, error);
    }

    /// Error recorded for `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.0.get(&field).copied()
    }

    /// Whether `field` failed.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|error| error.message(field))
    }

    /// Whether every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failing fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, ValidationError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    /// Field names mapped to their messages.
    #[must_use]
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.iter()
            .map(|(field, error)| (field.as_str(), error.message(field)))
            .collect()
    }

    /// Add every error of `other`; its entries win on conflicts.
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    /// `Ok(())` when no field failed.
    ///
    /// # Errors
    /// Returns `self` when at least one field failed.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", field.as_str(), error.message(field))?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validates a value that must be non-empty after trimming.
///
/// # Errors
/// [`ValidationError::Required`] when the value is blank.
pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required);
    }
    Ok(())
}

/// Validates an email address.
///
/// # Validation rules
/// - Email must not be empty
/// - Email must contain a non-blank token on both sides of `@` and a `.`
///   inside the domain part
///
/// # Errors
/// [`ValidationError::Required`] or [`ValidationError::InvalidEmail`].
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    validate_required(email)?;
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validates a password chosen at registration.
///
/// # Validation rules
/// - Password must not be empty
/// - Password must be at least 8 characters long
/// - Password must contain an uppercase letter and a digit
///
/// The first failing rule is reported.
///
/// # Errors
/// The first [`ValidationError`] that applies.
pub fn validate_registration_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Required);
    }
    if password.chars().count() < REGISTRATION_PASSWORD_MIN {
        return Err(ValidationError::PasswordTooShort {
            min: REGISTRATION_PASSWORD_MIN,
        });
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::MissingDigit);
    }
    Ok(())
}

/// Validates a password entered at login.
///
/// Login only checks for at least 6 characters, a weaker gate than
/// registration.
///
/// # Errors
/// [`ValidationError::Required`] or [`ValidationError::PasswordTooShort`].
pub fn validate_login_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Required);
    }
    if password.chars().count() < LOGIN_PASSWORD_MIN {
        return Err(ValidationError::PasswordTooShort {
            min: LOGIN_PASSWORD_MIN,
        });
    }
    Ok(())
}

/// Validates that the password confirmation matches the password exactly.
///
/// # Errors
/// [`ValidationError::PasswordsDoNotMatch`].
pub fn validate_confirm_password(
    confirm_password: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if confirm_password != password {
        return Err(ValidationError::PasswordsDoNotMatch);
    }
    Ok(())
}

/// Validates a phone number: required, and 10 to 15 digits once every
/// non-digit character is stripped.
///
/// # Errors
/// [`ValidationError::Required`] or [`ValidationError::InvalidPhone`].
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    validate_required(phone)?;
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !PHONE_DIGITS.contains(&digits) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

/// Validates that at least one skill was added.
///
/// # Errors
/// [`ValidationError::NoSkills`] when the list is empty.
pub fn validate_skills(skills: &[String]) -> Result<(), ValidationError> {
    if skills.is_empty() {
        return Err(ValidationError::NoSkills);
    }
    Ok(())
}

/// Validates that a template was chosen.
///
/// # Errors
/// [`ValidationError::TemplateNotSelected`] when no template was chosen.
pub fn validate_template(template: Option<TemplateId>) -> Result<(), ValidationError> {
    template.map(|_| ()).ok_or(ValidationError::TemplateNotSelected)
}

/// Login form: email and password.
#[must_use]
pub fn validate_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check(Field::Email, validate_email(email));
    errors.check(Field::Password, validate_login_password(password));
    errors
}

/// First registration step: who the user is.
#[must_use]
pub fn validate_registration_details(
    full_name: &str,
    email: &str,
    phone: &str,
    profession: Option<Profession>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check(Field::FullName, validate_required(full_name));
    errors.check(Field::Email, validate_email(email));
    errors.check(Field::Phone, validate_phone(phone));
    if profession.is_none() {
        errors.insert(Field::Profession, ValidationError::ProfessionNotSelected);
    }
    errors
}

/// Second registration step: password, confirmation and terms.
#[must_use]
pub fn validate_registration_secrets(
    password: &str,
    confirm_password: &str,
    accept_terms: bool,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check(Field::Password, validate_registration_password(password));
    errors.check(
        Field::ConfirmPassword,
        validate_confirm_password(confirm_password, password),
    );
    if !accept_terms {
        errors.insert(Field::AcceptTerms, ValidationError::TermsNotAccepted);
    }
    errors
}

/// Fields gathered on the first portfolio step: template, name and skills.
#[must_use]
pub fn validate_step_one(template: Option<TemplateId>, draft: &ProfileDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check(Field::Template, validate_template(template));
    errors.check(Field::Name, validate_required(&draft.name));
    errors.check(Field::Skills, validate_skills(&draft.skills));
    errors
}

/// Fields gathered on the second portfolio step: about and contact details.
#[must_use]
pub fn validate_step_two(draft: &ProfileDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.check(Field::About, validate_required(&draft.about));
    errors.check(Field::ContactEmail, validate_email(&draft.contact_details.email));
    errors.check(Field::Mobile, validate_phone(&draft.contact_details.mobile));
    errors
}

/// Everything that must hold before a portfolio is submitted.
#[must_use]
pub fn validate_portfolio(template: Option<TemplateId>, draft: &ProfileDraft) -> FieldErrors {
    let mut errors = validate_step_one(template, draft);
    errors.merge(validate_step_two(draft));
    errors
}
