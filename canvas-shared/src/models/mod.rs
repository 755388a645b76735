//! Request and response bodies of the portfolio API.

pub mod auth;
pub mod envelope;
pub mod errors;
pub mod portfolio;

pub use auth::{
    Credential, LoginRequest, Profession, RegisterRequest, RegisterResponse, RegisteredUser,
    TokenResponse,
};
pub use envelope::{Envelope, EnvelopeShape};
pub use errors::ErrorResponse;
pub use portfolio::{
    ContactDetails, CreatePortfolioRequest, CreatePortfolioResponse, CreatedPortfolio,
    PortfolioData, ProfileDraft, TemplateId, UnknownTemplate,
};
