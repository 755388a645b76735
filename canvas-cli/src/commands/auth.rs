use anyhow::{Context, Result};
use canvas_cli::{api::PortfolioApi, errors::CanvasError};
use clap::Args;
use rpassword::prompt_password;
use shared::{models::Profession, validation};
use strum::IntoEnumIterator;

use super::{App, prompt};

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Full name shown on the account
    #[arg(long, help = "Full name shown on the account")]
    pub name: Option<String>,

    #[arg(long, help = "Email address used to sign in")]
    pub email: Option<String>,

    #[arg(long, help = "Phone number, 10 to 15 digits")]
    pub phone: Option<String>,

    /// Profession, e.g. `photographer` or `trainer`
    #[arg(long, value_parser = parse_profession, help = "Profession (photographer, designer, developer, writer, consultant, coach, artist, therapist, chef, trainer)")]
    pub profession: Option<Profession>,

    #[arg(long, help = "Accept the terms and conditions")]
    pub accept_terms: bool,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long, short, help = "Email address to sign in with; prompted when omitted")]
    pub email: Option<String>,
}

fn parse_profession(value: &str) -> Result<Profession, String> {
    value.parse().map_err(|_| {
        let known: Vec<&str> = Profession::iter().map(Profession::id).collect();
        format!("unknown profession '{value}'; expected one of {}", known.join(", "))
    })
}

/// Register a new account in two steps: details first, then the password.
pub async fn register(app: &App, args: RegisterArgs) -> Result<()> {
    let name = args.name.unwrap_or_default();
    let email = args.email.unwrap_or_default();
    let phone = args.phone.unwrap_or_default();

    validation::validate_registration_details(&name, &email, &phone, args.profession)
        .into_result()
        .map_err(CanvasError::from)?;

    let password = prompt_password("Password: ").context("failed to read password")?;
    let confirm = prompt_password("Confirm password: ").context("failed to read password")?;
    validation::validate_registration_secrets(&password, &confirm, args.accept_terms)
        .into_result()
        .map_err(CanvasError::from)?;

    let credential = app
        .client
        .register(name.trim(), email.trim(), &password)
        .await
        .map_err(CanvasError::from)?;

    println!("Registered and signed in as {}", credential.user_email);
    if let Some(profession) = args.profession {
        println!("profession: {profession}");
    }
    Ok(())
}

pub async fn login(app: &App, args: LoginArgs) -> Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    let password = prompt_password("Password: ").context("failed to read password")?;

    validation::validate_login(&email, &password)
        .into_result()
        .map_err(CanvasError::from)?;

    let credential = app
        .client
        .login(email.trim(), &password)
        .await
        .map_err(CanvasError::from)?;

    println!("Logged in as {}", credential.user_email);
    println!("user id: {}", credential.user_id);
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    let was_signed_in = app.session.is_authenticated();
    app.session.clear().map_err(CanvasError::from)?;
    if was_signed_in {
        println!("Logged out");
    } else {
        println!("No active session");
    }
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    match app.session.credential() {
        Some(credential) => {
            println!("Logged in as {}", credential.user_email);
            println!("user id: {}", credential.user_id);
        }
        None => println!("Not logged in"),
    }
    Ok(())
}
