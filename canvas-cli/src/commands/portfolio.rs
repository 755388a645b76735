use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use canvas_cli::{
    api::{FetchedPortfolio, PortfolioLookup},
    errors::CanvasError,
    intake::IntakeFlow,
};
use clap::{Args, Subcommand};
use serde::Deserialize;
use shared::{
    models::{ContactDetails, TemplateId},
    render,
    routes::Route,
    validation::FieldErrors,
    wizard::{PortfolioWizard, ProfileField, WizardStep},
};
use strum::IntoEnumIterator;
use url::Url;

use super::App;

#[derive(Subcommand, Debug)]
pub enum PortfolioCommand {
    /// Fill in the two-step form and generate a portfolio
    Create(CreateArgs),
    /// Fetch a portfolio and render it
    Show(ShowArgs),
    /// List the available templates
    Templates,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Template to render the portfolio with
    #[arg(long, short, value_parser = parse_template, help = "Template to use (modern or old-aesthetic)")]
    pub template: Option<TemplateId>,

    #[arg(long, help = "Name shown on the portfolio")]
    pub name: Option<String>,

    /// Skill to list; repeat for more
    #[arg(long = "skill", help = "Skill to list; repeat the flag for more")]
    pub skills: Vec<String>,

    #[arg(long = "hobby", help = "Hobby to list; repeat the flag for more")]
    pub hobbies: Vec<String>,

    #[arg(long, help = "About text; the first sentence becomes the headline")]
    pub about: Option<String>,

    #[arg(long, help = "Contact email shown on the portfolio")]
    pub email: Option<String>,

    #[arg(long, help = "Contact mobile number shown on the portfolio")]
    pub mobile: Option<String>,

    /// Draft file to start from; flags override its values
    #[arg(long, help = "YAML or JSON draft to start from (flags override its values)")]
    pub from: Option<PathBuf>,

    #[arg(long, short, help = "Also write the rendered HTML page to this file once created")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Unique identifier of the portfolio, or a link to it
    pub id: String,

    #[arg(long, short, value_parser = parse_template, help = "Template to render with; defaults to the stored one")]
    pub template: Option<TemplateId>,

    #[arg(long, short, help = "Write the rendered HTML page to this file")]
    pub out: Option<PathBuf>,

    #[arg(long, help = "Write the plain-text resume to the current directory")]
    pub resume: bool,
}

/// Draft file layout: the profile fields plus an optional template. Every
/// field may be left out.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DraftFile {
    template: Option<TemplateId>,
    name: String,
    skills: Vec<String>,
    hobbies: Vec<String>,
    about: String,
    #[serde(rename = "contactDetails")]
    contact_details: ContactDetails,
}

fn parse_template(value: &str) -> Result<TemplateId, String> {
    value
        .parse()
        .map_err(|_| format!("unknown template '{value}'; expected modern or old-aesthetic"))
}

pub async fn run(app: &App, command: PortfolioCommand) -> Result<()> {
    match command {
        PortfolioCommand::Create(args) => create(app, args).await,
        PortfolioCommand::Show(args) => show(app, args).await,
        PortfolioCommand::Templates => {
            list_templates();
            Ok(())
        }
    }
}

fn list_templates() {
    for template in TemplateId::iter() {
        println!("{:<14} {}", template.as_str(), template.display_name());
        println!("{:<14} {}", "", template.description());
    }
}

/// Identifier and template hint from a bare id, an app route or a link.
///
/// `/modern/{id}` style routes carry their template; anything else
/// (`/p/{id}`, `/portfolios/{id}`, a bare id) yields its last path segment.
fn resolve_target(input: &str) -> (String, Option<TemplateId>) {
    let path = Url::parse(input).map_or_else(|_| input.to_string(), |url| url.path().to_string());
    match Route::recognize(&path) {
        Route::Portfolio {
            template,
            unique_id,
        } => (unique_id, Some(template)),
        _ => {
            let identifier = path.trim_matches('/').rsplit('/').next().unwrap_or_default();
            (identifier.to_string(), None)
        }
    }
}

fn incomplete(step: WizardStep, errors: FieldErrors) -> anyhow::Error {
    eprintln!("Step {} of 2 is incomplete:", step.number());
    CanvasError::Validation(errors).into()
}

fn read_draft(path: &Path) -> Result<DraftFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    let draft = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => serde_yml::from_str(&content)?,
        Some("json") => serde_json::from_str(&content)?,
        _ => bail!("unsupported draft format. Use 'yaml' or 'json'."),
    };
    Ok(draft)
}

fn fill_step_one(wizard: &mut PortfolioWizard, draft: &DraftFile, args: &CreateArgs) {
    if let Some(template) = args.template.or(draft.template) {
        wizard.select_template(template);
    }
    wizard.set_field(
        ProfileField::Name,
        args.name.clone().unwrap_or_else(|| draft.name.clone()),
    );
    for skill in draft.skills.iter().chain(&args.skills) {
        if !wizard.add_skill(skill) {
            tracing::warn!(skill = %skill, "skipping blank or duplicate skill");
        }
    }
    for hobby in draft.hobbies.iter().chain(&args.hobbies) {
        if !wizard.add_hobby(hobby) {
            tracing::warn!(hobby = %hobby, "skipping blank or duplicate hobby");
        }
    }
}

fn fill_step_two(wizard: &mut PortfolioWizard, draft: &DraftFile, args: &CreateArgs) {
    let pick = |flag: &Option<String>, stored: &str| flag.clone().unwrap_or_else(|| stored.to_string());
    wizard.set_field(ProfileField::About, pick(&args.about, &draft.about));
    wizard.set_field(
        ProfileField::ContactEmail,
        pick(&args.email, &draft.contact_details.email),
    );
    wizard.set_field(
        ProfileField::ContactMobile,
        pick(&args.mobile, &draft.contact_details.mobile),
    );
}

async fn create(app: &App, args: CreateArgs) -> Result<()> {
    let draft = match &args.from {
        Some(path) => read_draft(path)?,
        None => DraftFile::default(),
    };

    let mut flow = IntakeFlow::new(app.client.clone(), app.session.clone());

    fill_step_one(flow.wizard_mut(), &draft, &args);
    if let Err(errors) = flow.wizard_mut().advance_step() {
        return Err(incomplete(flow.wizard().step(), errors));
    }

    fill_step_two(flow.wizard_mut(), &draft, &args);
    let errors = flow.wizard().step_errors();
    if !errors.is_empty() {
        return Err(incomplete(flow.wizard().step(), errors));
    }

    let route = flow.submit().await?;
    let Route::Portfolio {
        template,
        unique_id,
    } = &route
    else {
        bail!("not logged in; run `canvas login` first");
    };
    println!("Portfolio created: {route}");
    println!("{}", app.config.portfolio_link(*template, unique_id));

    if let Some(out) = &args.out {
        let finalized = flow.wizard().finalize().map_err(CanvasError::from)?;
        fs::write(out, render::render_finalized(&finalized))
            .with_context(|| format!("failed to write {}", out.display()))?;
        println!("Rendered {template} page to {}", out.display());
    }
    Ok(())
}

async fn show(app: &App, args: ShowArgs) -> Result<()> {
    let (identifier, linked_template) = resolve_target(&args.id);
    let credential = app.session.credential();
    let fetched = match app.client.fetch_portfolio(&identifier, credential.as_ref()).await {
        PortfolioLookup::Found(fetched) => fetched,
        PortfolioLookup::NotFound => return Err(CanvasError::NotFound { identifier }.into()),
    };

    let template = args
        .template
        .or(linked_template)
        .or(fetched.template)
        .unwrap_or(TemplateId::Modern);
    let renderer = render::renderer_for(template);

    if let Some(out) = &args.out {
        fs::write(out, renderer.render(&fetched.profile))
            .with_context(|| format!("failed to write {}", out.display()))?;
        println!("Rendered {template} page to {}", out.display());
    }
    if args.resume {
        let file_name = render::resume_file_name(&fetched.profile.name);
        fs::write(&file_name, renderer.resume(&fetched.profile))
            .with_context(|| format!("failed to write {file_name}"))?;
        println!("Resume written to {file_name}");
    }
    if args.out.is_none() && !args.resume {
        print_summary(app, &fetched, template);
    }
    Ok(())
}

fn print_summary(app: &App, fetched: &FetchedPortfolio, template: TemplateId) {
    let profile = &fetched.profile;
    println!("{}", profile.name);
    println!("{}", render::headline(&profile.about));
    println!("template: {template} (via {} lookup)", fetched.tier);
    println!("skills: {}", profile.skills.join(", "));
    println!("hobbies: {}", profile.hobbies.join(", "));
    println!("email: {}", profile.contact_details.email);
    println!("mobile: {}", profile.contact_details.mobile);
    println!("{}", app.config.portfolio_link(template, &fetched.identifier));
}
