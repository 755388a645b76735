use super::{TemplateRenderer, document, escape_html, headline, hero_skills, initial, list_items};
use crate::models::{ProfileDraft, TemplateId};

const STYLESHEET: &str = "\
body{margin:0;font-family:Georgia,'Times New Roman',serif;color:#3e2723;background:#f5efe0}\
header,section,footer{padding:3rem 10vw;border-bottom:1px solid #c8b99a}\
header{display:flex;justify-content:space-between;align-items:baseline;letter-spacing:.15em;text-transform:uppercase}\
h1,h2,h3{font-weight:normal;letter-spacing:.08em}\
.eyebrow{font-size:.8rem;letter-spacing:.3em;color:#8d6e63}\
.quote{font-style:italic;font-size:1.25rem}\
.expertise li{display:inline-block;margin:.3rem;padding:.3rem .9rem;border:1px solid #5d4037}\
.stats{display:flex;gap:3rem}.stats strong{font-size:2rem;display:block}\
.portrait{width:7rem;height:9rem;display:grid;place-items:center;font-size:3rem;border:4px double #5d4037;background:#efe6d2}\
footer{background:#3e2723;color:#f5efe0;text-align:center}a{color:#5d4037}";

const RULE_WIDTH: usize = 60;

/// Serif, sepia layout with a classic feel.
#[derive(Debug, Clone, Copy, Default)]
pub struct OldAestheticTemplate;

impl TemplateRenderer for OldAestheticTemplate {
    fn template(&self) -> TemplateId {
        TemplateId::OldAesthetic
    }

    fn render(&self, profile: &ProfileDraft) -> String {
        let name = escape_html(&profile.name);
        let email = escape_html(&profile.contact_details.email);
        let mobile = escape_html(&profile.contact_details.mobile);

        let header = format!(
            "<header id=\"header\"><span>{name}</span>\
             <nav><a href=\"#about\">About</a> &middot; <a href=\"#contact\">Contact</a></nav></header>"
        );
        let hero = format!(
            "<section id=\"hero\"><p class=\"eyebrow\">ESTABLISHED PROFESSIONAL</p><h1>{name}</h1>\
             <p class=\"quote\">&ldquo;{headline}&rdquo;</p>\
             <h3>Areas of Expertise</h3><ul class=\"expertise\">{expertise}</ul>\
             <div class=\"stats\"><div><strong>{skills}</strong>Skills</div>\
             <div><strong>{hobbies}</strong>Interests</div></div>\
             <div class=\"portrait\">{initial}</div></section>",
            headline = escape_html(&headline(&profile.about)),
            expertise = list_items(hero_skills(&profile.skills)),
            skills = profile.skills.len(),
            hobbies = profile.hobbies.len(),
            initial = escape_html(&initial(&profile.name)),
        );
        let about = format!(
            "<section id=\"about\"><p class=\"eyebrow\">ABOUT &amp; BACKGROUND</p>\
             <h2>Background</h2><p>{about}</p>\
             <h3>Skills</h3><ul>{skills}</ul><h3>Personal Interests</h3><ul>{hobbies}</ul></section>",
            about = escape_html(&profile.about),
            skills = list_items(&profile.skills),
            hobbies = list_items(&profile.hobbies),
        );
        let contact = format!(
            "<section id=\"contact\"><h2>Correspondence</h2>\
             <p>Letters: <a href=\"mailto:{email}\">{email}</a></p>\
             <p>Direct Line: <a href=\"tel:{mobile}\">{mobile}</a></p>\
             <p>Availability: By Appointment</p></section>"
        );
        let footer = format!(
            "<footer id=\"footer\"><p>{name} &middot; All Rights Reserved</p>\
             <p>Portfolio Presentation &middot; LocalPro Canvas</p></footer>"
        );

        document(
            &format!("{} | Portfolio", profile.name),
            STYLESHEET,
            &[header, hero, about, contact, footer].join("\n"),
        )
    }

    fn resume(&self, profile: &ProfileDraft) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let bullets = |entries: &[String]| {
            entries
                .iter()
                .map(|entry| format!("  \u{2022} {entry}"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        format!(
            "{rule}\n{name}\n{rule}\n\n\
             Contact Information:\nEmail: {email}\nPhone: {mobile}\n\n\
             Professional Summary:\n{about}\n\n\
             Skills:\n{skills}\n\n\
             Personal Interests:\n{hobbies}\n\n\
             {rule}\nGenerated via LocalPro Canvas \u{2022} Classic Portfolio\n{rule}\n",
            name = profile.name.to_uppercase(),
            email = profile.contact_details.email,
            mobile = profile.contact_details.mobile,
            about = profile.about,
            skills = bullets(&profile.skills),
            hobbies = bullets(&profile.hobbies),
        )
    }
}
