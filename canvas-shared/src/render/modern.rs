use super::{TemplateRenderer, document, escape_html, headline, hero_skills, initial, list_items};
use crate::models::{ProfileDraft, TemplateId};

const STYLESHEET: &str = "\
body{margin:0;font-family:system-ui,-apple-system,sans-serif;color:#0f172a;background:#f8fafc}\
header,section,footer{padding:3rem 8vw}\
header{display:flex;justify-content:space-between;align-items:center;background:#fff;box-shadow:0 1px 3px #0001}\
#hero{display:grid;grid-template-columns:2fr 1fr;gap:2rem;background:linear-gradient(135deg,#eef2ff,#fdf4ff)}\
.accent{background:linear-gradient(90deg,#6366f1,#a855f7);-webkit-background-clip:text;color:transparent}\
.chip{display:inline-block;margin:.25rem;padding:.35rem .8rem;border-radius:999px;background:#e0e7ff}\
.stats{display:flex;gap:2rem}.stats strong{font-size:2rem;display:block}\
.avatar{width:6rem;height:6rem;border-radius:50%;display:grid;place-items:center;font-size:2.5rem;color:#fff;background:#6366f1}\
footer{background:#0f172a;color:#cbd5e1}a{color:#4f46e5}";

/// Gradient-heavy contemporary layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModernTemplate;

impl TemplateRenderer for ModernTemplate {
    fn template(&self) -> TemplateId {
        TemplateId::Modern
    }

    fn render(&self, profile: &ProfileDraft) -> String {
        let name = escape_html(&profile.name);
        let email = escape_html(&profile.contact_details.email);
        let mobile = escape_html(&profile.contact_details.mobile);
        let hero_chips: String = hero_skills(&profile.skills)
            .iter()
            .map(|skill| format!("<span class=\"chip\">{}</span>", escape_html(skill)))
            .collect();

        let header = format!(
            "<header id=\"header\"><strong>{name}</strong><span>Professional Portfolio</span>\
             <nav><a href=\"#hero\">Home</a> <a href=\"#about\">About</a> \
             <a href=\"#contact\">Contact</a></nav></header>"
        );
        let hero = format!(
            "<section id=\"hero\"><div><h1>Hi, I'm <span class=\"accent\">{name}</span></h1>\
             <p>{headline}</p><div>{hero_chips}</div>\
             <div class=\"stats\"><div><strong>{skills}+</strong>Skills</div>\
             <div><strong>{hobbies}+</strong>Hobbies</div></div>\
             <p><a href=\"#contact\">Get In Touch</a></p></div>\
             <aside><div class=\"avatar\">{initial}</div><p>{email}</p><p>{mobile}</p></aside></section>",
            headline = escape_html(&headline(&profile.about)),
            skills = profile.skills.len(),
            hobbies = profile.hobbies.len(),
            initial = escape_html(&initial(&profile.name)),
        );
        let about = format!(
            "<section id=\"about\"><h2>About Me</h2><p>{about}</p>\
             <h3>Skills</h3><ul>{skills}</ul><h3>Hobbies</h3><ul>{hobbies}</ul></section>",
            about = escape_html(&profile.about),
            skills = list_items(&profile.skills),
            hobbies = list_items(&profile.hobbies),
        );
        let contact = format!(
            "<section id=\"contact\"><h2>Contact</h2>\
             <p>Email: <a href=\"mailto:{email}\">{email}</a></p>\
             <p>Phone: <a href=\"tel:{mobile}\">{mobile}</a></p></section>"
        );
        let footer = format!(
            "<footer id=\"footer\"><p>{name} &middot; Professional Portfolio</p>\
             <p>Made with passion on LocalPro Canvas</p></footer>"
        );

        document(
            &format!("{} | Portfolio", profile.name),
            STYLESHEET,
            &[header, hero, about, contact, footer].join("\n"),
        )
    }

    fn resume(&self, profile: &ProfileDraft) -> String {
        format!(
            "{name}\n{email}\n{mobile}\nSkills: {skills}\nHobbies: {hobbies}\nAbout:\n{about}\n",
            name = profile.name,
            email = profile.contact_details.email,
            mobile = profile.contact_details.mobile,
            skills = profile.skills.join(", "),
            hobbies = profile.hobbies.join(", "),
            about = profile.about,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::sample_profile;

    #[test]
    fn hero_features_first_four_skills_and_counts() {
        let page = ModernTemplate.render(&sample_profile());

        let hero_start = page.find("id=\"hero\"").unwrap();
        let about_start = page.find("id=\"about\"").unwrap();
        let hero = &page[hero_start..about_start];

        assert!(hero.contains("<span class=\"chip\">Photography</span>"));
        assert!(!hero.contains("Branding"));
        assert!(hero.contains("<strong>5+</strong>Skills"));
        assert!(hero.contains("<strong>2+</strong>Hobbies"));
        assert!(hero.contains("<p>I build things.</p>"));
        assert!(hero.contains("<div class=\"avatar\">J</div>"));
    }

    #[test]
    fn resume_lists_profile_fields() {
        let resume = ModernTemplate.resume(&sample_profile());
        let lines: Vec<&str> = resume.lines().collect();

        assert_eq!(lines[0], "Jane Doe");
        assert_eq!(lines[1], "jane@x.com");
        assert_eq!(lines[2], "5551234567");
        assert_eq!(lines[3], "Skills: Design, Rust, Go, Photography, Branding");
        assert_eq!(lines[4], "Hobbies: Chess, Hiking");
        assert_eq!(lines[5], "About:");
        assert_eq!(lines[6], "I build things. Mostly for the web.");
    }
}
