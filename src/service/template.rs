//! Placeholder substitution for lead templates and signatures.
//!
//! Placeholders look like `{{firstname}}` and match case-insensitively, so
//! `{{firstName}}` and `{{FIRSTNAME}}` are filled from the same field.
//! A placeholder is only replaced when its value is non-empty; anything
//! left over stays in the text for the user to spot.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::types::Lead;

/// Subject used when a template is not one of the built-ins.
pub const FALLBACK_SUBJECT: &str = "Connecting with you";

const FIELDS: [&str; 5] = ["firstname", "lastname", "company", "job_title", "role"];

static PLACEHOLDERS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    FIELDS
        .iter()
        .map(|field| {
            let re = Regex::new(&format!(r"(?i)\{{\{{{field}\}}\}}"))
                .unwrap_or_else(|e| panic!("placeholder pattern for {field}: {e}"));
            (*field, re)
        })
        .collect()
});

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BuiltinTemplate {
    pub name: &'static str,
    pub subject: &'static str,
    pub body: &'static str,
}

pub static BUILTIN_TEMPLATES: [BuiltinTemplate; 3] = [
    BuiltinTemplate {
        name: "profile-hello",
        subject: "Quick hello from a fellow professional",
        body: "Hi {{firstname}}, I came across your profile at {{company}}...",
    },
    BuiltinTemplate {
        name: "role-hello",
        subject: "Connecting with a fellow professional",
        body: "Hello {{firstname}}, I noticed your work at {{job_title}}...",
    },
    BuiltinTemplate {
        name: "informational-call",
        subject: "Interested in learning about your experience",
        body: "Hello {{firstName}},\n\n\
I hope your week is going well! I recently came across your profile on LinkedIn and \
found your work at {{company}} to be very interesting. More specifically, I am interested \
in your contributions as a {{role}}.\n\n\
If you are available, I would appreciate the opportunity to talk about your experience at \
{{company}} and any general advice you may have. My schedule is flexible, so I am happy to \
work around you when scheduling a 10-15 minute call. I have also attached my resume for \
your reference. Thank you in advance for your time.\n\n\
Best regards,",
    },
];

/// Subject for a template body: the built-in's subject on an exact match.
pub fn subject_for(template: &str) -> &'static str {
    BUILTIN_TEMPLATES
        .iter()
        .find(|t| t.body == template)
        .map(|t| t.subject)
        .unwrap_or(FALLBACK_SUBJECT)
}

/// Values available to placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderValues {
    pub firstname: String,
    pub lastname: String,
    pub company: String,
    pub job_title: String,
    pub role: String,
}

impl PlaceholderValues {
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            firstname: lead.firstname.clone(),
            lastname: lead.lastname.clone(),
            ..Default::default()
        }
    }

    /// Fill only the fields `extra` provides.
    pub fn with_extras(mut self, extra: &PlaceholderValues) -> Self {
        for (mine, theirs) in [
            (&mut self.firstname, &extra.firstname),
            (&mut self.lastname, &extra.lastname),
            (&mut self.company, &extra.company),
            (&mut self.job_title, &extra.job_title),
            (&mut self.role, &extra.role),
        ] {
            if !theirs.is_empty() {
                mine.clone_from(theirs);
            }
        }
        self
    }

    fn get(&self, field: &str) -> &str {
        match field {
            "firstname" => &self.firstname,
            "lastname" => &self.lastname,
            "company" => &self.company,
            "job_title" => &self.job_title,
            "role" => &self.role,
            _ => "",
        }
    }
}

pub fn replace_placeholders(text: &str, values: &PlaceholderValues) -> String {
    let mut out = text.to_string();
    for (field, re) in PLACEHOLDERS.iter() {
        let value = values.get(field);
        if value.is_empty() {
            continue;
        }
        out = re.replace_all(&out, regex::NoExpand(value)).into_owned();
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedLead {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub signature: String,
}

/// Fill a lead's template and signature.
pub fn render_lead(lead: &Lead, extras: &PlaceholderValues) -> RenderedLead {
    let values = PlaceholderValues::from_lead(lead).with_extras(extras);
    RenderedLead {
        id: lead.id,
        email: lead.email.clone(),
        subject: subject_for(&lead.template).to_string(),
        body: replace_placeholders(&lead.template, &values),
        signature: replace_placeholders(&lead.email_signature, &values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> PlaceholderValues {
        PlaceholderValues {
            firstname: "Dana".into(),
            company: "Acme".into(),
            ..Default::default()
        }
    }

    #[test]
    fn replaces_case_insensitively_and_repeatedly() {
        let out = replace_placeholders(
            "Hi {{firstName}}, {{company}} and {{COMPANY}} again",
            &values(),
        );
        assert_eq!(out, "Hi Dana, Acme and Acme again");
    }

    #[test]
    fn empty_values_leave_placeholder() {
        let out = replace_placeholders("as a {{role}} at {{company}}", &values());
        assert_eq!(out, "as a {{role}} at Acme");
    }

    #[test]
    fn unknown_placeholders_untouched() {
        let out = replace_placeholders("{{school}} {{ firstname }}", &values());
        assert_eq!(out, "{{school}} {{ firstname }}");
    }

    #[test]
    fn dollar_signs_in_values_are_literal() {
        let v = PlaceholderValues {
            company: "$1 Corp".into(),
            ..Default::default()
        };
        assert_eq!(replace_placeholders("at {{company}}", &v), "at $1 Corp");
    }

    #[test]
    fn subject_lookup_falls_back() {
        assert_eq!(
            subject_for(BUILTIN_TEMPLATES[1].body),
            "Connecting with a fellow professional"
        );
        assert_eq!(subject_for("custom text"), FALLBACK_SUBJECT);
        assert_eq!(subject_for(""), FALLBACK_SUBJECT);
    }

    #[test]
    fn render_fills_body_and_signature() {
        let lead = Lead {
            id: Some(7),
            email: "dana@acme.io".into(),
            firstname: "Dana".into(),
            template: BUILTIN_TEMPLATES[0].body.into(),
            email_signature: "Talk soon {{firstname}}".into(),
            ..Default::default()
        };
        let extras = PlaceholderValues {
            company: "Acme".into(),
            ..Default::default()
        };
        let rendered = render_lead(&lead, &extras);
        assert_eq!(rendered.id, Some(7));
        assert_eq!(rendered.subject, "Quick hello from a fellow professional");
        assert_eq!(rendered.body, "Hi Dana, I came across your profile at Acme...");
        assert_eq!(rendered.signature, "Talk soon Dana");
    }

    #[test]
    fn extras_do_not_blank_lead_fields() {
        let lead = Lead {
            firstname: "Dana".into(),
            ..Default::default()
        };
        let merged = PlaceholderValues::from_lead(&lead).with_extras(&PlaceholderValues {
            role: "CTO".into(),
            ..Default::default()
        });
        assert_eq!(merged.firstname, "Dana");
        assert_eq!(merged.role, "CTO");
    }
}
