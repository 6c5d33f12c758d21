//! Form submissions and their validation.
//!
//! Every field deserializes with a default so that a missing field surfaces
//! as a validation error naming it, not as a JSON decode failure.

use meridian_chat::looks_like_email;
use meridian_core::{MeridianConfig, WhitePaperConfig};
use serde::Deserialize;

use crate::error::LeadError;
use crate::types::{Lead, LeadKind};

const CONTACT_FORM_SOURCE: &str = "contact-form";
const NEWSLETTER_SOURCE: &str = "newsletter";
const WHITE_PAPER_SOURCE: &str = "white-paper";

/// Longest accepted name or company, in characters.
const MAX_FIELD_LENGTH: usize = 200;

/// POST /api/contact body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Validate the submission and turn it into a lead.
    pub fn into_lead(self, max_message_length: usize) -> Result<Lead, LeadError> {
        let name = required("name", &self.name)?;
        let email = email(&self.email)?;
        let message = required("message", &self.message)?;
        if message.chars().count() > max_message_length {
            return Err(LeadError::invalid(
                "message",
                format!("must be at most {} characters", max_message_length),
            ));
        }

        let mut lead = Lead::new(LeadKind::ContactForm, CONTACT_FORM_SOURCE, email, message);
        lead.name = Some(name);
        lead.company = optional("company", self.company.as_deref())?;
        Ok(lead)
    }
}

/// POST /api/newsletter body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsletterSignup {
    pub email: String,
    pub name: Option<String>,
}

impl NewsletterSignup {
    pub fn into_lead(self) -> Result<Lead, LeadError> {
        let email = email(&self.email)?;
        let mut lead = Lead::new(
            LeadKind::Newsletter,
            NEWSLETTER_SOURCE,
            email,
            "Newsletter signup".to_string(),
        );
        lead.name = optional("name", self.name.as_deref())?;
        Ok(lead)
    }
}

/// POST /api/white-paper body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WhitePaperRequest {
    pub email: String,
    pub name: Option<String>,
    pub company: Option<String>,
    /// Slug of the requested paper.
    pub paper: String,
}

impl WhitePaperRequest {
    /// Validate against the configured catalog.
    ///
    /// Returns the lead together with the paper it unlocks.
    pub fn into_lead(
        self,
        config: &MeridianConfig,
    ) -> Result<(Lead, WhitePaperConfig), LeadError> {
        let email = email(&self.email)?;
        let slug = required("paper", &self.paper)?;
        let paper = config
            .white_paper(&slug)
            .cloned()
            .ok_or(LeadError::UnknownPaper(slug))?;

        let mut lead = Lead::new(
            LeadKind::WhitePaper,
            WHITE_PAPER_SOURCE,
            email,
            format!("Downloaded white paper: {}", paper.title),
        );
        lead.name = optional("name", self.name.as_deref())?;
        lead.company = optional("company", self.company.as_deref())?;
        Ok((lead, paper))
    }
}

fn required(field: &'static str, value: &str) -> Result<String, LeadError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LeadError::invalid(field, "is required"));
    }
    Ok(trimmed.to_string())
}

fn optional(field: &'static str, value: Option<&str>) -> Result<Option<String>, LeadError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.chars().count() > MAX_FIELD_LENGTH => Err(LeadError::invalid(
            field,
            format!("must be at most {} characters", MAX_FIELD_LENGTH),
        )),
        Some(v) => Ok(Some(v.to_string())),
    }
}

fn email(value: &str) -> Result<String, LeadError> {
    let trimmed = required("email", value)?;
    if !looks_like_email(&trimmed) {
        return Err(LeadError::invalid("email", "must look like name@example.com"));
    }
    Ok(trimmed)
}
