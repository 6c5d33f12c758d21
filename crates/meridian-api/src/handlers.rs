//! Route handlers for all API endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use meridian_chat::RouteResult;
use meridian_leads::{ContactForm, Lead, NewsletterSignup, WhitePaperRequest};

use crate::error::ApiError;
use crate::session::coerce_session;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

/// Request body for POST /api/chat.
///
/// Both fields are loosely typed; see [`coerce_session`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    pub message: serde_json::Value,
    pub session: serde_json::Value,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub site: String,
    pub version: String,
    pub uptime_secs: u64,
    pub leads_captured: u64,
}

/// Response for accepted lead forms.
#[derive(Debug, Serialize, Deserialize)]
pub struct LeadAccepted {
    pub success: bool,
    pub id: Uuid,
}

/// Response for POST /api/white-paper.
#[derive(Debug, Serialize, Deserialize)]
pub struct WhitePaperAccepted {
    pub success: bool,
    pub id: Uuid,
    pub title: String,
    pub download_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WhitePaperSummary {
    pub slug: String,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WhitePaperCatalog {
    pub papers: Vec<WhitePaperSummary>,
}

// =============================================================================
// Handler functions
// =============================================================================

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        site: state.config.general.site_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        leads_captured: state.leads_captured(),
    })
}

/// POST /api/chat - route one chat message.
///
/// A captured contact is delivered to the lead sink before responding. If
/// delivery fails the visitor still gets the router's reply; the failure is
/// only logged.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<RouteResult>, ApiError> {
    if !state.config.chat.enabled {
        return Err(ApiError::ServiceUnavailable("chat is disabled".to_string()));
    }

    let message = body.message.as_str();
    let max_len = state.config.chat.max_message_length;
    if message.is_some_and(|m| m.chars().count() > max_len) {
        return Err(ApiError::BadRequest(format!(
            "message exceeds maximum length of {} characters",
            max_len
        )));
    }

    let session = coerce_session(&body.session);
    let result = meridian_chat::route(message, &session);

    tracing::debug!(
        awaiting_email = result.session.awaiting_contact_email,
        open_scheduler = result.open_scheduler.is_some(),
        forward_contact = result.forward_contact.is_some(),
        "Chat message routed"
    );

    if let Some(ref payload) = result.forward_contact {
        if let Err(e) = state.deliver(Lead::from_chat(payload)).await {
            tracing::warn!(error = %e, "Chat contact could not be delivered");
        }
    }

    Ok(Json(result))
}

/// POST /api/contact - contact form submission.
pub async fn contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<LeadAccepted>), ApiError> {
    let lead = form.into_lead(state.config.leads.max_message_length)?;
    accept(&state, lead).await
}

/// POST /api/newsletter - newsletter signup.
pub async fn newsletter(
    State(state): State<AppState>,
    Json(signup): Json<NewsletterSignup>,
) -> Result<(StatusCode, Json<LeadAccepted>), ApiError> {
    let lead = signup.into_lead()?;
    accept(&state, lead).await
}

/// POST /api/white-paper - capture a lead and return the download link.
pub async fn white_paper(
    State(state): State<AppState>,
    Json(request): Json<WhitePaperRequest>,
) -> Result<(StatusCode, Json<WhitePaperAccepted>), ApiError> {
    let (lead, paper) = request.into_lead(&state.config)?;
    let id = lead.id;
    state.deliver(lead).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(WhitePaperAccepted {
            success: true,
            id,
            title: paper.title,
            download_url: paper.download_url,
        }),
    ))
}

/// GET /api/white-papers - the white-paper catalog, without download links.
pub async fn white_papers(State(state): State<AppState>) -> Json<WhitePaperCatalog> {
    let papers = state
        .config
        .white_papers
        .iter()
        .map(|p| WhitePaperSummary {
            slug: p.slug.clone(),
            title: p.title.clone(),
        })
        .collect();
    Json(WhitePaperCatalog { papers })
}

async fn accept(state: &AppState, lead: Lead) -> Result<(StatusCode, Json<LeadAccepted>), ApiError> {
    let id = lead.id;
    state.deliver(lead).await?;
    Ok((StatusCode::ACCEPTED, Json(LeadAccepted { success: true, id })))
}
