//! Versioned vote submission payloads
//!
//! Clients announce their protocol version in the `Build-Version` header.
//! Versions below [`V2`] send a single menu reference and always vote with
//! one point; later versions send a list of weighted entries. Both shapes are
//! normalized into [`VoteCommand`]s before validation.

use super::common::MenuId;
use super::vote::MIN_POINTS;
use crate::error::{AppError, Result};
use serde::Deserialize;
use utoipa::ToSchema;

pub const BUILD_VERSION_HEADER: &str = "Build-Version";

/// First protocol version that submits weighted batches
pub const V2: i64 = 2;

/// One vote request for the calling employee, not yet validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteCommand {
    pub menu_id: MenuId,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteSubmission {
    /// Pre-V2 body; carries exactly one command with fixed points
    Legacy(VoteCommand),
    /// V2+ body; entries are kept in request order
    Batch(Vec<VoteCommand>),
}

impl VoteSubmission {
    pub fn commands(&self) -> &[VoteCommand] {
        match self {
            VoteSubmission::Legacy(command) => std::slice::from_ref(command),
            VoteSubmission::Batch(commands) => commands,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, VoteSubmission::Legacy(_))
    }
}

/// `{ "menu_id": <id> }`; any other field is ignored
#[derive(Debug, Deserialize, ToSchema)]
pub struct LegacyVotePayload {
    pub menu_id: MenuId,
}

/// `{ "votes": [ { "menu_id": <id>, "points": <1..3> }, ... ] }`
#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchVotePayload {
    pub votes: Vec<BatchVoteEntry>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchVoteEntry {
    pub menu_id: MenuId,
    pub points: i64,
}

/// Parse the raw `Build-Version` header value.
pub fn parse_build_version(raw: Option<&[u8]>) -> Result<i64> {
    let raw = raw.ok_or_else(|| AppError::BadRequest("version signal required".to_string()))?;
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .ok_or_else(|| AppError::BadRequest("version signal must be an integer".to_string()))
}

/// Select the payload decoder for `version` and normalize the body.
pub fn decode_submission(version: i64, body: &[u8]) -> Result<VoteSubmission> {
    if version < V2 {
        let payload: LegacyVotePayload = decode_body(body)?;
        Ok(VoteSubmission::Legacy(VoteCommand {
            menu_id: payload.menu_id,
            points: MIN_POINTS,
        }))
    } else {
        let payload: BatchVotePayload = decode_body(body)?;
        if payload.votes.is_empty() {
            return Err(AppError::BadRequest(
                "votes must contain at least one entry".to_string(),
            ));
        }
        Ok(VoteSubmission::Batch(
            payload
                .votes
                .into_iter()
                .map(|entry| VoteCommand {
                    menu_id: entry.menu_id,
                    points: entry.points,
                })
                .collect(),
        ))
    }
}

fn decode_body<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid vote payload: {}", e)))
}
