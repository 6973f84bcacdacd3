//! Identity routes: username reservation and recipient lookup.
//!
//! These run before a client registers presence. Reservation here and
//! registration over the WebSocket are two independent steps, not a
//! transaction; the relay trusts that the boundary was consulted first.

use axum::{extract::State, http::StatusCode, Json};
use relaypad_shared::{
    validate_username, CheckRecipientRequest, CheckRecipientResponse, CheckUsernameRequest,
    CheckUsernameResponse, ProblemDetails,
};

use crate::state::AppState;

type ApiError = (StatusCode, Json<ProblemDetails>);

fn internal_error(detail: String) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ProblemDetails::internal_error(detail)),
    )
}

/// Check whether a username is free, reserving it if so.
///
/// A taken name gets a 409 carrying the closest free numeric-suffix
/// suggestion.
pub async fn check_username(
    State(state): State<AppState>,
    Json(payload): Json<CheckUsernameRequest>,
) -> Result<(StatusCode, Json<CheckUsernameResponse>), ApiError> {
    tracing::info!("Checking username: {}", payload.username);

    if !validate_username(&payload.username) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ProblemDetails::bad_request(
                "Invalid username. Must be lowercase alphanumeric, periods, underscores, or dashes.",
            )),
        ));
    }

    if username_exists(&state, &payload.username).await? {
        let suggestion = first_free_suffix(&state, &payload.username).await?;
        return Ok((
            StatusCode::CONFLICT,
            Json(CheckUsernameResponse::Taken {
                message: "Username taken".to_string(),
                suggestion,
            }),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    state
        .db
        .insert_into(
            "users",
            vec![
                ("username", payload.username.clone().into()),
                ("created_at", now.into()),
            ],
        )
        .await
        .map_err(|e| {
            tracing::error!("Database error during reservation: {:?}", e);
            internal_error(format!("Database error: {e}"))
        })?;

    Ok((
        StatusCode::OK,
        Json(CheckUsernameResponse::Available {
            username: payload.username,
        }),
    ))
}

/// Existence query for a message recipient. Never reserves anything.
pub async fn check_recipient(
    State(state): State<AppState>,
    Json(payload): Json<CheckRecipientRequest>,
) -> Result<Json<CheckRecipientResponse>, ApiError> {
    let exists = username_exists(&state, &payload.username).await?;
    Ok(Json(CheckRecipientResponse { exists }))
}

async fn username_exists(state: &AppState, username: &str) -> Result<bool, ApiError> {
    let matches = state
        .db
        .query("users")
        .filter(|f| f.eq("username", username.to_string()))
        .collect()
        .await
        .map_err(|e| internal_error(format!("Database error: {e}")))?;

    Ok(!matches.is_empty())
}

/// Smallest positive integer suffix that is still free.
///
/// Each candidate is re-queried, so racing callers converge on distinct
/// names even though reservation itself is not transactional with the scan.
async fn first_free_suffix(state: &AppState, base: &str) -> Result<String, ApiError> {
    let mut counter = 1u32;
    loop {
        let candidate = format!("{base}{counter}");
        if !username_exists(state, &candidate).await? {
            return Ok(candidate);
        }
        counter += 1;
    }
}
