//! Field validation for tenant profile updates.
//!
//! Every rule runs before any field reaches the store, so a patch
//! either applies in full or not at all.

use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use validator::ValidateEmail;

use servia_core::error::AppError;
use servia_core::result::AppResult;
use servia_entity::tenant::{TenantProfilePatch, TenantStatus};

/// Maximum decoded logo size: 3.5 MiB.
const MAX_LOGO_BYTES: usize = 3_670_016;

/// Image MIME types accepted for tenant logos.
const ALLOWED_LOGO_MIME: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

fn postal_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{3}$").expect("postal code pattern is valid"))
}

/// Validates every present field of a profile patch.
pub fn validate_patch(patch: &TenantProfilePatch) -> AppResult<()> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("Tenant name cannot be empty"));
        }
    }

    if let Some(status) = &patch.status {
        status.parse::<TenantStatus>().map_err(|_| {
            AppError::validation("Status must be exactly \"active\" or \"inactive\"")
        })?;
    }

    if let Some(email) = &patch.contact_email {
        if !email.validate_email() {
            return Err(AppError::validation("Invalid contact email address"));
        }
    }

    if let Some(postal_code) = &patch.postal_code {
        if !postal_code_pattern().is_match(postal_code) {
            return Err(AppError::validation(
                "Postal code must match the XXXX-XXX format",
            ));
        }
    }

    if let Some(logo) = &patch.logo_image {
        validate_logo(logo)?;
    }

    Ok(())
}

/// Validates a logo submitted as a base64 data URI.
fn validate_logo(data_uri: &str) -> AppResult<()> {
    let rest = data_uri
        .strip_prefix("data:")
        .ok_or_else(|| AppError::validation("Logo must be a base64 data URI"))?;

    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::validation("Logo must be base64-encoded"))?;

    if !ALLOWED_LOGO_MIME.contains(&mime) {
        return Err(AppError::validation(format!(
            "Unsupported logo image type: {mime}"
        )));
    }

    let decoded = STANDARD
        .decode(payload)
        .map_err(|_| AppError::validation("Logo payload is not valid base64"))?;

    if decoded.len() > MAX_LOGO_BYTES {
        return Err(AppError::validation("Logo image exceeds the 3.5 MB limit"));
    }

    Ok(())
}
