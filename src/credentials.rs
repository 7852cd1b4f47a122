use crate::error::{GenerationError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    UserSupplied,
    ProcessDefault,
}

/// The API key selected for a single call. The secret is held only for the
/// duration of the request and is redacted from `Debug` output.
#[derive(Clone)]
pub struct EffectiveCredential {
    secret: String,
    source: CredentialSource,
}

impl EffectiveCredential {
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub fn is_default(&self) -> bool {
        self.source == CredentialSource::ProcessDefault
    }
}

impl fmt::Debug for EffectiveCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectiveCredential")
            .field("secret", &"[redacted]")
            .field("source", &self.source)
            .finish()
    }
}

/// Pure credential selection: a non-empty user key wins, otherwise the
/// process-level default is used. An empty or whitespace-only user key is
/// treated as absent. Fails with `MissingCredential` when neither exists —
/// the caller is responsible for warning the user about a default fallback.
pub fn resolve(user_key: Option<&str>, default_key: Option<&str>) -> Result<EffectiveCredential> {
    if let Some(key) = user_key.map(str::trim).filter(|key| !key.is_empty()) {
        return Ok(EffectiveCredential {
            secret: key.to_string(),
            source: CredentialSource::UserSupplied,
        });
    }

    match default_key.map(str::trim).filter(|key| !key.is_empty()) {
        Some(key) => Ok(EffectiveCredential {
            secret: key.to_string(),
            source: CredentialSource::ProcessDefault,
        }),
        None => Err(GenerationError::MissingCredential),
    }
}
