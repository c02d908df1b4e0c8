use std::collections::BTreeSet;

use async_trait::async_trait;
use gatekeeper_sdk::{BearerTokenVerifier, VerifierError};

/// Accepts the configured tokens and nothing else.
pub struct StaticBearerTokens {
    tokens: BTreeSet<String>,
}

impl StaticBearerTokens {
    #[must_use]
    pub fn new(tokens: &[String]) -> Self {
        Self {
            tokens: tokens.iter().filter(|t| !t.is_empty()).cloned().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl BearerTokenVerifier for StaticBearerTokens {
    async fn verify_bearer_token(&self, token: &str) -> Result<bool, VerifierError> {
        Ok(self.tokens.contains(token))
    }
}
