//! Federated JWT assertion verification against a configured key.

use async_trait::async_trait;
use gatekeeper_sdk::{AssertionVerifier, VerifierError};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{AssertionAlgorithm, AssertionConfig};
use crate::error::PluginError;

#[derive(Debug, Clone, Deserialize)]
struct AssertionClaims {
    #[serde(default)]
    sub: Option<String>,
}

struct KeyedValidation {
    key: DecodingKey,
    validation: Validation,
}

/// Verifies `X-jwt-assertion` values.
///
/// Signature, expiry, issuer or audience mismatches reject the assertion.
/// Input that is not a JWT at all is reported as malformed.
pub struct JwtAssertionVerifier {
    keyed: Option<KeyedValidation>,
}

impl JwtAssertionVerifier {
    /// Build from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::InvalidKey`] if the RSA public key cannot be
    /// parsed.
    pub fn from_config(cfg: &AssertionConfig) -> Result<Self, PluginError> {
        let (algorithm, key) = match cfg.algorithm {
            AssertionAlgorithm::Rs256 => (
                Algorithm::RS256,
                cfg.public_key_pem
                    .as_deref()
                    .map(|pem| DecodingKey::from_rsa_pem(pem.as_bytes()))
                    .transpose()
                    .map_err(PluginError::InvalidKey)?,
            ),
            AssertionAlgorithm::Hs256 => (
                Algorithm::HS256,
                cfg.shared_secret
                    .as_deref()
                    .map(|secret| DecodingKey::from_secret(secret.as_bytes())),
            ),
        };

        let Some(key) = key else {
            warn!(
                algorithm = ?cfg.algorithm,
                "No assertion key configured; federated assertions will be rejected"
            );
            return Ok(Self { keyed: None });
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = cfg.leeway_seconds;
        if let Some(issuer) = &cfg.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &cfg.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self {
            keyed: Some(KeyedValidation { key, validation }),
        })
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.keyed.is_some()
    }
}

#[async_trait]
impl AssertionVerifier for JwtAssertionVerifier {
    async fn verify_assertion(&self, assertion: &str) -> Result<bool, VerifierError> {
        let Some(keyed) = &self.keyed else {
            return Ok(false);
        };

        match decode::<AssertionClaims>(assertion, &keyed.key, &keyed.validation) {
            Ok(data) => {
                debug!(
                    subject = data.claims.sub.as_deref().unwrap_or("-"),
                    "Assertion accepted"
                );
                Ok(true)
            }
            Err(err) => match err.kind() {
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => Err(VerifierError::Malformed(err.to_string())),
                ErrorKind::InvalidKeyFormat | ErrorKind::InvalidRsaKey(_) => {
                    Err(VerifierError::Internal(err.to_string()))
                }
                _ => {
                    debug!(reason = %err, "Assertion rejected");
                    Ok(false)
                }
            },
        }
    }
}
