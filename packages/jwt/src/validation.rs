//! Claims validation
//!
//! Runs after the signature check. Checks run in a fixed order and the first
//! failure is the one reported: `nbf`, `exp`, `maxAge`, `aud`, `iss`, `sub`,
//! `jti`, `nonce`.

use crate::{
    claims::{Claims, names},
    error::{JwtError, JwtResult},
    options::{AudienceMatcher, VerifyOptions},
};
use chrono::Utc;
use serde_json::Value;

/// Validate `claims` against `options`.
///
/// # Errors
/// Returns [`JwtError::NotBefore`], [`JwtError::TokenExpired`] or
/// [`JwtError::InvalidClaim`] for the first check that fails.
pub fn validate_claims(claims: &Claims, options: &VerifyOptions) -> JwtResult<()> {
    let now = options
        .clock_timestamp
        .unwrap_or_else(|| Utc::now().timestamp());
    let tolerance = options.clock_tolerance;

    if !options.ignore_not_before
        && let Some(nbf) = claims.get(names::NBF)
    {
        let nbf = timestamp(nbf, "invalid nbf value")?;
        if nbf > now.saturating_add(tolerance) as f64 {
            return Err(JwtError::not_before(nbf.floor() as i64));
        }
    }

    if !options.ignore_expiration
        && let Some(exp) = claims.get(names::EXP)
    {
        let exp = timestamp(exp, "invalid exp value")?;
        if now.saturating_sub(tolerance) as f64 >= exp {
            return Err(JwtError::token_expired(exp.floor() as i64));
        }
    }

    if let Some(max_age) = options.max_age {
        let Some(iat) = claims.iat() else {
            return Err(JwtError::invalid_claim(
                "iat required when maxAge is specified",
            ));
        };
        let deadline = max_age.after(iat);
        if now.saturating_sub(tolerance) >= deadline {
            return Err(JwtError::token_expired(deadline));
        }
    }

    if let Some(expected) = &options.audience {
        check_audience(claims, expected)?;
    }

    if let Some(issuers) = &options.issuer {
        let ok = claims.iss().is_some_and(|iss| issuers.iter().any(|i| i == iss));
        if !ok {
            return Err(JwtError::invalid_claim(&format!(
                "jwt issuer invalid. expected: {}",
                issuers.join(",")
            )));
        }
    }

    check_literal("subject", claims.sub(), options.subject.as_deref())?;
    check_literal("jwtid", claims.jti(), options.jwt_id.as_deref())?;
    check_literal("nonce", claims.nonce(), options.nonce.as_deref())?;

    Ok(())
}

fn timestamp(value: &Value, message: &str) -> JwtResult<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| JwtError::invalid_claim(message)),
        _ => Err(JwtError::invalid_claim(message)),
    }
}

fn check_audience(claims: &Claims, expected: &[AudienceMatcher]) -> JwtResult<()> {
    let audiences = claims.audience();
    let matched = expected
        .iter()
        .any(|matcher| audiences.iter().any(|aud| matcher.matches(aud)));
    if matched {
        return Ok(());
    }

    let expected: Vec<String> = expected.iter().map(ToString::to_string).collect();
    Err(JwtError::invalid_claim(&format!(
        "jwt audience invalid. expected: {}",
        expected.join(" or ")
    )))
}

fn check_literal(name: &str, actual: Option<&str>, expected: Option<&str>) -> JwtResult<()> {
    match expected {
        Some(expected) if actual != Some(expected) => Err(JwtError::invalid_claim(&format!(
            "jwt {name} invalid. expected: {expected}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timespan::Timespan;
    use serde_json::json;

    const NOW: i64 = 1_600_000_000;

    fn claims(value: Value) -> Claims {
        Claims::from_value(value).unwrap_or_default()
    }

    fn options() -> VerifyOptions {
        VerifyOptions::new(["HS256"]).with_clock_timestamp(NOW)
    }

    #[test]
    fn not_before_equal_to_now_passes() {
        assert!(validate_claims(&claims(json!({"nbf": NOW})), &options()).is_ok());
        assert_eq!(
            validate_claims(&claims(json!({"nbf": NOW + 1})), &options()),
            Err(JwtError::not_before(NOW + 1))
        );
    }

    #[test]
    fn expiration_boundary() {
        assert_eq!(
            validate_claims(&claims(json!({"exp": NOW})), &options()),
            Err(JwtError::token_expired(NOW))
        );
        assert!(validate_claims(&claims(json!({"exp": NOW + 1})), &options()).is_ok());
        assert!(
            validate_claims(&claims(json!({"exp": NOW})), &options().ignore_expiration()).is_ok()
        );
    }

    #[test]
    fn tolerance_applies_to_both_bounds() {
        let opts = options().with_clock_tolerance(5);
        assert!(validate_claims(&claims(json!({"nbf": NOW + 5, "exp": NOW - 4})), &opts).is_ok());
        assert!(validate_claims(&claims(json!({"nbf": NOW + 6})), &opts).is_err());
        assert!(validate_claims(&claims(json!({"exp": NOW - 5})), &opts).is_err());
    }

    #[test]
    fn non_numeric_times_are_invalid_claims() {
        assert_eq!(
            validate_claims(&claims(json!({"exp": "tomorrow"})), &options()),
            Err(JwtError::invalid_claim("invalid exp value"))
        );
        assert_eq!(
            validate_claims(&claims(json!({"nbf": null})), &options()),
            Err(JwtError::invalid_claim("invalid nbf value"))
        );
        assert!(
            validate_claims(&claims(json!({"nbf": "x"})), &options().ignore_not_before()).is_ok()
        );
    }

    #[test]
    fn max_age_is_independent_of_ignore_expiration() {
        let opts = options()
            .ignore_expiration()
            .with_max_age(Timespan::seconds(10));
        assert_eq!(
            validate_claims(&claims(json!({"iat": NOW - 10})), &opts),
            Err(JwtError::token_expired(NOW))
        );
        assert!(validate_claims(&claims(json!({"iat": NOW - 9})), &opts).is_ok());
        assert_eq!(
            validate_claims(&claims(json!({})), &opts),
            Err(JwtError::invalid_claim("iat required when maxAge is specified"))
        );
    }

    #[test]
    fn first_failure_wins() {
        let opts = options().with_issuer("expected").with_subject("expected");
        let result = validate_claims(&claims(json!({"exp": NOW - 1, "iss": "other"})), &opts);
        assert!(matches!(result, Err(JwtError::TokenExpired { .. })));

        let result = validate_claims(&claims(json!({"iss": "other"})), &opts);
        assert_eq!(
            result,
            Err(JwtError::invalid_claim("jwt issuer invalid. expected: expected"))
        );
    }

    #[test]
    fn audience_message_lists_expectations() {
        let opts = options()
            .with_audience("urn:a")
            .with_audience(AudienceMatcher::pattern("^urn:b").unwrap_or(AudienceMatcher::from("")));
        assert_eq!(
            validate_claims(&claims(json!({"aud": "urn:c"})), &opts),
            Err(JwtError::invalid_claim(
                "jwt audience invalid. expected: urn:a or /^urn:b/"
            ))
        );
        assert!(validate_claims(&claims(json!({"aud": ["x", "urn:bee"]})), &opts).is_ok());
    }

    #[test]
    fn missing_expected_claims_fail() {
        for opts in [
            options().with_subject("s"),
            options().with_jwt_id("j"),
            options().with_nonce("n"),
            options().with_issuer("i"),
            options().with_audience("a"),
        ] {
            assert!(matches!(
                validate_claims(&Claims::new(), &opts),
                Err(JwtError::InvalidClaim(_))
            ));
        }
    }
}
