//! Property-based tests for failure classification
//!
//! Every failure a user sees is one of three fixed sentences. These tests
//! check the bucketing holds for arbitrary error text.

use super::error::{FailureClass, QUOTA_FALLBACK, TRANSPORT_FALLBACK, UNKNOWN_FALLBACK};
use super::gemini::GeminiService;
use proptest::prelude::*;
use reqwest::StatusCode;

// ============================================================================
// Strategies
// ============================================================================

/// Text that can contain none of the classification markers
fn arb_unmarked_text() -> impl Strategy<Value = String> {
    "[a-hj-pr-z0-9 .,:-]{0,60}"
}

fn arb_error_status() -> impl Strategy<Value = StatusCode> {
    prop_oneof![
        Just(400u16),
        Just(401u16),
        Just(403u16),
        Just(404u16),
        Just(429u16),
        500u16..600,
    ]
    .prop_map(|code| StatusCode::from_u16(code).unwrap())
}

fn arb_casing(word: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
        word.chars()
            .zip(upper)
            .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_quota_wording_wins(
        prefix in arb_unmarked_text(),
        marker in prop_oneof![Just("quota"), Just("limit")],
        suffix in arb_unmarked_text(),
        api in any::<bool>(),
    ) {
        let api = if api { "API " } else { "" };
        let message = format!("{api}{prefix}{marker}{suffix}");
        prop_assert_eq!(FailureClass::classify(&message), FailureClass::Quota);
    }

    // Only the lowercase words count as quota wording
    #[test]
    fn prop_quota_wording_is_case_sensitive(
        prefix in arb_unmarked_text(),
        marker in prop_oneof![arb_casing("quota"), arb_casing("limit")],
        suffix in arb_unmarked_text(),
    ) {
        prop_assume!(marker != "quota" && marker != "limit");
        let message = format!("{prefix}{marker}{suffix}");
        prop_assert_eq!(FailureClass::classify(&message), FailureClass::Unknown);
    }

    #[test]
    fn prop_api_marker_is_transport(prefix in arb_unmarked_text(), suffix in arb_unmarked_text()) {
        let message = format!("{prefix}API{suffix}");
        prop_assert_eq!(FailureClass::classify(&message), FailureClass::Transport);
    }

    #[test]
    fn prop_unmarked_is_unknown(message in arb_unmarked_text()) {
        prop_assert_eq!(FailureClass::classify(&message), FailureClass::Unknown);
    }

    #[test]
    fn prop_fallbacks_never_echo_the_error(message in ".{0,80}") {
        let fallback = FailureClass::classify(&message).fallback_message();
        let fallbacks = [TRANSPORT_FALLBACK, QUOTA_FALLBACK, UNKNOWN_FALLBACK];
        prop_assert!(fallbacks.contains(&fallback));
    }

    // HTTP errors from the client always carry the "API" marker, so they
    // are never reported as unknown
    #[test]
    fn prop_status_errors_are_never_unknown(status in arb_error_status(), body in ".{0,80}") {
        let err = GeminiService::status_error(status, &body);
        prop_assert_eq!(err.status, Some(status.as_u16()));
        prop_assert_ne!(err.class(), FailureClass::Unknown);
    }
}
