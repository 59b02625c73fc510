//! Property-based tests for the submission state machine

use super::transition::*;
use super::*;
use crate::llm::{FailureClass, QUOTA_FALLBACK, TRANSPORT_FALLBACK, UNKNOWN_FALLBACK};
use proptest::prelude::*;
use std::time::Duration;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> SubmitContext {
    SubmitContext::new(Duration::from_millis(300))
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_class() -> impl Strategy<Value = FailureClass> {
    prop_oneof![
        Just(FailureClass::Transport),
        Just(FailureClass::Quota),
        Just(FailureClass::Unknown),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[a-zA-Z ]{0,20}".prop_map(|text| Event::UserSubmit {
            session_id: "s1".to_string(),
            text,
        }),
        "[a-zA-Z ]{1,20}".prop_map(|reply| Event::CompletionSucceeded { reply }),
        arb_class().prop_map(|class| Event::CompletionFailed { class }),
        Just(Event::RevealDelayElapsed),
    ]
}

fn arb_pending_state() -> impl Strategy<Value = SubmitState> {
    prop_oneof![
        "[a-z]{1,10}".prop_map(|user_text| SubmitState::Sending {
            session_id: "s1".to_string(),
            user_text,
        }),
        "[a-z]{1,10}".prop_map(|reply| SubmitState::Succeeded {
            session_id: "s1".to_string(),
            reply,
        }),
        arb_class().prop_map(|class| SubmitState::Failed {
            session_id: "s1".to_string(),
            class,
        }),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Every accepted user submission ends with exactly one assistant message,
    // and nothing is appended while a reply is pending.
    #[test]
    fn prop_one_reply_per_submission(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = SubmitState::Idle;
        let ctx = test_context();
        let mut accepted = 0usize;
        let mut replies = 0usize;

        for event in events {
            if let Ok(result) = transition(&state, &ctx, event) {
                for effect in &result.effects {
                    match effect {
                        Effect::AppendUserMessage { .. } => accepted += 1,
                        Effect::AppendAssistantMessage { .. } => replies += 1,
                        _ => {}
                    }
                }
                state = result.new_state;
            }
            let outstanding = usize::from(!state.is_idle());
            prop_assert_eq!(accepted, replies + outstanding);
        }
    }

    // The typing indicator drops as soon as the completion call returns,
    // stays down through the reveal delay and only comes back with a new
    // accepted submission
    #[test]
    fn prop_typing_follows_completion(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = SubmitState::Idle;
        let ctx = test_context();

        for event in events {
            let was_typing = state.is_typing();
            let completion = matches!(
                event,
                Event::CompletionSucceeded { .. } | Event::CompletionFailed { .. }
            );
            let reveal = matches!(event, Event::RevealDelayElapsed);
            let submit = matches!(event, Event::UserSubmit { .. });

            match transition(&state, &ctx, event) {
                Ok(result) => {
                    let typing = result.new_state.is_typing();
                    if completion {
                        prop_assert!(was_typing);
                        prop_assert!(!typing);
                    }
                    if reveal {
                        prop_assert!(!was_typing);
                        prop_assert!(!typing);
                    }
                    if typing && !was_typing {
                        prop_assert!(submit);
                    }
                    state = result.new_state;
                }
                Err(_) => {
                    // A completion is never refused while a request is in flight
                    prop_assert!(!(completion && was_typing));
                }
            }
        }
    }

    #[test]
    fn prop_pending_rejects_submissions(state in arb_pending_state(), text in "[a-zA-Z ]{0,20}") {
        let result = transition(&state, &test_context(), Event::UserSubmit {
            session_id: "s1".to_string(),
            text,
        });
        prop_assert!(matches!(result, Err(TransitionError::ReplyPending)));
    }

    #[test]
    fn prop_idle_accepts_non_blank_text(text in "[a-zA-Z]{1,10}[a-zA-Z ]{0,20}") {
        let result = transition(&SubmitState::Idle, &test_context(), Event::UserSubmit {
            session_id: "s1".to_string(),
            text: text.clone(),
        });
        prop_assert!(result.is_ok());
        let result = result.unwrap();
        prop_assert!(result.new_state.is_typing());
        prop_assert_eq!(
            &result.effects[0],
            &Effect::AppendUserMessage { text: text.trim().to_string() }
        );
    }

    #[test]
    fn prop_blank_text_never_accepted(text in "[ \t\n]{0,10}") {
        let result = transition(&SubmitState::Idle, &test_context(), Event::UserSubmit {
            session_id: "s1".to_string(),
            text,
        });
        prop_assert!(matches!(result, Err(TransitionError::EmptyInput)));
    }

    // A failure never leaks detail: the appended text is one of the three
    // fixed sentences
    #[test]
    fn prop_failure_reply_is_a_fallback(class in arb_class()) {
        let ctx = test_context();
        let sending = SubmitState::Sending {
            session_id: "s1".to_string(),
            user_text: "hello".to_string(),
        };
        let failed = transition(&sending, &ctx, Event::CompletionFailed { class }).unwrap();
        let done = transition(&failed.new_state, &ctx, Event::RevealDelayElapsed).unwrap();

        match &done.effects[..] {
            [Effect::AppendAssistantMessage { text, .. }] => {
                prop_assert!(
                    [TRANSPORT_FALLBACK, QUOTA_FALLBACK, UNKNOWN_FALLBACK].contains(&text.as_str())
                );
            }
            other => prop_assert!(false, "unexpected effects: {:?}", other),
        }
    }
}
