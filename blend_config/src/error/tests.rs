//! Unit tests for error construction and aggregation behaviour.

use rstest::rstest;
use std::sync::Arc;

use super::BlendError;
use crate::BlendResultExt;

fn unknown_profile(name: &str) -> BlendError {
    BlendError::UnknownProfile {
        name: name.into(),
        available: "dev, prod".into(),
    }
}

#[test]
fn single_owned_error_is_unwrapped() {
    let outcome = BlendError::try_aggregate(vec![Arc::new(unknown_profile("qa"))]);
    assert!(
        matches!(outcome, Some(BlendError::UnknownProfile { ref name, .. }) if name == "qa"),
        "expected the original error, got {outcome:?}"
    );
}

#[test]
fn single_shared_error_stays_aggregated() {
    let shared = Arc::new(unknown_profile("qa"));
    let outcome = BlendError::try_aggregate(vec![Arc::clone(&shared)]);
    match outcome {
        Some(BlendError::Aggregate(aggregate)) => assert_eq!(aggregate.len(), 1),
        other => panic!("expected Aggregate, got {other:?}"),
    }
}

#[test]
fn several_errors_render_numbered_lines() {
    let first = BlendError::invalid_flag("port", "missing '='");
    let second = Arc::new(unknown_profile("qa"));
    match BlendError::try_aggregate(vec![first, second]) {
        Some(BlendError::Aggregate(aggregate)) => {
            assert_eq!(aggregate.len(), 2);
            assert_eq!(aggregate.iter().count(), 2);
            let display = aggregate.to_string();
            assert!(display.starts_with("1: Invalid configuration flag 'port'"));
            assert!(display.contains("\n2: Unknown profile 'qa'"));
        }
        other => panic!("expected Aggregate, got {other:?}"),
    }
}

#[test]
fn try_aggregate_none_on_empty() {
    assert!(BlendError::try_aggregate(Vec::<Arc<BlendError>>::new()).is_none());
}

#[rstest]
#[case::conversion(BlendError::from(figment::Error::from("boom")))]
#[case::constructor(BlendError::gathering(figment::Error::from("boom")))]
fn figment_errors_become_gathering(#[case] err: BlendError) {
    assert!(matches!(err, BlendError::Gathering(_)));
    assert!(err.to_string().contains("boom"), "{err}");
}

#[test]
fn into_blend_shares_gathering_errors() {
    let result: Result<u16, figment::Error> = Err(figment::Error::from("missing port"));
    let err = result.into_blend().err();
    assert!(matches!(err.as_deref(), Some(BlendError::Gathering(_))));
}

#[test]
fn file_error_names_the_path() {
    let err = BlendError::file("config/app.toml", std::io::Error::other("denied"));
    let rendered = err.to_string();
    assert!(rendered.contains("config/app.toml"), "{rendered}");
    assert!(rendered.contains("denied"), "{rendered}");
}
