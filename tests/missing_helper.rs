//! Resolution order when no helper is installed
//!
//! Runs with an empty `PATH`, so `boiler-writter` cannot be discovered. The
//! share code must still be validated first. This file holds a single test
//! because it changes the process environment.

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#![allow(clippy::unwrap_used, clippy::expect_used)]

use cs_sharecode::{Config, Error, ShareCodeResolver};

const SHARE_CODE: &str = "CSGO-GADqf-jjyJ8-cSP2r-smZRo-TO2xK";

#[tokio::test]
async fn share_code_is_decoded_before_helper_lookup() {
    // SAFETY: the only test in this binary, and the current-thread runtime
    // has not spawned any other threads that read the environment.
    unsafe { std::env::set_var("PATH", "/nonexistent") };

    let err = cs_sharecode::resolve("not-a-share-code", true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidShareCode(_)), "got {err:?}");

    let overflow = cs_sharecode::resolve("CSGO-99999-99999-99999-99999-99999", true)
        .await
        .unwrap_err();
    assert!(matches!(overflow, Error::DecodeShareCode(_)), "got {overflow:?}");

    // building the resolver succeeds; the missing helper shows up on fetch
    let resolver = ShareCodeResolver::from_config(&Config::default()).unwrap();
    let err = resolver.resolve("garbage", false).await.unwrap_err();
    assert_eq!(err.code(), "invalid_share_code");

    let err = resolver.resolve(SHARE_CODE, false).await.unwrap_err();
    assert!(matches!(err, Error::ProcessLaunch { .. }), "got {err:?}");
}
