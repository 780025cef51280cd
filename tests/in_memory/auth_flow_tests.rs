//! In-memory integration tests for credential resolution.

use super::helpers::{Campus, term_start};
use lyceum::{
    error::ErrorKind,
    identity::{
        domain::Role,
        ports::AuthenticationError,
        services::IdentityServiceError,
    },
};
use mockable::Clock;
use rstest::rstest;

#[rstest]
#[case("admin", Role::Admin)]
#[case("ADMIN", Role::Admin)]
#[case(" Student ", Role::Student)]
#[case("user", Role::Student)]
#[tokio::test(flavor = "multi_thread")]
async fn role_labels_resolve_to_closed_roles(
    #[case] label: &str,
    #[case] expected: Role,
) -> Result<(), eyre::Report> {
    let campus = Campus::new()?;

    let ctx = campus.login("Ada", label).await?;

    eyre::ensure!(ctx.role() == expected, "expected {expected:?}, got {:?}", ctx.role());
    let profile = campus.identity.profile(&ctx).await?;
    eyre::ensure!(profile.role == expected, "stored role differs from token role");
    Ok(())
}

#[rstest]
#[case::empty("")]
#[case::garbage("Bearer not-a-token")]
#[case::other_scheme("Basic YWRhOnNlY3JldA==")]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_credentials_are_unauthenticated(#[case] header: &str) -> Result<(), eyre::Report> {
    let campus = Campus::new()?;

    let err = campus
        .identity
        .authenticate(header)
        .err()
        .ok_or_else(|| eyre::eyre!("credential should be rejected"))?;

    eyre::ensure!(err.kind() == ErrorKind::Unauthenticated, "got {:?}", err.kind());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_credentials_are_unauthenticated() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let ctx = campus.login("Ada", "student").await?;
    // The campus clock sits in the past, so a token stamped with it has
    // long expired by wall-clock time.
    let stale = campus.issuer.issue(ctx.user_id(), ctx.role(), &campus.clock)?;
    eyre::ensure!(campus.clock.utc() == term_start(), "clock moved");

    let err = campus
        .identity
        .authenticate(&stale)
        .err()
        .ok_or_else(|| eyre::eyre!("stale credential should be rejected"))?;

    eyre::ensure!(
        matches!(
            err,
            IdentityServiceError::Authentication(AuthenticationError::Expired)
        ),
        "expected expiry, got {err}"
    );
    eyre::ensure!(err.kind() == ErrorKind::Unauthenticated, "got {:?}", err.kind());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn token_signed_with_another_secret_is_rejected() -> Result<(), eyre::Report> {
    let campus = Campus::new()?;
    let ctx = campus.login("Ada", "student").await?;
    let foreign = lyceum::identity::adapters::TokenIssuer::new(
        &lyceum::config::AuthConfig::with_secret("a-completely-different-secret-of-32+"),
    )?
    .issue(ctx.user_id(), Role::Admin, &mockable::DefaultClock)?;

    let result = campus.identity.authenticate(&foreign);

    eyre::ensure!(
        result.as_ref().is_err_and(|err| err.kind() == ErrorKind::Unauthenticated),
        "forged credential accepted: {result:?}"
    );
    Ok(())
}
