mod common;

use chrono::{Duration, Utc};

use common::invite;
use ironcoach::models::{InviteRole, InviteStatus};
use ironcoach::services::invite_service::{ensure_pending, generate_invite_token, InviteError};

#[test]
fn pending_invite_passes_the_transition_guard() {
    let now = Utc::now();
    let pending = invite("new@example.com", InviteRole::Member, now + Duration::days(7), None);

    assert_eq!(pending.status(now), InviteStatus::Pending);
    assert!(ensure_pending(&pending, now).is_ok());
}

#[test]
fn accepted_invite_rejects_further_transitions() {
    let now = Utc::now();
    let accepted = invite(
        "member@example.com",
        InviteRole::Member,
        now + Duration::days(7),
        Some(now - Duration::days(1)),
    );

    assert_eq!(accepted.status(now), InviteStatus::Accepted);
    assert!(matches!(
        ensure_pending(&accepted, now),
        Err(InviteError::AlreadyAccepted)
    ));
}

#[test]
fn expired_invite_rejects_further_transitions() {
    let now = Utc::now();
    let expired = invite(
        "late@example.com",
        InviteRole::Trainer,
        now - Duration::hours(1),
        None,
    );

    assert_eq!(expired.status(now), InviteStatus::Expired);
    assert!(matches!(
        ensure_pending(&expired, now),
        Err(InviteError::Expired)
    ));
}

#[test]
fn expiry_is_evaluated_against_the_supplied_clock() {
    let now = Utc::now();
    let invite = invite("soon@example.com", InviteRole::Member, now + Duration::days(7), None);

    // still fine one hour before expiry, rejected one hour after
    assert!(ensure_pending(&invite, invite.expires_at - Duration::hours(1)).is_ok());
    assert!(matches!(
        ensure_pending(&invite, invite.expires_at + Duration::hours(1)),
        Err(InviteError::Expired)
    ));
}

#[test]
fn acceptance_wins_over_later_expiry() {
    let now = Utc::now();
    // accepted in time, inspected after the expiry timestamp lapsed
    let accepted_then_lapsed = invite(
        "done@example.com",
        InviteRole::Member,
        now - Duration::days(1),
        Some(now - Duration::days(2)),
    );

    assert_eq!(accepted_then_lapsed.status(now), InviteStatus::Accepted);
    assert!(matches!(
        ensure_pending(&accepted_then_lapsed, now),
        Err(InviteError::AlreadyAccepted)
    ));
}

#[test]
fn generated_tokens_are_high_entropy() {
    let tokens: Vec<String> = (0..8).map(|_| generate_invite_token()).collect();

    for token in &tokens {
        assert_eq!(token.len(), 48);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    // no duplicates across draws
    let mut unique = tokens.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), tokens.len());
}
