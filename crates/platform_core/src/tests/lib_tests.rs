use super::*;
use std::time::Duration;

use chrono::NaiveDate;
use shared::domain::{CertificateStatus, PortfolioCategory, ReviewRating};

use crate::store::LOCAL_PROFILE_ID;

fn test_settings() -> Settings {
    Settings {
        verification_delay_ms: 50,
        drift_interval_secs: 1,
        drift_tick_probability: 1.0,
        drift_positive_bias: 1.0,
        load_sample_data: true,
    }
}

fn cert_draft(name: &str) -> CertificateDraft {
    CertificateDraft {
        name: name.to_string(),
        issuer: "한국산업인력공단".to_string(),
        acquired_on: NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"),
        number: "NW-2024-0001".to_string(),
    }
}

fn portfolio_draft(title: &str) -> PortfolioDraft {
    PortfolioDraft {
        title: title.to_string(),
        description: "설명".to_string(),
        category: PortfolioCategory::Web,
        tags: "Rust, Tokio".to_string(),
    }
}

fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<CoreEvent>) -> Vec<CoreEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn certificate_verifies_after_the_configured_delay() {
    let core = PlatformCore::new(test_settings());
    let mut events = core.subscribe_events();

    let certificate = core
        .submit_certificate(cert_draft("정보처리기사"))
        .await
        .expect("submit");
    assert_eq!(certificate.status, CertificateStatus::Pending);

    tokio::time::sleep(Duration::from_millis(60)).await;

    let snapshot = core.snapshot().await;
    assert_eq!(
        snapshot.certificates[0].status,
        CertificateStatus::Verified
    );

    let verified_event = drain_events(&mut events)
        .into_iter()
        .any(|event| matches!(event, CoreEvent::CertificateVerified { id, .. } if id == certificate.id));
    assert!(verified_event);
}

#[tokio::test(start_paused = true)]
async fn deleting_before_the_timer_keeps_the_certificate_gone() {
    let core = PlatformCore::new(test_settings());
    let mut events = core.subscribe_events();

    let certificate = core
        .submit_certificate(cert_draft("삭제될 자격증"))
        .await
        .expect("submit");
    core.delete_certificate(certificate.id)
        .await
        .expect("delete");

    tokio::time::sleep(Duration::from_millis(200)).await;

    let snapshot = core.snapshot().await;
    assert!(snapshot.certificates.is_empty());

    let resurrected = drain_events(&mut events)
        .into_iter()
        .any(|event| matches!(event, CoreEvent::CertificateVerified { .. }));
    assert!(!resurrected);
}

#[tokio::test]
async fn review_without_a_selected_rating_is_blocked() {
    let core = PlatformCore::new(test_settings());
    let err = core
        .submit_review(LOCAL_PROFILE_ID, None, "코멘트".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::RatingRequired));

    let snapshot = core.snapshot().await;
    assert!(snapshot.reviews.is_empty());
    assert_eq!(snapshot.profile.reputation, 0);
}

#[tokio::test]
async fn review_of_the_local_profile_moves_its_counters() {
    let core = PlatformCore::new(test_settings());
    core.submit_review(
        LOCAL_PROFILE_ID,
        Some(ReviewRating::Positive),
        "좋은 협업이었습니다.".to_string(),
    )
    .await
    .expect("submit");

    let snapshot = core.snapshot().await;
    assert_eq!(snapshot.profile.reputation, 5);
    assert_eq!(snapshot.profile.positive_reviews, 1);
    assert_eq!(snapshot.reviews.len(), 1);
}

#[tokio::test]
async fn updating_a_missing_portfolio_surfaces_not_found() {
    let core = PlatformCore::new(test_settings());
    let err = core
        .update_portfolio(PortfolioId(99), portfolio_draft("없음"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
}

#[tokio::test]
async fn presentation_flow_emits_clamped_views() {
    let core = PlatformCore::new(test_settings());
    let mut events = core.subscribe_events();

    let item = core
        .create_portfolio(portfolio_draft("발표"))
        .await
        .expect("create");
    core.start_presentation(item.id).await.expect("start");

    let started = drain_events(&mut events)
        .into_iter()
        .find_map(|event| match event {
            CoreEvent::PresentationChanged(Some(view)) => Some(view),
            _ => None,
        })
        .expect("presentation view");
    assert_eq!(started.counter, "1 / 4");
    assert!(started.at_first);
    assert!(!started.at_last);

    core.next_slide().await;
    core.next_slide().await;
    core.next_slide().await;
    // Clamped: no event for a no-op next at the last slide.
    core.next_slide().await;

    let last = drain_events(&mut events)
        .into_iter()
        .filter_map(|event| match event {
            CoreEvent::PresentationChanged(Some(view)) => Some(view),
            _ => None,
        })
        .last()
        .expect("last view");
    assert_eq!(last.counter, "4 / 4");
    assert!(last.at_last);

    core.close_presentation().await;
    let closed = drain_events(&mut events)
        .into_iter()
        .any(|event| matches!(event, CoreEvent::PresentationChanged(None)));
    assert!(closed);
}

#[tokio::test(start_paused = true)]
async fn ambient_drift_nudges_the_displayed_score() {
    let core = PlatformCore::new(test_settings());
    let mut events = core.subscribe_events();

    core.start_ambient_drift().await;
    tokio::time::sleep(Duration::from_millis(1_100)).await;
    core.stop_ambient_drift().await;

    let drifted = drain_events(&mut events)
        .into_iter()
        .find_map(|event| match event {
            CoreEvent::ReputationDrifted { score } => Some(score),
            _ => None,
        })
        .expect("drift event");
    assert_eq!(drifted, 1);

    let snapshot = core.snapshot().await;
    assert_eq!(snapshot.profile.reputation, 1);
}

#[tokio::test]
async fn handle_seam_covers_the_full_operation_surface() {
    let core = PlatformCore::new(test_settings());
    let handle: &dyn PlatformHandle = &core;

    handle.load_sample_data().await;
    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.peers.len(), 2);
    assert_eq!(snapshot.stats.total_users, 3);

    let item = handle
        .create_portfolio(portfolio_draft("핸들 경유"))
        .await
        .expect("create");
    handle.start_presentation(item.id).await.expect("start");
    handle.next_slide().await;
    handle.previous_slide().await;
    handle.close_presentation().await;
    handle.delete_portfolio(item.id).await.expect("delete");

    let snapshot = handle.snapshot().await;
    assert!(snapshot.portfolios.iter().all(|p| p.id != item.id));
}
