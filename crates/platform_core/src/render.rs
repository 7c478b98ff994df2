//! Text renderers for each section. Pure functions of a state snapshot:
//! the same snapshot always renders the identical string, and callers
//! re-render after every mutation that touches a section.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use shared::domain::{CertificateStatus, PeerUser};

use crate::StateSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Home,
    Portfolios,
    Certificates,
    Users,
    Profile,
    Reputation,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::Portfolios,
        Section::Certificates,
        Section::Users,
        Section::Profile,
        Section::Reputation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "홈",
            Section::Portfolios => "포트폴리오",
            Section::Certificates => "자격증",
            Section::Users => "사용자",
            Section::Profile => "프로필",
            Section::Reputation => "평판",
        }
    }
}

pub fn render_section(snapshot: &StateSnapshot, section: Section) -> String {
    match section {
        Section::Home => render_home(snapshot),
        Section::Portfolios => render_portfolios(snapshot),
        Section::Certificates => render_certificates(snapshot),
        Section::Users => render_users(&snapshot.peers),
        Section::Profile => render_profile(snapshot),
        Section::Reputation => render_reputation(snapshot),
    }
}

pub fn render_home(snapshot: &StateSnapshot) -> String {
    let stats = &snapshot.stats;
    format!(
        "전체 사용자: {}\n등록된 포트폴리오: {}\n인증된 자격증: {}\n",
        stats.total_users, stats.total_portfolios, stats.verified_certificates
    )
}

pub fn render_portfolios(snapshot: &StateSnapshot) -> String {
    if snapshot.portfolios.is_empty() {
        return "등록된 포트폴리오가 없습니다.\n".to_string();
    }

    let mut out = String::new();
    for item in &snapshot.portfolios {
        let _ = writeln!(out, "[{}] {}", item.category.label(), item.title);
        let _ = writeln!(out, "  {}", item.description);
        if !item.tags.is_empty() {
            let _ = writeln!(out, "  태그: {}", item.tags.join(", "));
        }
        let _ = writeln!(out, "  {} · {}", item.author, item.created_on);
    }
    out
}

pub fn render_certificates(snapshot: &StateSnapshot) -> String {
    if snapshot.certificates.is_empty() {
        return "등록된 자격증이 없습니다.\n".to_string();
    }

    let mut out = String::new();
    for cert in &snapshot.certificates {
        let _ = writeln!(out, "[{}] {}", cert.status.label(), cert.name);
        let _ = writeln!(out, "  발급기관: {}", cert.issuer);
        let _ = writeln!(out, "  취득일자: {}", cert.acquired_on);
        let _ = writeln!(out, "  자격증 번호: {}", cert.number);
    }
    out
}

pub fn render_users(peers: &[PeerUser]) -> String {
    if peers.is_empty() {
        return "검색 결과가 없습니다.\n".to_string();
    }

    let mut out = String::new();
    for peer in peers {
        let _ = writeln!(out, "{} — {}", peer.name, peer.title);
        let _ = writeln!(
            out,
            "  평판: {}점 | 자격증 {}개 | 포트폴리오 {}개",
            peer.reputation, peer.certificate_count, peer.portfolio_count
        );
    }
    out
}

pub fn render_profile(snapshot: &StateSnapshot) -> String {
    let profile = &snapshot.profile;
    let mut out = String::new();
    let _ = writeln!(out, "{} — {}", profile.name, profile.title);
    let _ = writeln!(out, "{}", profile.bio);
    let _ = writeln!(out, "연락처: {}", profile.contact);

    let badges: Vec<&str> = snapshot
        .certificates
        .iter()
        .filter(|cert| cert.status == CertificateStatus::Verified)
        .map(|cert| cert.name.as_str())
        .collect();
    if badges.is_empty() {
        let _ = writeln!(out, "인증된 자격증이 없습니다.");
    } else {
        let _ = writeln!(out, "인증된 자격증: {}", badges.join(", "));
    }
    out
}

pub fn render_reputation(snapshot: &StateSnapshot) -> String {
    let profile = &snapshot.profile;
    let mut out = String::new();
    let _ = writeln!(out, "평판 점수: {}", profile.reputation);
    let _ = writeln!(
        out,
        "긍정적 평가: {} | 부정적 평가: {}",
        profile.positive_reviews, profile.negative_reviews
    );

    let reviews: Vec<_> = snapshot
        .reviews
        .iter()
        .filter(|review| review.target_user_id == profile.id)
        .collect();
    if reviews.is_empty() {
        let _ = writeln!(out, "아직 평판이 없습니다.");
    } else {
        for review in reviews {
            let _ = writeln!(
                out,
                "{} ({}) — {}",
                review.reviewer_name,
                review.rating.label(),
                review.written_on
            );
            let _ = writeln!(out, "  {}", review.comment);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::store::PlatformState;
    use crate::StateSnapshot;

    fn sample_snapshot() -> StateSnapshot {
        let mut state = PlatformState::new();
        sample::populate(&mut state);
        StateSnapshot::capture(&state)
    }

    #[test]
    fn rendering_is_idempotent_for_every_section() {
        let snapshot = sample_snapshot();
        for section in Section::ALL {
            let first = render_section(&snapshot, section);
            let second = render_section(&snapshot, section);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn empty_collections_render_placeholder_lines() {
        let snapshot = StateSnapshot::capture(&PlatformState::new());
        assert_eq!(render_portfolios(&snapshot), "등록된 포트폴리오가 없습니다.\n");
        assert_eq!(render_certificates(&snapshot), "등록된 자격증이 없습니다.\n");
        assert!(render_reputation(&snapshot).contains("아직 평판이 없습니다."));
        assert!(render_profile(&snapshot).contains("인증된 자격증이 없습니다."));
    }

    #[test]
    fn home_counts_reflect_sample_data() {
        let home = render_home(&sample_snapshot());
        assert!(home.contains("전체 사용자: 3"));
        assert!(home.contains("인증된 자격증: 1"));
    }

    #[test]
    fn profile_lists_verified_certificate_badges() {
        assert!(render_profile(&sample_snapshot()).contains("웹디자인기능사"));
    }
}
