//! Built-in sample fixtures. Domain state is volatile; every launch that
//! opts in starts from exactly this data set.

use chrono::NaiveDate;
use shared::domain::{
    Certificate, CertificateId, CertificateStatus, PeerUser, PortfolioCategory, PortfolioId,
    PortfolioItem, Review, ReviewId, ReviewRating, UserId,
};

use crate::store::PlatformState;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub fn populate(state: &mut PlatformState) {
    state.portfolios.push(PortfolioItem {
        id: PortfolioId(1),
        title: "웹 개발 프로젝트".to_string(),
        description: "현대적인 반응형 웹사이트 개발".to_string(),
        category: PortfolioCategory::Web,
        tags: vec![
            "React".to_string(),
            "JavaScript".to_string(),
            "CSS".to_string(),
        ],
        author: state.profile.name.clone(),
        created_on: date(2024, 1, 15),
    });

    state.certificates.push(Certificate {
        id: CertificateId(1),
        name: "웹디자인기능사".to_string(),
        issuer: "한국산업인력공단".to_string(),
        acquired_on: date(2023, 12, 15),
        number: "WD-2023-1234".to_string(),
        status: CertificateStatus::Verified,
    });

    // Peer ids start above the local profile id so review targeting can
    // tell the profile and its peers apart.
    state.peers.push(PeerUser {
        id: UserId(2),
        name: "김철수".to_string(),
        title: "웹 개발자".to_string(),
        reputation: 85,
        certificate_count: 3,
        portfolio_count: 5,
    });
    state.peers.push(PeerUser {
        id: UserId(3),
        name: "이영희".to_string(),
        title: "UI/UX 디자이너".to_string(),
        reputation: 92,
        certificate_count: 2,
        portfolio_count: 8,
    });

    state.reviews.push(Review {
        id: ReviewId(1),
        target_user_id: UserId(3),
        reviewer_name: "이영희".to_string(),
        rating: ReviewRating::Positive,
        comment: "전문적이고 신뢰할 수 있는 작업을 해주셨습니다.".to_string(),
        written_on: date(2024, 1, 10),
    });

    state.bump_id_floor();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_populate_every_collection() {
        let mut state = PlatformState::new();
        populate(&mut state);
        assert_eq!(state.portfolios.len(), 1);
        assert_eq!(state.certificates.len(), 1);
        assert_eq!(state.peers.len(), 2);
        assert_eq!(state.reviews.len(), 1);
        assert_eq!(state.certificates[0].status, CertificateStatus::Verified);
    }
}
