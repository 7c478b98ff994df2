//! In-memory entity store. All domain state lives here; every launch
//! starts from scratch (optionally seeded with the built-in sample data).

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::domain::{
    Certificate, CertificateId, CertificateStatus, PeerUser, PortfolioCategory, PortfolioId,
    PortfolioItem, Profile, Review, ReviewId, ReviewRating, UserId,
};

use crate::error::CoreError;
use crate::presentation::{PresentationPlayer, SlideDeck};
use crate::reputation;

pub const LOCAL_PROFILE_ID: UserId = UserId(1);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioDraft {
    pub title: String,
    pub description: String,
    pub category: PortfolioCategory,
    /// Raw comma-separated tag input, normalized on save.
    pub tags: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDraft {
    pub name: String,
    pub issuer: String,
    pub acquired_on: NaiveDate,
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEdit {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub contact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerSortKey {
    Name,
    Reputation,
    Certificates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub total_users: usize,
    pub total_portfolios: usize,
    pub verified_certificates: usize,
}

/// Trims each comma-separated entry and drops empty ones:
/// `" a, b ,, c "` becomes `["a", "b", "c"]`.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive substring match on name or title.
pub fn filter_peers(peers: &[PeerUser], query: &str) -> Vec<PeerUser> {
    let needle = query.to_lowercase();
    peers
        .iter()
        .filter(|peer| {
            peer.name.to_lowercase().contains(&needle)
                || peer.title.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Stable, total ordering per sort key.
pub fn sort_peers(peers: &[PeerUser], key: PeerSortKey) -> Vec<PeerUser> {
    let mut peers = peers.to_vec();
    match key {
        PeerSortKey::Name => peers.sort_by(|a, b| a.name.cmp(&b.name)),
        PeerSortKey::Reputation => peers.sort_by(|a, b| b.reputation.cmp(&a.reputation)),
        PeerSortKey::Certificates => {
            peers.sort_by(|a, b| b.certificate_count.cmp(&a.certificate_count))
        }
    }
    peers
}

#[derive(Debug)]
pub struct PlatformState {
    pub profile: Profile,
    pub portfolios: Vec<PortfolioItem>,
    pub certificates: Vec<Certificate>,
    pub peers: Vec<PeerUser>,
    pub reviews: Vec<Review>,
    pub presentation: PresentationPlayer,
    next_portfolio_id: i64,
    next_certificate_id: i64,
    next_review_id: i64,
}

impl Default for PlatformState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformState {
    pub fn new() -> Self {
        Self {
            profile: Profile {
                id: LOCAL_PROFILE_ID,
                name: "사용자 이름".to_string(),
                title: "직업/직책".to_string(),
                bio: "자기소개를 입력해주세요.".to_string(),
                contact: "연락처 정보".to_string(),
                reputation: 0,
                positive_reviews: 0,
                negative_reviews: 0,
            },
            portfolios: Vec::new(),
            certificates: Vec::new(),
            peers: Vec::new(),
            reviews: Vec::new(),
            presentation: PresentationPlayer::Closed,
            next_portfolio_id: 1,
            next_certificate_id: 1,
            next_review_id: 1,
        }
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Keeps id minting monotonic even after fixtures insert explicit ids.
    pub(crate) fn bump_id_floor(&mut self) {
        let floor = |ids: &mut i64, max: Option<i64>| {
            if let Some(max) = max {
                *ids = (*ids).max(max + 1);
            }
        };
        floor(
            &mut self.next_portfolio_id,
            self.portfolios.iter().map(|p| p.id.0).max(),
        );
        floor(
            &mut self.next_certificate_id,
            self.certificates.iter().map(|c| c.id.0).max(),
        );
        floor(
            &mut self.next_review_id,
            self.reviews.iter().map(|r| r.id.0).max(),
        );
    }

    fn mint_portfolio_id(&mut self) -> PortfolioId {
        let id = PortfolioId(self.next_portfolio_id);
        self.next_portfolio_id += 1;
        id
    }

    fn mint_certificate_id(&mut self) -> CertificateId {
        let id = CertificateId(self.next_certificate_id);
        self.next_certificate_id += 1;
        id
    }

    fn mint_review_id(&mut self) -> ReviewId {
        let id = ReviewId(self.next_review_id);
        self.next_review_id += 1;
        id
    }

    pub fn create_portfolio(&mut self, draft: PortfolioDraft) -> PortfolioItem {
        let item = PortfolioItem {
            id: self.mint_portfolio_id(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            tags: normalize_tags(&draft.tags),
            author: self.profile.name.clone(),
            created_on: Self::today(),
        };
        self.portfolios.push(item.clone());
        item
    }

    /// Id and author are preserved; the date is re-stamped on edit.
    pub fn update_portfolio(
        &mut self,
        id: PortfolioId,
        draft: PortfolioDraft,
    ) -> Result<PortfolioItem, CoreError> {
        let today = Self::today();
        let item = self
            .portfolios
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| CoreError::not_found("portfolio", id.0))?;
        item.title = draft.title;
        item.description = draft.description;
        item.category = draft.category;
        item.tags = normalize_tags(&draft.tags);
        item.created_on = today;
        Ok(item.clone())
    }

    pub fn delete_portfolio(&mut self, id: PortfolioId) -> Result<(), CoreError> {
        let before = self.portfolios.len();
        self.portfolios.retain(|item| item.id != id);
        if self.portfolios.len() == before {
            return Err(CoreError::not_found("portfolio", id.0));
        }
        if self.presentation.portfolio_id() == Some(id) {
            self.presentation.close();
        }
        Ok(())
    }

    pub fn portfolio(&self, id: PortfolioId) -> Option<&PortfolioItem> {
        self.portfolios.iter().find(|item| item.id == id)
    }

    pub fn create_certificate(&mut self, draft: CertificateDraft) -> Certificate {
        let certificate = Certificate {
            id: self.mint_certificate_id(),
            name: draft.name,
            issuer: draft.issuer,
            acquired_on: draft.acquired_on,
            number: draft.number,
            status: CertificateStatus::Pending,
        };
        self.certificates.push(certificate.clone());
        certificate
    }

    pub fn delete_certificate(&mut self, id: CertificateId) -> Result<(), CoreError> {
        let before = self.certificates.len();
        self.certificates.retain(|cert| cert.id != id);
        if self.certificates.len() == before {
            return Err(CoreError::not_found("certificate", id.0));
        }
        Ok(())
    }

    /// Returns the certificate only when the flip actually happened.
    /// Deleted records and already-verified records are a no-op; the
    /// deferred verification task relies on this being safe to call late.
    pub fn mark_certificate_verified(&mut self, id: CertificateId) -> Option<Certificate> {
        let certificate = self.certificates.iter_mut().find(|cert| cert.id == id)?;
        if certificate.status == CertificateStatus::Verified {
            return None;
        }
        certificate.status = CertificateStatus::Verified;
        Some(certificate.clone())
    }

    pub fn verified_certificates(&self) -> Vec<&Certificate> {
        self.certificates
            .iter()
            .filter(|cert| cert.status == CertificateStatus::Verified)
            .collect()
    }

    pub fn update_profile(&mut self, edit: ProfileEdit) {
        self.profile.name = edit.name;
        self.profile.title = edit.title;
        self.profile.bio = edit.bio;
        self.profile.contact = edit.contact;
    }

    /// Appends a review for `target`. Reviews of the local profile also
    /// move its reputation counters; reviews of peers only join the ledger.
    pub fn append_review(
        &mut self,
        target: UserId,
        rating: ReviewRating,
        comment: String,
    ) -> Review {
        let review = Review {
            id: self.mint_review_id(),
            target_user_id: target,
            reviewer_name: self.profile.name.clone(),
            rating,
            comment,
            written_on: Self::today(),
        };
        self.reviews.push(review.clone());
        if target == self.profile.id {
            reputation::apply_rating(&mut self.profile, rating);
        }
        review
    }

    pub fn reviews_of_profile(&self) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|review| review.target_user_id == self.profile.id)
            .collect()
    }

    pub fn peer(&self, id: UserId) -> Option<&PeerUser> {
        self.peers.iter().find(|peer| peer.id == id)
    }

    pub fn stats(&self) -> PlatformStats {
        PlatformStats {
            // Peers plus the local profile.
            total_users: self.peers.len() + 1,
            total_portfolios: self.portfolios.len(),
            verified_certificates: self.verified_certificates().len(),
        }
    }

    pub fn search_peers(&self, query: &str) -> Vec<PeerUser> {
        filter_peers(&self.peers, query)
    }

    pub fn sorted_peers(&self, key: PeerSortKey) -> Vec<PeerUser> {
        sort_peers(&self.peers, key)
    }

    pub fn start_presentation(&mut self, id: PortfolioId) -> Result<(), CoreError> {
        let item = self
            .portfolio(id)
            .ok_or_else(|| CoreError::not_found("portfolio", id.0))?;
        let deck = SlideDeck::build(item);
        self.presentation.start(deck);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, tags: &str) -> PortfolioDraft {
        PortfolioDraft {
            title: title.to_string(),
            description: "desc".to_string(),
            category: PortfolioCategory::Web,
            tags: tags.to_string(),
        }
    }

    #[test]
    fn normalizes_tag_input() {
        assert_eq!(normalize_tags(" a, b ,, c "), vec!["a", "b", "c"]);
        assert_eq!(normalize_tags(""), Vec::<String>::new());
        assert_eq!(normalize_tags(" , ,"), Vec::<String>::new());
    }

    #[test]
    fn mints_monotonic_portfolio_ids() {
        let mut state = PlatformState::new();
        let first = state.create_portfolio(draft("one", ""));
        let second = state.create_portfolio(draft("two", ""));
        assert!(second.id.0 > first.id.0);
    }

    #[test]
    fn editing_preserves_id_and_author() {
        let mut state = PlatformState::new();
        let created = state.create_portfolio(draft("before", "rust"));

        state.profile.name = "someone else".to_string();
        let updated = state
            .update_portfolio(
                created.id,
                PortfolioDraft {
                    title: "after".to_string(),
                    description: "new desc".to_string(),
                    category: PortfolioCategory::Design,
                    tags: "figma".to_string(),
                },
            )
            .expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.author, created.author);
        assert_eq!(updated.title, "after");
        assert_eq!(updated.category, PortfolioCategory::Design);
        assert_eq!(updated.tags, vec!["figma"]);
    }

    #[test]
    fn updating_missing_portfolio_is_not_found() {
        let mut state = PlatformState::new();
        let err = state
            .update_portfolio(PortfolioId(999), draft("x", ""))
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn deleting_missing_certificate_is_not_found() {
        let mut state = PlatformState::new();
        let err = state.delete_certificate(CertificateId(404)).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn verification_is_a_noop_for_deleted_records() {
        let mut state = PlatformState::new();
        let cert = state.create_certificate(CertificateDraft {
            name: "cert".to_string(),
            issuer: "issuer".to_string(),
            acquired_on: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            number: "C-1".to_string(),
        });
        state.delete_certificate(cert.id).expect("delete");
        assert!(state.mark_certificate_verified(cert.id).is_none());
    }

    #[test]
    fn verification_never_fires_twice() {
        let mut state = PlatformState::new();
        let cert = state.create_certificate(CertificateDraft {
            name: "cert".to_string(),
            issuer: "issuer".to_string(),
            acquired_on: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            number: "C-1".to_string(),
        });
        assert!(state.mark_certificate_verified(cert.id).is_some());
        assert!(state.mark_certificate_verified(cert.id).is_none());
    }

    #[test]
    fn stats_count_only_verified_certificates() {
        let mut state = PlatformState::new();
        crate::sample::populate(&mut state);
        let pending = state.create_certificate(CertificateDraft {
            name: "new cert".to_string(),
            issuer: "issuer".to_string(),
            acquired_on: NaiveDate::from_ymd_opt(2024, 3, 1).expect("date"),
            number: "C-2".to_string(),
        });

        let stats = state.stats();
        assert_eq!(stats.total_users, state.peers.len() + 1);
        assert_eq!(stats.verified_certificates, 1);
        assert_eq!(
            state
                .certificates
                .iter()
                .find(|c| c.id == pending.id)
                .map(|c| c.status),
            Some(CertificateStatus::Pending)
        );
    }

    #[test]
    fn negative_reviews_never_drive_reputation_below_zero() {
        let mut state = PlatformState::new();
        state.profile.reputation = 2;
        state.append_review(LOCAL_PROFILE_ID, ReviewRating::Negative, "별로".to_string());
        assert_eq!(state.profile.reputation, 0);
        assert_eq!(state.profile.negative_reviews, 1);

        state.append_review(LOCAL_PROFILE_ID, ReviewRating::Negative, "별로".to_string());
        assert_eq!(state.profile.reputation, 0);
        assert_eq!(state.profile.negative_reviews, 2);
    }

    #[test]
    fn positive_review_of_profile_adds_five() {
        let mut state = PlatformState::new();
        state.append_review(LOCAL_PROFILE_ID, ReviewRating::Positive, "좋아요".to_string());
        assert_eq!(state.profile.reputation, 5);
        assert_eq!(state.profile.positive_reviews, 1);
    }

    #[test]
    fn peer_review_does_not_touch_profile_counters() {
        let mut state = PlatformState::new();
        crate::sample::populate(&mut state);
        let peer_id = state.peers[0].id;
        state.append_review(peer_id, ReviewRating::Positive, "수고하셨습니다".to_string());
        assert_eq!(state.profile.reputation, 0);
        assert_eq!(state.profile.positive_reviews, 0);
        assert_eq!(
            state
                .reviews
                .iter()
                .filter(|r| r.target_user_id == peer_id)
                .count(),
            2
        );
    }

    #[test]
    fn search_matches_name_or_title_case_insensitively() {
        let mut state = PlatformState::new();
        crate::sample::populate(&mut state);

        let by_name = state.search_peers("영희");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "이영희");

        let by_title = state.search_peers("ui/ux");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].name, "이영희");

        assert!(state.search_peers("없는사람").is_empty());
    }

    #[test]
    fn sort_by_reputation_is_descending() {
        let mut state = PlatformState::new();
        crate::sample::populate(&mut state);
        let sorted = state.sorted_peers(PeerSortKey::Reputation);
        let scores: Vec<u32> = sorted.iter().map(|peer| peer.reputation).collect();
        assert_eq!(scores, vec![92, 85]);
    }

    #[test]
    fn sort_keys_cover_name_and_certificates() {
        let mut state = PlatformState::new();
        crate::sample::populate(&mut state);

        let by_name = state.sorted_peers(PeerSortKey::Name);
        assert_eq!(by_name[0].name, "김철수");

        let by_certs = state.sorted_peers(PeerSortKey::Certificates);
        assert!(by_certs[0].certificate_count >= by_certs[1].certificate_count);
    }

    #[test]
    fn deleting_presented_portfolio_closes_the_player() {
        let mut state = PlatformState::new();
        let item = state.create_portfolio(draft("talk", "rust"));
        state.start_presentation(item.id).expect("start");
        assert!(state.presentation.current().is_some());

        state.delete_portfolio(item.id).expect("delete");
        assert!(state.presentation.current().is_none());
    }

    #[test]
    fn sample_fixtures_keep_id_minting_monotonic() {
        let mut state = PlatformState::new();
        crate::sample::populate(&mut state);
        let existing_max = state.portfolios.iter().map(|p| p.id.0).max().expect("max");
        let created = state.create_portfolio(draft("fresh", ""));
        assert!(created.id.0 > existing_max);
    }
}
