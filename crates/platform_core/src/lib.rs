use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use shared::domain::{
    Certificate, CertificateId, PeerUser, PortfolioId, PortfolioItem, Profile, Review,
    ReviewRating, UserId,
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::info;

pub mod config;
pub mod drift;
pub mod error;
pub mod presentation;
pub mod render;
pub mod reputation;
pub mod sample;
pub mod store;
mod verification;

use crate::config::Settings;
use crate::error::CoreError;
use crate::presentation::Slide;
use crate::store::{CertificateDraft, PlatformState, PlatformStats, PortfolioDraft, ProfileEdit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Success,
    Warning,
}

/// Immutable copy of the domain state handed to renderers and the UI.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    pub profile: Profile,
    pub portfolios: Vec<PortfolioItem>,
    pub certificates: Vec<Certificate>,
    pub peers: Vec<PeerUser>,
    pub reviews: Vec<Review>,
    pub stats: PlatformStats,
}

impl StateSnapshot {
    pub(crate) fn capture(state: &PlatformState) -> Self {
        Self {
            profile: state.profile.clone(),
            portfolios: state.portfolios.clone(),
            certificates: state.certificates.clone(),
            peers: state.peers.clone(),
            reviews: state.reviews.clone(),
            stats: state.stats(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PresentationView {
    pub portfolio_id: PortfolioId,
    pub title: String,
    pub slide: Slide,
    pub index: usize,
    pub total: usize,
    pub at_first: bool,
    pub at_last: bool,
    pub counter: String,
}

fn presentation_view(state: &PlatformState) -> Option<PresentationView> {
    let (deck, slide, index) = state.presentation.current()?;
    Some(PresentationView {
        portfolio_id: deck.portfolio_id,
        title: deck.title.clone(),
        slide: slide.clone(),
        index,
        total: deck.slides.len(),
        at_first: state.presentation.at_first(),
        at_last: state.presentation.at_last(),
        counter: state.presentation.counter_text().unwrap_or_default(),
    })
}

#[derive(Debug, Clone)]
pub enum CoreEvent {
    StateRefreshed(StateSnapshot),
    PresentationChanged(Option<PresentationView>),
    CertificateVerified { id: CertificateId, name: String },
    ReputationDrifted { score: u32 },
    Alert {
        severity: AlertSeverity,
        message: String,
    },
}

pub struct PlatformCore {
    settings: Settings,
    state: Mutex<PlatformState>,
    verification_tasks: Mutex<HashMap<CertificateId, JoinHandle<()>>>,
    drift_task: Mutex<Option<JoinHandle<()>>>,
    events: broadcast::Sender<CoreEvent>,
}

impl PlatformCore {
    pub fn new(settings: Settings) -> Arc<Self> {
        let (events, _) = broadcast::channel(1024);
        Arc::new(Self {
            settings,
            state: Mutex::new(PlatformState::new()),
            verification_tasks: Mutex::new(HashMap::new()),
            drift_task: Mutex::new(None),
            events,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CoreEvent> {
        self.events.subscribe()
    }

    fn emit_refresh(&self, state: &PlatformState) {
        let _ = self
            .events
            .send(CoreEvent::StateRefreshed(StateSnapshot::capture(state)));
    }

    fn emit_presentation(&self, state: &PlatformState) {
        let _ = self
            .events
            .send(CoreEvent::PresentationChanged(presentation_view(state)));
    }

    fn emit_alert(&self, severity: AlertSeverity, message: impl Into<String>) {
        let _ = self.events.send(CoreEvent::Alert {
            severity,
            message: message.into(),
        });
    }

    pub async fn snapshot(&self) -> StateSnapshot {
        let state = self.state.lock().await;
        StateSnapshot::capture(&state)
    }

    pub async fn presentation(&self) -> Option<PresentationView> {
        let state = self.state.lock().await;
        presentation_view(&state)
    }

    /// Resets the volatile state and seeds it with the built-in sample
    /// data, the same way a fresh launch starts.
    pub async fn load_sample_data(&self) {
        let mut state = self.state.lock().await;
        *state = PlatformState::new();
        sample::populate(&mut state);
        info!(
            portfolios = state.portfolios.len(),
            certificates = state.certificates.len(),
            peers = state.peers.len(),
            "sample data loaded"
        );
        self.emit_refresh(&state);
        self.emit_presentation(&state);
    }

    pub async fn create_portfolio(&self, draft: PortfolioDraft) -> Result<PortfolioItem, CoreError> {
        let mut state = self.state.lock().await;
        let item = state.create_portfolio(draft);
        info!(portfolio_id = item.id.0, title = %item.title, "portfolio created");
        self.emit_refresh(&state);
        self.emit_alert(AlertSeverity::Success, "포트폴리오가 성공적으로 저장되었습니다.");
        Ok(item)
    }

    pub async fn update_portfolio(
        &self,
        id: PortfolioId,
        draft: PortfolioDraft,
    ) -> Result<PortfolioItem, CoreError> {
        let mut state = self.state.lock().await;
        let item = state.update_portfolio(id, draft)?;
        info!(portfolio_id = id.0, "portfolio updated");
        self.emit_refresh(&state);
        self.emit_alert(AlertSeverity::Success, "포트폴리오가 성공적으로 저장되었습니다.");
        Ok(item)
    }

    pub async fn delete_portfolio(&self, id: PortfolioId) -> Result<(), CoreError> {
        let mut state = self.state.lock().await;
        state.delete_portfolio(id)?;
        info!(portfolio_id = id.0, "portfolio deleted");
        self.emit_refresh(&state);
        self.emit_presentation(&state);
        self.emit_alert(AlertSeverity::Success, "포트폴리오가 삭제되었습니다.");
        Ok(())
    }

    /// Appends the certificate as `Pending` and schedules the one-shot
    /// verification flip after the configured delay.
    pub async fn submit_certificate(
        self: &Arc<Self>,
        draft: CertificateDraft,
    ) -> Result<Certificate, CoreError> {
        let certificate = {
            let mut state = self.state.lock().await;
            let certificate = state.create_certificate(draft);
            self.emit_refresh(&state);
            certificate
        };
        info!(
            certificate_id = certificate.id.0,
            name = %certificate.name,
            "certificate submitted, verification scheduled"
        );

        let handle = self.spawn_verification_task(certificate.id);
        self.verification_tasks
            .lock()
            .await
            .insert(certificate.id, handle);

        self.emit_alert(
            AlertSeverity::Warning,
            "자격증 인증 요청이 제출되었습니다. 검토 중입니다...",
        );
        Ok(certificate)
    }

    pub async fn delete_certificate(&self, id: CertificateId) -> Result<(), CoreError> {
        {
            let mut state = self.state.lock().await;
            state.delete_certificate(id)?;
            self.emit_refresh(&state);
        }

        // The record is gone; a still-pending verification task for it
        // must not fire.
        if let Some(handle) = self.verification_tasks.lock().await.remove(&id) {
            handle.abort();
        }

        info!(certificate_id = id.0, "certificate deleted");
        self.emit_alert(AlertSeverity::Success, "자격증이 삭제되었습니다.");
        Ok(())
    }

    pub async fn update_profile(&self, edit: ProfileEdit) {
        let mut state = self.state.lock().await;
        state.update_profile(edit);
        info!(name = %state.profile.name, "profile updated");
        self.emit_refresh(&state);
        self.emit_alert(AlertSeverity::Success, "프로필이 성공적으로 업데이트되었습니다.");
    }

    /// Blocks submission until a rating has been selected; the UI keeps
    /// the selection as session state and passes it through.
    pub async fn submit_review(
        &self,
        target: UserId,
        rating: Option<ReviewRating>,
        comment: String,
    ) -> Result<Review, CoreError> {
        let rating = rating.ok_or(CoreError::RatingRequired)?;
        let mut state = self.state.lock().await;
        let review = state.append_review(target, rating, comment);
        info!(
            review_id = review.id.0,
            target_user_id = target.0,
            rating = ?rating,
            "review submitted"
        );
        self.emit_refresh(&state);
        self.emit_alert(AlertSeverity::Success, "평판이 성공적으로 등록되었습니다.");
        Ok(review)
    }

    pub async fn start_presentation(&self, id: PortfolioId) -> Result<(), CoreError> {
        let mut state = self.state.lock().await;
        state.start_presentation(id)?;
        info!(portfolio_id = id.0, "presentation started");
        self.emit_presentation(&state);
        Ok(())
    }

    pub async fn next_slide(&self) {
        let mut state = self.state.lock().await;
        if state.presentation.next() {
            self.emit_presentation(&state);
        }
    }

    pub async fn previous_slide(&self) {
        let mut state = self.state.lock().await;
        if state.presentation.previous() {
            self.emit_presentation(&state);
        }
    }

    pub async fn close_presentation(&self) {
        let mut state = self.state.lock().await;
        state.presentation.close();
        self.emit_presentation(&state);
    }
}

/// Seam between front ends and the core, mirroring every user operation.
#[async_trait]
pub trait PlatformHandle: Send + Sync {
    async fn load_sample_data(&self);
    async fn snapshot(&self) -> StateSnapshot;
    async fn create_portfolio(&self, draft: PortfolioDraft) -> Result<PortfolioItem, CoreError>;
    async fn update_portfolio(
        &self,
        id: PortfolioId,
        draft: PortfolioDraft,
    ) -> Result<PortfolioItem, CoreError>;
    async fn delete_portfolio(&self, id: PortfolioId) -> Result<(), CoreError>;
    async fn submit_certificate(&self, draft: CertificateDraft) -> Result<Certificate, CoreError>;
    async fn delete_certificate(&self, id: CertificateId) -> Result<(), CoreError>;
    async fn update_profile(&self, edit: ProfileEdit);
    async fn submit_review(
        &self,
        target: UserId,
        rating: Option<ReviewRating>,
        comment: String,
    ) -> Result<Review, CoreError>;
    async fn start_presentation(&self, id: PortfolioId) -> Result<(), CoreError>;
    async fn next_slide(&self);
    async fn previous_slide(&self);
    async fn close_presentation(&self);
    async fn start_ambient_drift(&self);
    fn subscribe_events(&self) -> broadcast::Receiver<CoreEvent>;
}

#[async_trait]
impl PlatformHandle for Arc<PlatformCore> {
    async fn load_sample_data(&self) {
        PlatformCore::load_sample_data(self).await;
    }

    async fn snapshot(&self) -> StateSnapshot {
        PlatformCore::snapshot(self).await
    }

    async fn create_portfolio(&self, draft: PortfolioDraft) -> Result<PortfolioItem, CoreError> {
        PlatformCore::create_portfolio(self, draft).await
    }

    async fn update_portfolio(
        &self,
        id: PortfolioId,
        draft: PortfolioDraft,
    ) -> Result<PortfolioItem, CoreError> {
        PlatformCore::update_portfolio(self, id, draft).await
    }

    async fn delete_portfolio(&self, id: PortfolioId) -> Result<(), CoreError> {
        PlatformCore::delete_portfolio(self, id).await
    }

    async fn submit_certificate(&self, draft: CertificateDraft) -> Result<Certificate, CoreError> {
        PlatformCore::submit_certificate(self, draft).await
    }

    async fn delete_certificate(&self, id: CertificateId) -> Result<(), CoreError> {
        PlatformCore::delete_certificate(self, id).await
    }

    async fn update_profile(&self, edit: ProfileEdit) {
        PlatformCore::update_profile(self, edit).await;
    }

    async fn submit_review(
        &self,
        target: UserId,
        rating: Option<ReviewRating>,
        comment: String,
    ) -> Result<Review, CoreError> {
        PlatformCore::submit_review(self, target, rating, comment).await
    }

    async fn start_presentation(&self, id: PortfolioId) -> Result<(), CoreError> {
        PlatformCore::start_presentation(self, id).await
    }

    async fn next_slide(&self) {
        PlatformCore::next_slide(self).await;
    }

    async fn previous_slide(&self) {
        PlatformCore::previous_slide(self).await;
    }

    async fn close_presentation(&self) {
        PlatformCore::close_presentation(self).await;
    }

    async fn start_ambient_drift(&self) {
        PlatformCore::start_ambient_drift(self).await;
    }

    fn subscribe_events(&self) -> broadcast::Receiver<CoreEvent> {
        PlatformCore::subscribe_events(self)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
