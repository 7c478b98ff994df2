//! Commands queued from UI to the backend worker.

use platform_core::store::{CertificateDraft, PortfolioDraft, ProfileEdit};
use shared::domain::{CertificateId, PortfolioId, ReviewRating, UserId};

pub enum CoreCommand {
    LoadSampleData,
    CreatePortfolio {
        draft: PortfolioDraft,
    },
    UpdatePortfolio {
        id: PortfolioId,
        draft: PortfolioDraft,
    },
    DeletePortfolio {
        id: PortfolioId,
    },
    SubmitCertificate {
        draft: CertificateDraft,
    },
    DeleteCertificate {
        id: CertificateId,
    },
    UpdateProfile {
        edit: ProfileEdit,
    },
    SubmitReview {
        target: UserId,
        rating: Option<ReviewRating>,
        comment: String,
    },
    StartPresentation {
        id: PortfolioId,
    },
    NextSlide,
    PreviousSlide,
    ClosePresentation,
}
