//! UI/backend events and error modeling for the desktop GUI controller.

use platform_core::{error::CoreError, AlertSeverity, PresentationView, StateSnapshot};
use shared::error::ErrorCode;

pub enum UiEvent {
    BackendReady,
    StateRefreshed(StateSnapshot),
    PresentationChanged(Option<PresentationView>),
    CertificateVerified { name: String },
    ReputationDrifted { score: u32 },
    Alert {
        severity: AlertSeverity,
        message: String,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    NotFound,
    Validation,
    Internal,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Portfolio,
    Certificate,
    Profile,
    Review,
    Presentation,
    General,
}

impl UiErrorContext {
    pub fn label(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => "백엔드 시작",
            UiErrorContext::Portfolio => "포트폴리오",
            UiErrorContext::Certificate => "자격증",
            UiErrorContext::Profile => "프로필",
            UiErrorContext::Review => "평판",
            UiErrorContext::Presentation => "프레젠테이션",
            UiErrorContext::General => "작업",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_core(context: UiErrorContext, err: &CoreError) -> Self {
        let category = match err.code() {
            ErrorCode::NotFound => UiErrorCategory::NotFound,
            ErrorCode::Validation => UiErrorCategory::Validation,
            ErrorCode::Conflict | ErrorCode::Internal => UiErrorCategory::Internal,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("not found") {
            UiErrorCategory::NotFound
        } else if lower.contains("invalid") || lower.contains("missing") || lower.contains("required")
        {
            UiErrorCategory::Validation
        } else if lower.contains("runtime") || lower.contains("startup") {
            UiErrorCategory::Internal
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status-line text shown to the user.
    pub fn status_text(&self) -> String {
        format!("{} 오류: {}", self.context.label(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_not_found_maps_to_not_found_category() {
        let err = CoreError::not_found("portfolio", 7);
        let ui = UiError::from_core(UiErrorContext::Portfolio, &err);
        assert_eq!(ui.category(), UiErrorCategory::NotFound);
        assert_eq!(ui.context(), UiErrorContext::Portfolio);
        assert_eq!(ui.message(), "portfolio 7 not found");
        assert!(ui.status_text().contains("포트폴리오"));
    }

    #[test]
    fn rating_required_maps_to_validation() {
        let ui = UiError::from_core(UiErrorContext::Review, &CoreError::RatingRequired);
        assert_eq!(ui.category(), UiErrorCategory::Validation);
        assert_eq!(ui.context(), UiErrorContext::Review);
    }

    #[test]
    fn startup_failures_classify_as_internal() {
        let ui = UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: failed to build runtime",
        );
        assert_eq!(ui.category(), UiErrorCategory::Internal);
    }
}
