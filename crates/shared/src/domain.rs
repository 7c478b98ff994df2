use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(UserId);
id_newtype!(PortfolioId);
id_newtype!(CertificateId);
id_newtype!(ReviewId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortfolioCategory {
    Web,
    Mobile,
    Design,
    Marketing,
    Other,
}

impl PortfolioCategory {
    pub const ALL: [PortfolioCategory; 5] = [
        PortfolioCategory::Web,
        PortfolioCategory::Mobile,
        PortfolioCategory::Design,
        PortfolioCategory::Marketing,
        PortfolioCategory::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            PortfolioCategory::Web => "web",
            PortfolioCategory::Mobile => "mobile",
            PortfolioCategory::Design => "design",
            PortfolioCategory::Marketing => "marketing",
            PortfolioCategory::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PortfolioCategory::Web => "웹 개발",
            PortfolioCategory::Mobile => "모바일 앱",
            PortfolioCategory::Design => "디자인",
            PortfolioCategory::Marketing => "마케팅",
            PortfolioCategory::Other => "기타",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.code() == code)
    }
}

/// Display label for a raw category code. Unknown codes render as-is.
pub fn category_label(code: &str) -> Cow<'_, str> {
    match PortfolioCategory::from_code(code) {
        Some(category) => Cow::Borrowed(category.label()),
        None => Cow::Borrowed(code),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    Pending,
    Verified,
}

impl CertificateStatus {
    pub fn label(self) -> &'static str {
        match self {
            CertificateStatus::Pending => "검토중",
            CertificateStatus::Verified => "인증완료",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewRating {
    Positive,
    Negative,
}

impl ReviewRating {
    pub fn label(self) -> &'static str {
        match self {
            ReviewRating::Positive => "긍정적 평가",
            ReviewRating::Negative => "부정적 평가",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub name: String,
    pub title: String,
    pub bio: String,
    pub contact: String,
    pub reputation: u32,
    pub positive_reviews: u32,
    pub negative_reviews: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: PortfolioId,
    pub title: String,
    pub description: String,
    pub category: PortfolioCategory,
    pub tags: Vec<String>,
    pub author: String,
    pub created_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: CertificateId,
    pub name: String,
    pub issuer: String,
    pub acquired_on: NaiveDate,
    pub number: String,
    pub status: CertificateStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerUser {
    pub id: UserId,
    pub name: String,
    pub title: String,
    pub reputation: u32,
    // Display counters shown on the user card. Not derived from owned
    // collections; the source data never reconciles them.
    pub certificate_count: u32,
    pub portfolio_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub target_user_id: UserId,
    pub reviewer_name: String,
    pub rating: ReviewRating,
    pub comment: String,
    pub written_on: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_round_trip() {
        for category in PortfolioCategory::ALL {
            assert_eq!(
                PortfolioCategory::from_code(category.code()),
                Some(category)
            );
        }
    }

    #[test]
    fn known_category_code_maps_to_display_label() {
        assert_eq!(category_label("web"), "웹 개발");
        assert_eq!(category_label("other"), "기타");
    }

    #[test]
    fn unknown_category_code_passes_through_unchanged() {
        assert_eq!(category_label("blockchain"), "blockchain");
        assert_eq!(category_label(""), "");
    }
}
