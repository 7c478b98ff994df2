//! Ephemeral slide decks derived from a single portfolio item.

use serde::{Deserialize, Serialize};
use shared::domain::{PortfolioId, PortfolioItem};

pub const SLIDES_PER_DECK: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDeck {
    pub portfolio_id: PortfolioId,
    pub title: String,
    pub slides: Vec<Slide>,
}

impl SlideDeck {
    /// Always four slides: overview, metadata, tags, full description.
    pub fn build(item: &PortfolioItem) -> Self {
        let slides = vec![
            Slide {
                title: item.title.clone(),
                body: item.description.clone(),
            },
            Slide {
                title: "프로젝트 개요".to_string(),
                body: format!(
                    "카테고리: {}\n작성자: {}\n작성일: {}",
                    item.category.label(),
                    item.author,
                    item.created_on
                ),
            },
            Slide {
                title: "사용 기술".to_string(),
                body: item.tags.join(", "),
            },
            Slide {
                title: "프로젝트 상세 설명".to_string(),
                body: item.description.clone(),
            },
        ];
        Self {
            portfolio_id: item.id,
            title: item.title.clone(),
            slides,
        }
    }
}

/// `Closed` until a deck is started; the deck is discarded on close and
/// never retained across sessions.
#[derive(Debug, Clone, Default)]
pub enum PresentationPlayer {
    #[default]
    Closed,
    Viewing {
        deck: SlideDeck,
        index: usize,
    },
}

impl PresentationPlayer {
    pub fn start(&mut self, deck: SlideDeck) {
        *self = PresentationPlayer::Viewing { deck, index: 0 };
    }

    pub fn close(&mut self) {
        *self = PresentationPlayer::Closed;
    }

    pub fn portfolio_id(&self) -> Option<PortfolioId> {
        match self {
            PresentationPlayer::Closed => None,
            PresentationPlayer::Viewing { deck, .. } => Some(deck.portfolio_id),
        }
    }

    /// Clamped at the last slide; returns whether the index moved.
    pub fn next(&mut self) -> bool {
        match self {
            PresentationPlayer::Viewing { deck, index } if *index + 1 < deck.slides.len() => {
                *index += 1;
                true
            }
            _ => false,
        }
    }

    /// Clamped at the first slide; returns whether the index moved.
    pub fn previous(&mut self) -> bool {
        match self {
            PresentationPlayer::Viewing { index, .. } if *index > 0 => {
                *index -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn at_first(&self) -> bool {
        matches!(self, PresentationPlayer::Viewing { index: 0, .. })
    }

    pub fn at_last(&self) -> bool {
        match self {
            PresentationPlayer::Viewing { deck, index } => *index + 1 == deck.slides.len(),
            PresentationPlayer::Closed => false,
        }
    }

    pub fn current(&self) -> Option<(&SlideDeck, &Slide, usize)> {
        match self {
            PresentationPlayer::Closed => None,
            PresentationPlayer::Viewing { deck, index } => {
                deck.slides.get(*index).map(|slide| (deck, slide, *index))
            }
        }
    }

    pub fn counter_text(&self) -> Option<String> {
        self.current()
            .map(|(deck, _, index)| format!("{} / {}", index + 1, deck.slides.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::domain::PortfolioCategory;

    fn item() -> PortfolioItem {
        PortfolioItem {
            id: PortfolioId(7),
            title: "발표 자료".to_string(),
            description: "프로젝트 설명".to_string(),
            category: PortfolioCategory::Web,
            tags: vec!["React".to_string(), "CSS".to_string()],
            author: "사용자".to_string(),
            created_on: NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"),
        }
    }

    #[test]
    fn deck_always_has_four_slides() {
        let deck = SlideDeck::build(&item());
        assert_eq!(deck.slides.len(), SLIDES_PER_DECK);

        let mut empty_tags = item();
        empty_tags.tags.clear();
        assert_eq!(SlideDeck::build(&empty_tags).slides.len(), SLIDES_PER_DECK);
    }

    #[test]
    fn metadata_slide_uses_category_label() {
        let deck = SlideDeck::build(&item());
        assert!(deck.slides[1].body.contains("웹 개발"));
        assert!(deck.slides[1].body.contains("사용자"));
    }

    #[test]
    fn next_clamps_at_last_slide() {
        let mut player = PresentationPlayer::default();
        player.start(SlideDeck::build(&item()));

        assert!(player.at_first());
        assert!(player.next());
        assert!(player.next());
        assert!(player.next());
        assert!(player.at_last());
        // Further next calls are no-ops.
        assert!(!player.next());
        assert_eq!(player.counter_text().as_deref(), Some("4 / 4"));
    }

    #[test]
    fn previous_clamps_at_first_slide() {
        let mut player = PresentationPlayer::default();
        player.start(SlideDeck::build(&item()));

        assert!(!player.previous());
        assert_eq!(player.counter_text().as_deref(), Some("1 / 4"));
        assert!(player.next());
        assert!(player.previous());
        assert!(player.at_first());
    }

    #[test]
    fn close_discards_the_deck() {
        let mut player = PresentationPlayer::default();
        player.start(SlideDeck::build(&item()));
        player.close();
        assert!(player.current().is_none());
        assert!(player.counter_text().is_none());
    }
}
