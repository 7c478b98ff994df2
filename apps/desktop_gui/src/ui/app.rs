use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use platform_core::{
    render::Section,
    store::{self, CertificateDraft, PeerSortKey, PortfolioDraft, ProfileEdit},
    AlertSeverity, PresentationView, StateSnapshot,
};
use serde::{Deserialize, Serialize};
use shared::domain::{
    CertificateId, CertificateStatus, PeerUser, PortfolioCategory, PortfolioId, ReviewRating,
    UserId,
};
use shared::requirements;

use crate::backend_bridge::commands::CoreCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_core_command;

pub const SETTINGS_STORAGE_KEY: &str = "platform_desktop_settings";

const BANNER_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: AlertSeverity,
    message: String,
    raised_at: Instant,
}

impl StatusBanner {
    fn new(severity: AlertSeverity, message: String) -> Self {
        Self {
            severity,
            message,
            raised_at: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.raised_at.elapsed() > BANNER_LIFETIME
    }
}

#[derive(Debug, Clone)]
struct PortfolioFormState {
    edit_id: Option<PortfolioId>,
    title: String,
    description: String,
    category: PortfolioCategory,
    tags: String,
}

impl PortfolioFormState {
    fn blank() -> Self {
        Self {
            edit_id: None,
            title: String::new(),
            description: String::new(),
            category: PortfolioCategory::Web,
            tags: String::new(),
        }
    }

    fn for_edit(item: &shared::domain::PortfolioItem) -> Self {
        Self {
            edit_id: Some(item.id),
            title: item.title.clone(),
            description: item.description.clone(),
            category: item.category,
            tags: item.tags.join(", "),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct CertificateFormState {
    name: String,
    issuer: String,
    acquired_on: String,
    number: String,
    field_error: Option<String>,
}

/// Acquisition dates are typed as `YYYY-MM-DD`.
fn parse_acquired_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| "취득일자는 YYYY-MM-DD 형식으로 입력해주세요.".to_string())
}

#[derive(Debug, Clone, Default)]
struct ProfileFormState {
    name: String,
    title: String,
    bio: String,
    contact: String,
}

#[derive(Debug, Clone)]
struct ReviewFormState {
    target: UserId,
    target_name: String,
    selected_rating: Option<ReviewRating>,
    comment: String,
}

#[derive(Debug, Clone)]
enum PendingDelete {
    Portfolio { id: PortfolioId, title: String },
    Certificate { id: CertificateId, name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedUiSettings {
    pub text_scale: f32,
    pub compact_density: bool,
}

impl Default for PersistedUiSettings {
    fn default() -> Self {
        Self {
            text_scale: 1.0,
            compact_density: false,
        }
    }
}

/// Search filter then sort, both over the peer snapshot. `None` keeps
/// the stored order.
fn visible_peers(peers: &[PeerUser], query: &str, sort: Option<PeerSortKey>) -> Vec<PeerUser> {
    let filtered = if query.trim().is_empty() {
        peers.to_vec()
    } else {
        store::filter_peers(peers, query.trim())
    };
    match sort {
        Some(key) => store::sort_peers(&filtered, key),
        None => filtered,
    }
}

pub struct PlatformGuiApp {
    cmd_tx: Sender<CoreCommand>,
    ui_rx: Receiver<UiEvent>,

    snapshot: Option<StateSnapshot>,
    presentation: Option<PresentationView>,
    backend_ready: bool,

    active_section: Section,
    status: String,
    banner: Option<StatusBanner>,

    user_search: String,
    user_sort: Option<PeerSortKey>,
    requirements_track: String,

    portfolio_form: Option<PortfolioFormState>,
    certificate_form: Option<CertificateFormState>,
    profile_form: Option<ProfileFormState>,
    review_form: Option<ReviewFormState>,
    pending_delete: Option<PendingDelete>,

    settings_open: bool,
    ui_settings: PersistedUiSettings,
    applied_ui_settings: Option<PersistedUiSettings>,
}

impl PlatformGuiApp {
    pub fn new(
        cmd_tx: Sender<CoreCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted_settings: Option<PersistedUiSettings>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            snapshot: None,
            presentation: None,
            backend_ready: false,
            active_section: Section::Home,
            status: "백엔드 준비 중...".to_string(),
            banner: None,
            user_search: String::new(),
            user_sort: None,
            requirements_track: "web-design".to_string(),
            portfolio_form: None,
            certificate_form: None,
            profile_form: None,
            review_form: None,
            pending_delete: None,
            settings_open: false,
            ui_settings: persisted_settings.unwrap_or_default(),
            applied_ui_settings: None,
        }
    }

    fn queue(&mut self, cmd: CoreCommand) {
        dispatch_core_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady => {
                    self.backend_ready = true;
                    self.status = "준비 완료".to_string();
                }
                UiEvent::StateRefreshed(snapshot) => {
                    self.snapshot = Some(snapshot);
                }
                UiEvent::PresentationChanged(view) => {
                    self.presentation = view;
                }
                UiEvent::CertificateVerified { name } => {
                    self.status = format!("자격증 인증 완료: {name}");
                }
                UiEvent::ReputationDrifted { score } => {
                    self.status = format!("평판 점수 변동: {score}점");
                }
                UiEvent::Alert { severity, message } => {
                    self.status = message.clone();
                    self.banner = Some(StatusBanner::new(severity, message));
                }
                UiEvent::Error(err) => {
                    self.status = err.status_text();
                    self.banner = Some(StatusBanner::new(AlertSeverity::Warning, err.status_text()));
                }
            }
        }

        if self.banner.as_ref().is_some_and(StatusBanner::expired) {
            self.banner = None;
        }
    }

    fn apply_ui_settings_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_ui_settings == Some(self.ui_settings) {
            return;
        }

        let mut style = (*ctx.style()).clone();
        let scale = self.ui_settings.text_scale.clamp(0.8, 1.4);
        style.text_styles = egui::Style::default()
            .text_styles
            .into_iter()
            .map(|(text_style, mut font)| {
                font.size *= scale;
                (text_style, font)
            })
            .collect();

        if self.ui_settings.compact_density {
            style.spacing.item_spacing = egui::vec2(6.0, 4.0);
            style.spacing.button_padding = egui::vec2(8.0, 5.0);
        } else {
            style.spacing.item_spacing = egui::vec2(8.0, 6.0);
            style.spacing.button_padding = egui::vec2(10.0, 6.0);
        }
        ctx.set_style(style);
        self.applied_ui_settings = Some(self.ui_settings);
    }

    fn show_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.banner.clone() {
            let (fill, stroke) = match banner.severity {
                AlertSeverity::Success => (
                    egui::Color32::from_rgb(47, 92, 60),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(96, 175, 120)),
                ),
                AlertSeverity::Warning => (
                    egui::Color32::from_rgb(111, 86, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 146, 96)),
                ),
            };

            egui::Frame::none()
                .fill(fill)
                .stroke(stroke)
                .rounding(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("닫기").clicked() {
                                self.banner = None;
                            }
                        });
                    });
                });
        }
    }

    fn show_navigation(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("section_nav")
            .resizable(false)
            .default_width(140.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("포트폴리오 플랫폼");
                ui.separator();
                for section in Section::ALL {
                    if ui
                        .selectable_label(self.active_section == section, section.label())
                        .clicked()
                    {
                        self.active_section = section;
                    }
                }
                ui.separator();
                if ui.button("⚙ 설정").clicked() {
                    self.settings_open = true;
                }
                ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                    ui.add_space(6.0);
                    ui.small(&self.status);
                });
            });
    }

    fn show_home(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("홈");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("샘플 데이터로 초기화").clicked() {
                    self.queue(CoreCommand::LoadSampleData);
                }
            });
        });
        ui.add_space(8.0);
        let Some(snapshot) = &self.snapshot else {
            ui.label("데이터를 불러오는 중입니다...");
            return;
        };
        let stats = snapshot.stats;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(format!("전체 사용자: {}", stats.total_users));
            ui.label(format!("등록된 포트폴리오: {}", stats.total_portfolios));
            ui.label(format!("인증된 자격증: {}", stats.verified_certificates));
        });
    }

    fn show_portfolios(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("포트폴리오");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("포트폴리오 추가").clicked() {
                    self.portfolio_form = Some(PortfolioFormState::blank());
                }
            });
        });
        ui.add_space(6.0);

        let items = match &self.snapshot {
            Some(snapshot) => snapshot.portfolios.clone(),
            None => Vec::new(),
        };
        if items.is_empty() {
            ui.label("등록된 포트폴리오가 없습니다.");
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for item in &items {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.strong(&item.title);
                        ui.small(item.category.label());
                    });
                    ui.label(&item.description);
                    if !item.tags.is_empty() {
                        ui.small(format!("태그: {}", item.tags.join(", ")));
                    }
                    ui.small(format!("{} · {}", item.author, item.created_on));
                    ui.horizontal(|ui| {
                        if ui.button("프레젠테이션").clicked() {
                            self.queue(CoreCommand::StartPresentation { id: item.id });
                        }
                        if ui.button("수정").clicked() {
                            self.portfolio_form = Some(PortfolioFormState::for_edit(item));
                        }
                        if ui.button("삭제").clicked() {
                            self.pending_delete = Some(PendingDelete::Portfolio {
                                id: item.id,
                                title: item.title.clone(),
                            });
                        }
                    });
                });
                ui.add_space(4.0);
            }
        });
    }

    fn show_certificates(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("자격증");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("자격증 추가").clicked() {
                    self.certificate_form = Some(CertificateFormState::default());
                }
            });
        });
        ui.add_space(6.0);

        let certificates = match &self.snapshot {
            Some(snapshot) => snapshot.certificates.clone(),
            None => Vec::new(),
        };

        if certificates.is_empty() {
            ui.label("등록된 자격증이 없습니다.");
        } else {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for cert in &certificates {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.strong(&cert.name);
                            let badge = match cert.status {
                                CertificateStatus::Verified => egui::RichText::new("인증완료")
                                    .color(egui::Color32::from_rgb(96, 175, 120)),
                                CertificateStatus::Pending => egui::RichText::new("검토중")
                                    .color(egui::Color32::from_rgb(222, 184, 96)),
                            };
                            ui.label(badge);
                        });
                        ui.small(format!("발급기관: {}", cert.issuer));
                        ui.small(format!("취득일자: {}", cert.acquired_on));
                        ui.small(format!("자격증 번호: {}", cert.number));
                        match cert.status {
                            CertificateStatus::Verified => {
                                if ui.button("삭제").clicked() {
                                    self.pending_delete = Some(PendingDelete::Certificate {
                                        id: cert.id,
                                        name: cert.name.clone(),
                                    });
                                }
                            }
                            CertificateStatus::Pending => {
                                ui.weak("인증 처리 중입니다...");
                            }
                        }
                    });
                    ui.add_space(4.0);
                }
            });
        }

        ui.add_space(8.0);
        egui::CollapsingHeader::new("자격 요건 안내").show(ui, |ui| {
            egui::ComboBox::from_id_source("requirements_track")
                .selected_text(self.requirements_track.clone())
                .show_ui(ui, |ui| {
                    for track in ["web-design", "network", "database", "기타"] {
                        ui.selectable_value(
                            &mut self.requirements_track,
                            track.to_string(),
                            track,
                        );
                    }
                });
            let reqs = requirements::requirements_for(&self.requirements_track);
            ui.label(format!("학력: {}", reqs.education));
            ui.label(format!("경력: {}", reqs.experience));
            ui.label(format!("필수 과목: {}", reqs.courses.join(", ")));
            ui.label(format!("응시료: {}", reqs.exam_fee));
        });
    }

    fn show_users(&mut self, ui: &mut egui::Ui) {
        ui.heading("사용자");
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label("검색:");
            ui.add(
                egui::TextEdit::singleline(&mut self.user_search)
                    .hint_text("이름 또는 직함")
                    .desired_width(200.0),
            );
            ui.label("정렬:");
            let sort_label = match self.user_sort {
                None => "기본",
                Some(PeerSortKey::Name) => "이름",
                Some(PeerSortKey::Reputation) => "평판",
                Some(PeerSortKey::Certificates) => "자격증",
            };
            egui::ComboBox::from_id_source("user_sort")
                .selected_text(sort_label)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.user_sort, None, "기본");
                    ui.selectable_value(&mut self.user_sort, Some(PeerSortKey::Name), "이름");
                    ui.selectable_value(&mut self.user_sort, Some(PeerSortKey::Reputation), "평판");
                    ui.selectable_value(
                        &mut self.user_sort,
                        Some(PeerSortKey::Certificates),
                        "자격증",
                    );
                });
        });
        ui.add_space(6.0);

        let peers = match &self.snapshot {
            Some(snapshot) => visible_peers(&snapshot.peers, &self.user_search, self.user_sort),
            None => Vec::new(),
        };
        if peers.is_empty() {
            ui.label("검색 결과가 없습니다.");
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for peer in &peers {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.strong(&peer.name);
                    ui.small(&peer.title);
                    ui.label(format!("평판: {}점", peer.reputation));
                    ui.small(format!(
                        "자격증 {}개 | 포트폴리오 {}개",
                        peer.certificate_count, peer.portfolio_count
                    ));
                    if ui.button("평판 남기기").clicked() {
                        self.review_form = Some(ReviewFormState {
                            target: peer.id,
                            target_name: peer.name.clone(),
                            selected_rating: None,
                            comment: String::new(),
                        });
                    }
                });
                ui.add_space(4.0);
            }
        });
    }

    fn show_profile(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("프로필");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("프로필 수정").clicked() {
                    if let Some(snapshot) = &self.snapshot {
                        self.profile_form = Some(ProfileFormState {
                            name: snapshot.profile.name.clone(),
                            title: snapshot.profile.title.clone(),
                            bio: snapshot.profile.bio.clone(),
                            contact: snapshot.profile.contact.clone(),
                        });
                    }
                }
            });
        });
        ui.add_space(6.0);

        let Some(snapshot) = &self.snapshot else {
            ui.label("데이터를 불러오는 중입니다...");
            return;
        };
        let profile = &snapshot.profile;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(&profile.name);
            ui.label(&profile.title);
            ui.label(&profile.bio);
            ui.small(format!("연락처: {}", profile.contact));
        });

        ui.add_space(8.0);
        ui.label("인증된 자격증");
        let badges: Vec<String> = snapshot
            .certificates
            .iter()
            .filter(|cert| cert.status == CertificateStatus::Verified)
            .map(|cert| cert.name.clone())
            .collect();
        if badges.is_empty() {
            ui.weak("인증된 자격증이 없습니다.");
        } else {
            ui.horizontal_wrapped(|ui| {
                for badge in badges {
                    ui.small(egui::RichText::new(badge).strong());
                }
            });
        }
    }

    fn show_reputation(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("평판");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // Demo path for incoming reviews of the local profile.
                if ui.button("평판 남기기").clicked() {
                    if let Some(snapshot) = &self.snapshot {
                        self.review_form = Some(ReviewFormState {
                            target: snapshot.profile.id,
                            target_name: snapshot.profile.name.clone(),
                            selected_rating: None,
                            comment: String::new(),
                        });
                    }
                }
            });
        });
        ui.add_space(6.0);

        let Some(snapshot) = &self.snapshot else {
            ui.label("데이터를 불러오는 중입니다...");
            return;
        };
        let profile = &snapshot.profile;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(format!("평판 점수: {}점", profile.reputation));
            ui.small(format!(
                "긍정적 평가 {} | 부정적 평가 {}",
                profile.positive_reviews, profile.negative_reviews
            ));
        });

        ui.add_space(8.0);
        let reviews: Vec<_> = snapshot
            .reviews
            .iter()
            .filter(|review| review.target_user_id == profile.id)
            .cloned()
            .collect();
        if reviews.is_empty() {
            ui.weak("아직 평판이 없습니다.");
            return;
        }
        egui::ScrollArea::vertical().show(ui, |ui| {
            for review in &reviews {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.strong(&review.reviewer_name);
                        ui.small(review.written_on.to_string());
                    });
                    ui.label(&review.comment);
                    ui.small(review.rating.label());
                });
                ui.add_space(4.0);
            }
        });
    }

    fn show_portfolio_form(&mut self, ctx: &egui::Context) {
        let Some(mut form) = self.portfolio_form.take() else {
            return;
        };
        let title = if form.edit_id.is_some() {
            "포트폴리오 수정"
        } else {
            "포트폴리오 추가"
        };

        let mut keep_open = true;
        let mut submitted = false;
        let mut cancelled = false;
        egui::Window::new(title)
            .open(&mut keep_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("제목");
                ui.text_edit_singleline(&mut form.title);
                ui.label("설명");
                ui.text_edit_multiline(&mut form.description);
                ui.label("카테고리");
                egui::ComboBox::from_id_source("portfolio_category")
                    .selected_text(form.category.label())
                    .show_ui(ui, |ui| {
                        for category in PortfolioCategory::ALL {
                            ui.selectable_value(&mut form.category, category, category.label());
                        }
                    });
                ui.label("태그 (쉼표로 구분)");
                ui.text_edit_singleline(&mut form.tags);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("저장").clicked() {
                        submitted = true;
                    }
                    if ui.button("취소").clicked() {
                        cancelled = true;
                    }
                });
            });

        if submitted {
            let draft = PortfolioDraft {
                title: form.title.trim().to_string(),
                description: form.description.trim().to_string(),
                category: form.category,
                tags: form.tags.clone(),
            };
            match form.edit_id {
                Some(id) => self.queue(CoreCommand::UpdatePortfolio { id, draft }),
                None => self.queue(CoreCommand::CreatePortfolio { draft }),
            }
        } else if keep_open && !cancelled {
            self.portfolio_form = Some(form);
        }
    }

    fn show_certificate_form(&mut self, ctx: &egui::Context) {
        let Some(mut form) = self.certificate_form.take() else {
            return;
        };

        let mut keep_open = true;
        let mut submitted = false;
        let mut cancelled = false;
        egui::Window::new("자격증 추가")
            .open(&mut keep_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("자격증 이름");
                ui.text_edit_singleline(&mut form.name);
                ui.label("발급기관");
                ui.text_edit_singleline(&mut form.issuer);
                ui.label("취득일자 (YYYY-MM-DD)");
                ui.text_edit_singleline(&mut form.acquired_on);
                ui.label("자격증 번호");
                ui.text_edit_singleline(&mut form.number);
                if let Some(error) = &form.field_error {
                    ui.colored_label(egui::Color32::from_rgb(222, 120, 120), error);
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("인증 요청").clicked() {
                        submitted = true;
                    }
                    if ui.button("취소").clicked() {
                        cancelled = true;
                    }
                });
            });

        if submitted {
            match parse_acquired_date(&form.acquired_on) {
                Ok(acquired_on) => {
                    self.queue(CoreCommand::SubmitCertificate {
                        draft: CertificateDraft {
                            name: form.name.trim().to_string(),
                            issuer: form.issuer.trim().to_string(),
                            acquired_on,
                            number: form.number.trim().to_string(),
                        },
                    });
                }
                Err(message) => {
                    form.field_error = Some(message);
                    self.certificate_form = Some(form);
                }
            }
        } else if keep_open && !cancelled {
            self.certificate_form = Some(form);
        }
    }

    fn show_profile_form(&mut self, ctx: &egui::Context) {
        let Some(mut form) = self.profile_form.take() else {
            return;
        };

        let mut keep_open = true;
        let mut submitted = false;
        let mut cancelled = false;
        egui::Window::new("프로필 수정")
            .open(&mut keep_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("이름");
                ui.text_edit_singleline(&mut form.name);
                ui.label("직업/직책");
                ui.text_edit_singleline(&mut form.title);
                ui.label("자기소개");
                ui.text_edit_multiline(&mut form.bio);
                ui.label("연락처");
                ui.text_edit_singleline(&mut form.contact);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("저장").clicked() {
                        submitted = true;
                    }
                    if ui.button("취소").clicked() {
                        cancelled = true;
                    }
                });
            });

        if submitted {
            self.queue(CoreCommand::UpdateProfile {
                edit: ProfileEdit {
                    name: form.name.trim().to_string(),
                    title: form.title.trim().to_string(),
                    bio: form.bio.trim().to_string(),
                    contact: form.contact.trim().to_string(),
                },
            });
        } else if keep_open && !cancelled {
            self.profile_form = Some(form);
        }
    }

    fn show_review_form(&mut self, ctx: &egui::Context) {
        let Some(mut form) = self.review_form.take() else {
            return;
        };

        let mut keep_open = true;
        let mut submitted = false;
        let mut cancelled = false;
        let mut rating_missing = false;
        egui::Window::new(format!("{} 님에게 평판 남기기", form.target_name))
            .open(&mut keep_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("평가");
                ui.horizontal(|ui| {
                    let positive = form.selected_rating == Some(ReviewRating::Positive);
                    if ui.selectable_label(positive, "긍정적 평가").clicked() {
                        form.selected_rating = Some(ReviewRating::Positive);
                    }
                    let negative = form.selected_rating == Some(ReviewRating::Negative);
                    if ui.selectable_label(negative, "부정적 평가").clicked() {
                        form.selected_rating = Some(ReviewRating::Negative);
                    }
                });
                ui.label("코멘트");
                ui.text_edit_multiline(&mut form.comment);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("등록").clicked() {
                        if form.selected_rating.is_none() {
                            rating_missing = true;
                        } else {
                            submitted = true;
                        }
                    }
                    if ui.button("취소").clicked() {
                        cancelled = true;
                    }
                });
            });

        if submitted {
            self.queue(CoreCommand::SubmitReview {
                target: form.target,
                rating: form.selected_rating,
                comment: form.comment.trim().to_string(),
            });
        } else if keep_open && !cancelled {
            if rating_missing {
                self.status = "평가를 선택해주세요.".to_string();
            }
            self.review_form = Some(form);
        }
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };

        let message = match &pending {
            PendingDelete::Portfolio { title, .. } => {
                format!("정말로 포트폴리오 '{title}'을(를) 삭제하시겠습니까?")
            }
            PendingDelete::Certificate { name, .. } => {
                format!("정말로 자격증 '{name}'을(를) 삭제하시겠습니까?")
            }
        };

        let mut keep_open = true;
        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("삭제 확인")
            .open(&mut keep_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("삭제").clicked() {
                        confirmed = true;
                    }
                    if ui.button("취소").clicked() {
                        cancelled = true;
                    }
                });
            });

        if confirmed {
            match pending {
                PendingDelete::Portfolio { id, .. } => {
                    self.queue(CoreCommand::DeletePortfolio { id });
                }
                PendingDelete::Certificate { id, .. } => {
                    self.queue(CoreCommand::DeleteCertificate { id });
                }
            }
        } else if keep_open && !cancelled {
            self.pending_delete = Some(pending);
        }
    }

    fn show_presentation(&mut self, ctx: &egui::Context) {
        let Some(view) = self.presentation.clone() else {
            return;
        };

        let mut keep_open = true;
        let mut action = None;
        egui::Window::new(format!("프레젠테이션 — {}", view.title))
            .open(&mut keep_open)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading(&view.slide.title);
                ui.separator();
                ui.label(&view.slide.body);
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.add_enabled(!view.at_first, egui::Button::new("◀ 이전")).clicked() {
                        action = Some(CoreCommand::PreviousSlide);
                    }
                    ui.label(&view.counter);
                    if ui.add_enabled(!view.at_last, egui::Button::new("다음 ▶")).clicked() {
                        action = Some(CoreCommand::NextSlide);
                    }
                });
            });

        if let Some(cmd) = action {
            self.queue(cmd);
        }
        if !keep_open {
            self.queue(CoreCommand::ClosePresentation);
        }
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        egui::Window::new("설정")
            .open(&mut self.settings_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add(
                    egui::Slider::new(&mut self.ui_settings.text_scale, 0.8..=1.4)
                        .text("글자 크기")
                        .step_by(0.05),
                );
                ui.checkbox(&mut self.ui_settings.compact_density, "좁은 간격");
            });
    }
}

impl eframe::App for PlatformGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_ui_settings_if_needed(ctx);

        self.show_navigation(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_banner(ui);
            ui.add_space(4.0);
            if !self.backend_ready {
                ui.label("백엔드 준비 중...");
            }
            match self.active_section {
                Section::Home => self.show_home(ui),
                Section::Portfolios => self.show_portfolios(ui),
                Section::Certificates => self.show_certificates(ui),
                Section::Users => self.show_users(ui),
                Section::Profile => self.show_profile(ui),
                Section::Reputation => self.show_reputation(ui),
            }
        });

        self.show_portfolio_form(ctx);
        self.show_certificate_form(ctx);
        self.show_profile_form(ctx);
        self.show_review_form(ctx);
        self.show_delete_confirmation(ctx);
        self.show_presentation(ctx);
        self.show_settings_window(ctx);

        // Deferred core events (verification, drift) arrive off-frame.
        ctx.request_repaint_after(Duration::from_millis(250));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(text) = serde_json::to_string(&self.ui_settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(id: i64, name: &str, title: &str, reputation: u32, certs: u32) -> PeerUser {
        PeerUser {
            id: UserId(id),
            name: name.to_string(),
            title: title.to_string(),
            reputation,
            certificate_count: certs,
            portfolio_count: 0,
        }
    }

    #[test]
    fn visible_peers_filters_before_sorting() {
        let peers = vec![
            peer(2, "김철수", "웹 개발자", 85, 3),
            peer(3, "이영희", "UI/UX 디자이너", 92, 2),
        ];

        let visible = visible_peers(&peers, "영희", Some(PeerSortKey::Reputation));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "이영희");

        let all_sorted = visible_peers(&peers, "", Some(PeerSortKey::Reputation));
        assert_eq!(all_sorted[0].reputation, 92);

        let untouched = visible_peers(&peers, "", None);
        assert_eq!(untouched[0].name, "김철수");
    }

    #[test]
    fn acquired_date_parsing_rejects_malformed_input() {
        assert!(parse_acquired_date("2024-02-01").is_ok());
        assert!(parse_acquired_date(" 2024-02-01 ").is_ok());
        assert!(parse_acquired_date("02/01/2024").is_err());
        assert!(parse_acquired_date("").is_err());
    }
}
