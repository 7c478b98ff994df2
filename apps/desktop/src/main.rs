use anyhow::Result;
use clap::Parser;
use platform_core::{
    config,
    render::{self, Section},
    store::{self, CertificateDraft, PeerSortKey, PortfolioDraft},
    CoreEvent, PlatformCore,
};
use shared::domain::{PortfolioCategory, ReviewRating};
use shared::requirements;

#[derive(Parser, Debug)]
struct Args {
    /// Start from an empty state instead of the built-in sample data.
    #[arg(long)]
    skip_sample: bool,
    /// Override the simulated verification delay.
    #[arg(long)]
    verification_delay_ms: Option<u64>,
    /// Render a single section and exit instead of running the demo flow.
    #[arg(long)]
    section: Option<String>,
}

fn parse_section(name: &str) -> Option<Section> {
    match name {
        "home" => Some(Section::Home),
        "portfolio" | "portfolios" => Some(Section::Portfolios),
        "certificates" => Some(Section::Certificates),
        "users" => Some(Section::Users),
        "profile" => Some(Section::Profile),
        "reputation" => Some(Section::Reputation),
        _ => None,
    }
}

async fn print_section(core: &std::sync::Arc<PlatformCore>, section: Section) {
    let snapshot = core.snapshot().await;
    println!("== {} ==", section.label());
    println!("{}", render::render_section(&snapshot, section));
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if args.skip_sample {
        settings.load_sample_data = false;
    }
    if let Some(delay) = args.verification_delay_ms {
        settings.verification_delay_ms = delay;
    }
    let verification_delay_ms = settings.verification_delay_ms;

    let core = PlatformCore::new(settings);
    let mut events = core.subscribe_events();
    if core.settings().load_sample_data {
        core.load_sample_data().await;
    }

    if let Some(name) = args.section.as_deref() {
        let Some(section) = parse_section(name) else {
            anyhow::bail!("unknown section '{name}'");
        };
        print_section(&core, section).await;
        return Ok(());
    }

    println!("포트폴리오 & 자격증 플랫폼 데모");
    print_section(&core, Section::Home).await;

    let item = core
        .create_portfolio(PortfolioDraft {
            title: "모바일 출석 앱".to_string(),
            description: "오프라인 우선 출석 관리 앱".to_string(),
            category: PortfolioCategory::Mobile,
            tags: " Rust, Tokio ,, egui ".to_string(),
        })
        .await?;
    print_section(&core, Section::Portfolios).await;

    let certificate = core
        .submit_certificate(CertificateDraft {
            name: "네트워크관리사".to_string(),
            issuer: "한국정보통신자격협회".to_string(),
            acquired_on: chrono::NaiveDate::from_ymd_opt(2024, 2, 1).expect("fixed demo date"),
            number: "NW-2024-0418".to_string(),
        })
        .await?;
    println!(
        "자격증 {} 접수, {verification_delay_ms}ms 후 인증 예정...",
        certificate.name
    );

    // Block until the deferred verification fires.
    loop {
        match events.recv().await {
            Ok(CoreEvent::CertificateVerified { id, name }) if id == certificate.id => {
                println!("인증 완료: {name}");
                break;
            }
            Ok(_) => {}
            Err(err) => anyhow::bail!("event stream closed: {err}"),
        }
    }
    print_section(&core, Section::Certificates).await;

    core.submit_review(
        store::LOCAL_PROFILE_ID,
        Some(ReviewRating::Positive),
        "전문적이고 신뢰할 수 있는 작업이었습니다.".to_string(),
    )
    .await?;
    print_section(&core, Section::Reputation).await;

    println!("== 프레젠테이션 ==");
    core.start_presentation(item.id).await?;
    while let Some(view) = core.presentation().await {
        println!("[{}] {}", view.counter, view.slide.title);
        println!("  {}", view.slide.body.replace('\n', "\n  "));
        if view.at_last {
            break;
        }
        core.next_slide().await;
    }
    core.close_presentation().await;

    let snapshot = core.snapshot().await;
    let sorted = store::sort_peers(&snapshot.peers, PeerSortKey::Reputation);
    println!("== 평판 순 사용자 ==");
    println!("{}", render::render_users(&sorted));

    let reqs = requirements::requirements_for("network");
    println!(
        "네트워크 자격 요건: 학력 {}, 경력 {}, 응시료 {}",
        reqs.education, reqs.experience, reqs.exam_fee
    );

    Ok(())
}
