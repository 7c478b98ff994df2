//! Backend worker: owns the platform core on its own tokio runtime and
//! shuttles commands in and events out over bounded queues.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use platform_core::{config, CoreEvent, PlatformCore, PlatformHandle};

use crate::backend_bridge::commands::CoreCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

fn map_core_event(event: CoreEvent) -> UiEvent {
    match event {
        CoreEvent::StateRefreshed(snapshot) => UiEvent::StateRefreshed(snapshot),
        CoreEvent::PresentationChanged(view) => UiEvent::PresentationChanged(view),
        CoreEvent::CertificateVerified { name, .. } => UiEvent::CertificateVerified { name },
        CoreEvent::ReputationDrifted { score } => UiEvent::ReputationDrifted { score },
        CoreEvent::Alert { severity, message } => UiEvent::Alert { severity, message },
    }
}

pub fn spawn_backend_thread(cmd_rx: Receiver<CoreCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let settings = config::load_settings();
            let load_sample = settings.load_sample_data;
            let core = PlatformCore::new(settings);

            let mut events = core.subscribe_events();
            let ui_tx_events = ui_tx.clone();
            let forward_task = tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    let _ = ui_tx_events.try_send(map_core_event(event));
                }
            });

            let _ = ui_tx.try_send(UiEvent::BackendReady);
            if load_sample {
                core.load_sample_data().await;
            }
            core.start_ambient_drift().await;

            run_command_loop(&core, cmd_rx, &ui_tx).await;
            forward_task.abort();
        });
    });
}

async fn run_command_loop<H: PlatformHandle>(
    core: &H,
    cmd_rx: Receiver<CoreCommand>,
    ui_tx: &Sender<UiEvent>,
) {
    let send_error = |context: UiErrorContext, err: &platform_core::error::CoreError| {
        let _ = ui_tx.try_send(UiEvent::Error(UiError::from_core(context, err)));
    };

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            CoreCommand::LoadSampleData => {
                core.load_sample_data().await;
            }
            CoreCommand::CreatePortfolio { draft } => {
                if let Err(err) = core.create_portfolio(draft).await {
                    send_error(UiErrorContext::Portfolio, &err);
                }
            }
            CoreCommand::UpdatePortfolio { id, draft } => {
                if let Err(err) = core.update_portfolio(id, draft).await {
                    send_error(UiErrorContext::Portfolio, &err);
                }
            }
            CoreCommand::DeletePortfolio { id } => {
                if let Err(err) = core.delete_portfolio(id).await {
                    send_error(UiErrorContext::Portfolio, &err);
                }
            }
            CoreCommand::SubmitCertificate { draft } => {
                if let Err(err) = core.submit_certificate(draft).await {
                    send_error(UiErrorContext::Certificate, &err);
                }
            }
            CoreCommand::DeleteCertificate { id } => {
                if let Err(err) = core.delete_certificate(id).await {
                    send_error(UiErrorContext::Certificate, &err);
                }
            }
            CoreCommand::UpdateProfile { edit } => {
                core.update_profile(edit).await;
            }
            CoreCommand::SubmitReview {
                target,
                rating,
                comment,
            } => {
                if let Err(err) = core.submit_review(target, rating, comment).await {
                    send_error(UiErrorContext::Review, &err);
                }
            }
            CoreCommand::StartPresentation { id } => {
                if let Err(err) = core.start_presentation(id).await {
                    send_error(UiErrorContext::Presentation, &err);
                }
            }
            CoreCommand::NextSlide => {
                core.next_slide().await;
            }
            CoreCommand::PreviousSlide => {
                core.previous_slide().await;
            }
            CoreCommand::ClosePresentation => {
                core.close_presentation().await;
            }
        }
    }
}
