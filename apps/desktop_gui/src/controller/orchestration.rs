//! Command orchestration helpers from UI actions to the backend queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::CoreCommand;

pub fn dispatch_core_command(
    cmd_tx: &Sender<CoreCommand>,
    cmd: CoreCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        CoreCommand::LoadSampleData => "load_sample_data",
        CoreCommand::CreatePortfolio { .. } => "create_portfolio",
        CoreCommand::UpdatePortfolio { .. } => "update_portfolio",
        CoreCommand::DeletePortfolio { .. } => "delete_portfolio",
        CoreCommand::SubmitCertificate { .. } => "submit_certificate",
        CoreCommand::DeleteCertificate { .. } => "delete_certificate",
        CoreCommand::UpdateProfile { .. } => "update_profile",
        CoreCommand::SubmitReview { .. } => "submit_review",
        CoreCommand::StartPresentation { .. } => "start_presentation",
        CoreCommand::NextSlide => "next_slide",
        CoreCommand::PreviousSlide => "previous_slide",
        CoreCommand::ClosePresentation => "close_presentation",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "작업 대기열이 가득 찼습니다. 잠시 후 다시 시도해주세요.".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "백엔드 작업 스레드가 종료되었습니다. 앱을 다시 시작해주세요.".to_string();
        }
    }
}
