//! Trust-free verification simulator: a one-shot deferred flip from
//! `Pending` to `Verified`, with no validation and no rejection path.

use std::{sync::Arc, time::Duration};

use shared::domain::CertificateId;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::{AlertSeverity, CoreEvent, PlatformCore, StateSnapshot};

impl PlatformCore {
    pub(crate) fn spawn_verification_task(
        self: &Arc<Self>,
        id: CertificateId,
    ) -> JoinHandle<()> {
        let core = Arc::clone(self);
        let delay = Duration::from_millis(core.settings.verification_delay_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            core.finish_verification(id).await;
        })
    }

    async fn finish_verification(&self, id: CertificateId) {
        let flipped = {
            let mut state = self.state.lock().await;
            let flipped = state.mark_certificate_verified(id);
            if flipped.is_some() {
                let _ = self
                    .events
                    .send(CoreEvent::StateRefreshed(StateSnapshot::capture(&state)));
            }
            flipped
        };

        match flipped {
            Some(certificate) => {
                info!(certificate_id = id.0, name = %certificate.name, "certificate verified");
                let _ = self.events.send(CoreEvent::CertificateVerified {
                    id,
                    name: certificate.name,
                });
                self.emit_alert(AlertSeverity::Success, "자격증이 성공적으로 인증되었습니다!");
            }
            // The record was deleted (or already verified) before the
            // timer fired; the deferred action stays a no-op.
            None => {
                warn!(
                    certificate_id = id.0,
                    "verification fired for a missing or already verified certificate"
                );
            }
        }

        self.verification_tasks.lock().await.remove(&id);
    }
}
