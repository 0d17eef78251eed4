//! Background correction task.
//!
//! Correction decodes and re-encodes full-resolution captures; that work
//! never belongs on the caller's execution context. [`submit_correction`]
//! runs it on tokio's blocking worker pool and delivers the outcome to
//! the host callback exactly once. There is no cancellation: once
//! submitted, a correction runs to completion or failure. Each task owns
//! its byte buffer outright, so concurrent corrections share nothing.

use std::sync::Arc;

use lenswork_core::{
    CorrectError, Correction, DeviceProfile, ImageCodec, LensFacing, MemoryBudget,
    OrientationContext, OrientationCorrector, PostProcess, Rotation, Transform,
};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::Transaction;

/// Receives correction outcomes; implemented by the embedding
/// application.
pub trait CaptureHost: Send + Sync {
    /// Device-specific extra transform, resolved from the applied device
    /// angle and the EXIF angle. Most hosts leave this alone.
    fn post_process(
        &self,
        _device_angle: Rotation,
        _exif_angle: Option<Rotation>,
    ) -> Option<Transform> {
        None
    }

    /// Memory headroom for the degrade-under-pressure policy. `None`
    /// (the default) never degrades.
    fn memory_budget(&self) -> Option<MemoryBudget> {
        None
    }

    /// Called exactly once per submitted capture, with the requested
    /// artifacts or the failure. A failure aborts that one capture's
    /// post-processing only; the session stays usable.
    fn on_image_ready(&self, outcome: Result<Correction<'_>, CorrectError>);
}

/// Adapts the host's post-process hook to the corrector's seam.
struct HostPostProcess<'a>(&'a dyn CaptureHost);

impl PostProcess for HostPostProcess<'_> {
    fn transform(&self, device_angle: Rotation, exif_angle: Option<Rotation>) -> Option<Transform> {
        self.0.post_process(device_angle, exif_angle)
    }
}

/// Correct one capture on the blocking worker pool and hand the outcome
/// to the host.
///
/// Assembles the [`OrientationContext`] from the resolved profile and the
/// transaction, then runs the corrector. The returned handle resolves
/// when the host callback has been invoked; callers that do not care can
/// drop it.
pub fn submit_correction<C>(
    corrector: Arc<OrientationCorrector<C>>,
    profile: Arc<DeviceProfile>,
    host: Arc<dyn CaptureHost>,
    transaction: Transaction,
    lens_facing: LensFacing,
    data: Vec<u8>,
) -> JoinHandle<()>
where
    C: ImageCodec + Send + Sync + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut context = OrientationContext::new(
            &profile,
            lens_facing,
            transaction.display_orientation,
            transaction.mirror_front_camera,
        );
        if let Some(budget) = host.memory_budget() {
            context = context.with_memory_budget(budget);
        }

        debug!(len = data.len(), ?lens_facing, "starting capture correction");

        let post = HostPostProcess(host.as_ref());
        let outcome = corrector.correct(&data, &context, transaction.outputs(), Some(&post));
        if let Err(err) = &outcome {
            error!(error = %err, "capture correction failed");
        }

        host.on_image_ready(outcome);
    })
}
