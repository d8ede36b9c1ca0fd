//! The phase channel: movers push [`PhaseNotice`]s, the dispatcher drains
//! them once per tick.

use std::sync::mpsc;

use fd_core::PhaseNotice;
use tracing::warn;

/// Create a connected sender/receiver pair.
pub fn phase_channel() -> (PhaseSender, PhaseReceiver) {
    let (tx, rx) = mpsc::channel();
    (PhaseSender(tx), PhaseReceiver(rx))
}

/// Producer half.  Cloneable so several movers can share one receiver.
#[derive(Clone, Debug)]
pub struct PhaseSender(mpsc::Sender<PhaseNotice>);

impl PhaseSender {
    /// Send `notice`.  A dropped receiver is logged, never fatal.
    pub fn send(&self, notice: PhaseNotice) {
        if self.0.send(notice).is_err() {
            warn!(craft = %notice.craft, change = %notice.change, "phase receiver dropped; notice lost");
        }
    }
}

/// Consumer half.
#[derive(Debug)]
pub struct PhaseReceiver(mpsc::Receiver<PhaseNotice>);

impl PhaseReceiver {
    /// Everything queued so far, in send order.  Never blocks.
    pub fn drain(&self) -> Vec<PhaseNotice> {
        self.0.try_iter().collect()
    }
}
