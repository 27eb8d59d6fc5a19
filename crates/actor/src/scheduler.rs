use tokio::select;
use tokio::sync::{mpsc, watch};

use crate::message::BoxEnvelope;

pub(crate) async fn run_actor<S>(
    mut state: S,
    mut msg_rx: mpsc::UnboundedReceiver<BoxEnvelope<S>>,
    mut kill_rx: watch::Receiver<bool>,
) {
    debug!("started");
    loop {
        let msg = select! {
            biased;

            // Also fires when the last handle is dropped.
            _ = kill_rx.changed() => {
                break;
            }
            msg = msg_rx.recv() => {
                let Some(msg) = msg else {
                    break;
                };
                msg
            }
        };
        trace!("received message: {msg:?}");

        trace_span!("proc msg").in_scope(|| {
            msg.open(&mut state);
            trace!("finished");
        });
    }
    debug!("will terminate");
}
