use crate::model::ClientRecord;
use crate::services::cli_runner::run_cmdline_with_input;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

pub struct StoreEvent {
    pub record: ClientRecord,
    pub outcome: Result<(), String>,
}

/// Application state the create dialog dispatches into.
pub trait ClientStore {
    /// Fire-and-forget; completion shows up later through `poll`.
    fn create_client(&mut self, record: ClientRecord);
    fn is_busy(&self) -> bool;
    fn clients(&self) -> &[ClientRecord];
    fn poll(&mut self) -> Vec<StoreEvent>;
}

pub struct CommandClientStore {
    create_cmd: Option<String>,
    in_flight: Arc<AtomicUsize>,
    clients: Vec<ClientRecord>,
    tx: Sender<StoreEvent>,
    rx: Receiver<StoreEvent>,
}

impl CommandClientStore {
    pub fn new(create_cmd: Option<String>) -> Self {
        let (tx, rx) = mpsc::channel::<StoreEvent>();
        Self {
            create_cmd,
            in_flight: Arc::new(AtomicUsize::new(0)),
            clients: Vec::new(),
            tx,
            rx,
        }
    }
}

impl ClientStore for CommandClientStore {
    fn create_client(&mut self, record: ClientRecord) {
        let Some(cmdline) = self.create_cmd.clone() else {
            let _ = self.tx.send(StoreEvent {
                record,
                outcome: Ok(()),
            });
            return;
        };
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let in_flight = Arc::clone(&self.in_flight);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = serde_json::to_value(&record)
                .map_err(anyhow::Error::from)
                .and_then(|input| run_cmdline_with_input(&cmdline, &input))
                .map(|_| ())
                .map_err(|e| format!("{e:#}"));
            in_flight.fetch_sub(1, Ordering::SeqCst);
            let _ = tx.send(StoreEvent { record, outcome });
        });
    }

    fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    fn poll(&mut self) -> Vec<StoreEvent> {
        let mut drained: Vec<StoreEvent> = Vec::new();
        while let Ok(ev) = self.rx.try_recv() {
            if ev.outcome.is_ok() {
                self.clients.push(ev.record.clone());
            }
            drained.push(ev);
        }
        drained
    }
}
