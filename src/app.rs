use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event as TerminalEvent, EventStream};
use futures::StreamExt;
use log::{debug, info};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::api::{ApiError, CreatedQuestion, QuestionPayload, QuizApiClient};
use crate::catalog::{self, Catalog};
use crate::draft::DraftStore;
use crate::form::{Command, FormController, Intent};
use crate::status::{self, StatusReport};
use crate::ui::{map_key, FormView, TerminalGuard};

/// Results of background work, delivered back to the loop.
#[derive(Debug)]
pub enum AppEvent {
    Status(StatusReport),
    CatalogLoaded(Result<Catalog, ApiError>),
    Submitted(Result<CreatedQuestion, ApiError>),
}

pub struct App {
    controller: FormController,
    client: QuizApiClient,
    tx: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(client: QuizApiClient, drafts: DraftStore) -> (Self, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Self {
            controller: FormController::new(drafts),
            client,
            tx,
        };
        (app, rx)
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FormController {
        &mut self.controller
    }

    pub fn start_status_poller(&self, interval: Duration) -> JoinHandle<()> {
        status::spawn_poller(self.client.clone(), interval, self.tx.clone(), AppEvent::Status)
    }

    pub fn start_catalog_load(&self) -> JoinHandle<()> {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = catalog::load_categories(&client).await;
            let _ = tx.send(AppEvent::CatalogLoaded(result));
        })
    }

    fn start_submission(&self, payload: QuestionPayload) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.create_question(&payload).await;
            let _ = tx.send(AppEvent::Submitted(result));
        });
    }

    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::Status(report) => self.controller.apply_status(report),
            AppEvent::CatalogLoaded(result) => self.controller.apply_catalog(result),
            AppEvent::Submitted(result) => self.controller.finish_submission(result),
        }
    }

    /// Returns `false` once the user asked to quit.
    pub fn handle_intent(&mut self, intent: Intent) -> bool {
        match self.controller.handle_intent(intent) {
            Some(Command::Quit) => false,
            Some(Command::Submit(payload)) => {
                self.start_submission(payload);
                true
            }
            None => true,
        }
    }
}

pub async fn run(client: QuizApiClient, drafts: DraftStore, status_interval: Duration) -> Result<()> {
    info!("Starting form against {}", client.base_url());
    let (mut app, mut events) = App::new(client, drafts);
    let poller = app.start_status_poller(status_interval);
    app.start_catalog_load();

    let mut terminal = TerminalGuard::enter()?;
    let mut keys = EventStream::new();

    loop {
        terminal.draw(&FormView::project(app.controller().state()))?;

        tokio::select! {
            Some(event) = events.recv() => {
                debug!("Background event: {:?}", event);
                app.apply(event);
            }
            key = keys.next() => match key {
                Some(Ok(TerminalEvent::Key(key))) => {
                    if let Some(intent) = map_key(key) {
                        if !app.handle_intent(intent) {
                            break;
                        }
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    poller.abort();
    info!("Form closed");
    Ok(())
}
