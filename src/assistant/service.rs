//! Session store and turn driver.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::assistant::session::{Session, SessionSnapshot};
use crate::genai::TextGenerator;

/// Owns every live chat session and drives their turns against the
/// generation boundary.
pub struct AssistantService {
    generator: Arc<dyn TextGenerator>,
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
}

impl AssistantService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a session and returns its id with the greeting-only snapshot.
    pub async fn create_session(&self) -> (Uuid, SessionSnapshot) {
        let id = Uuid::new_v4();
        let session = Session::new();
        let snapshot = session.snapshot();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        info!(%id, "chat session created");
        (id, snapshot)
    }

    async fn session(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn snapshot(&self, id: Uuid) -> Option<SessionSnapshot> {
        let session = self.session(id).await?;
        let snapshot = session.lock().await.snapshot();
        Some(snapshot)
    }

    pub async fn open(&self, id: Uuid) -> Option<SessionSnapshot> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        session.open();
        Some(session.snapshot())
    }

    pub async fn close(&self, id: Uuid) -> Option<SessionSnapshot> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        session.close();
        Some(session.snapshot())
    }

    /// Stores the text as the draft and submits it, the widget's send action
    /// in one step. Rejected submissions (closed, blank, already awaiting a
    /// reply) change nothing but the draft and return the current snapshot.
    pub async fn send_message(&self, id: Uuid, text: &str) -> Option<SessionSnapshot> {
        let session = self.session(id).await?;

        let pending = {
            let mut session = session.lock().await;
            session.set_draft(text);
            match session.begin_turn() {
                Ok(pending) => pending,
                Err(rejection) => {
                    debug!(%id, ?rejection, "submission ignored");
                    return Some(session.snapshot());
                }
            }
        };

        // The call runs with the session unlocked so snapshots and
        // open/close stay responsive while the model thinks.
        let outcome = self.generator.generate(&pending.request).await;
        if let Err(error) = &outcome {
            warn!(%id, %error, "chat turn failed");
        }

        let mut session = session.lock().await;
        session.complete_turn(pending.epoch, outcome);
        Some(session.snapshot())
    }

    /// Removes the session. A reply still in flight resolves against the
    /// bumped epoch and is dropped.
    pub async fn end_session(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id);
        match removed {
            Some(session) => {
                session.lock().await.end();
                info!(%id, "chat session ended");
                true
            }
            None => false,
        }
    }
}
