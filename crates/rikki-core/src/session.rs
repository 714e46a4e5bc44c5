//! Chat session controller
//!
//! A [`ChatSession`] owns the transcript and the typing state for one mounted
//! chat screen. Work that has to wait (network round-trips, the scripted
//! "typing" delay) runs in spawned tasks that report back as
//! [`SessionEvent`]s over a channel; the owner feeds those into
//! [`ChatSession::apply`] on its own loop, so every mutation happens in one
//! place.
//!
//! Each session has an epoch stamped on the work it spawns. Closing a session
//! aborts its tasks and retires the epoch, and `apply` drops events whose epoch
//! does not match, so nothing can write into a session after teardown.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::api::{ChatTransport, ImageUpload};
use crate::content::{
    ANALYZING_IMAGE, CANNED_RESPONSES, CHAT_REPLY_FAILED, GREETING, IMAGE_ANALYSIS_FAILED,
};
use crate::error::{ImageAnalysisError, TransportError};
use crate::scheduler::{ReplyScheduler, SeededScheduler, DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY};
use crate::state::ChatMessage;

static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

/// Where assistant replies to text messages come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyMode {
    /// Canned responses after a randomized delay
    #[default]
    Scripted,
    /// Replies from the remote chat endpoint
    Remote,
}

impl ReplyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyMode::Scripted => "scripted",
            ReplyMode::Remote => "remote",
        }
    }
}

/// Result of suspended session work, delivered back to the owner's loop
#[derive(Debug)]
pub enum SessionEvent {
    Reply {
        epoch: u64,
        result: Result<String, TransportError>,
    },
    Analysis {
        epoch: u64,
        result: Result<String, ImageAnalysisError>,
    },
}

impl SessionEvent {
    pub fn epoch(&self) -> u64 {
        match self {
            SessionEvent::Reply { epoch, .. } | SessionEvent::Analysis { epoch, .. } => *epoch,
        }
    }
}

pub struct ChatSession {
    epoch: u64,
    mode: ReplyMode,
    messages: Vec<ChatMessage>,
    pending_replies: usize,
    transport: Arc<dyn ChatTransport>,
    scheduler: Box<dyn ReplyScheduler>,
    events: UnboundedSender<SessionEvent>,
    tasks: Vec<JoinHandle<()>>,
    closed: bool,
}

impl ChatSession {
    /// Start a session whose transcript opens with Rikki's greeting
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        scheduler: Box<dyn ReplyScheduler>,
        mode: ReplyMode,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        let epoch = next_epoch();
        tracing::info!("Chat session {} started ({} replies)", epoch, mode.as_str());
        Self {
            epoch,
            mode,
            messages: vec![ChatMessage::assistant(GREETING)],
            pending_replies: 0,
            transport,
            scheduler,
            events,
            tasks: Vec::new(),
            closed: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn pending_replies(&self) -> usize {
        self.pending_replies
    }

    pub fn mode(&self) -> ReplyMode {
        self.mode
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Append the user's message and start producing a reply.
    ///
    /// Returns false, doing nothing, for blank input or a closed session.
    /// Sends made while a reply is still pending are allowed; their replies
    /// land in whatever order they resolve.
    pub fn submit_user_text(&mut self, text: &str) -> bool {
        if self.closed || text.trim().is_empty() {
            return false;
        }

        self.messages.push(ChatMessage::user(text));
        self.pending_replies += 1;

        let epoch = self.epoch;
        let events = self.events.clone();

        match self.mode {
            ReplyMode::Scripted => {
                let delay = self.scheduler.next_delay();
                let index = self.scheduler.pick(CANNED_RESPONSES.len()) % CANNED_RESPONSES.len();
                tracing::debug!("Scripted reply #{} in {}ms", index, delay.as_millis());
                let reply = CANNED_RESPONSES[index].to_string();
                self.spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = events.send(SessionEvent::Reply {
                        epoch,
                        result: Ok(reply),
                    });
                });
            }
            ReplyMode::Remote => {
                let transport = Arc::clone(&self.transport);
                let text = text.to_string();
                self.spawn(async move {
                    let result = transport
                        .send_message(&text)
                        .await
                        .map(|reply| reply.reply_text);
                    let _ = events.send(SessionEvent::Reply { epoch, result });
                });
            }
        }

        true
    }

    /// Post the "analyzing" placeholder and upload the image.
    ///
    /// The eventual analysis (or failure notice) is appended after the
    /// placeholder; the placeholder itself stays in the transcript.
    pub fn submit_image(&mut self, upload: ImageUpload) -> bool {
        if self.closed {
            return false;
        }

        tracing::info!("Submitting image {} for analysis", upload.file_name);
        self.messages.push(ChatMessage::assistant(ANALYZING_IMAGE));

        let epoch = self.epoch;
        let events = self.events.clone();
        let transport = Arc::clone(&self.transport);
        self.spawn(async move {
            let result = transport
                .analyze_image(upload)
                .await
                .map(|analysis| analysis.analysis_text);
            let _ = events.send(SessionEvent::Analysis { epoch, result });
        });

        true
    }

    /// Fold a finished task's result into the transcript.
    ///
    /// Returns false when the event belongs to another (or a closed) session
    /// and was ignored.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        if self.closed || event.epoch() != self.epoch {
            tracing::debug!(
                "Dropping stale session event (epoch {}, current {})",
                event.epoch(),
                self.epoch
            );
            return false;
        }

        match event {
            SessionEvent::Reply { result, .. } => {
                let body = match result {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!("Chat reply failed: {}", err);
                        CHAT_REPLY_FAILED.to_string()
                    }
                };
                self.messages.push(ChatMessage::assistant(body));
                self.pending_replies = self.pending_replies.saturating_sub(1);
            }
            SessionEvent::Analysis { result, .. } => {
                let body = match result {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!("Image analysis failed: {}", err);
                        IMAGE_ANALYSIS_FAILED.to_string()
                    }
                };
                self.messages.push(ChatMessage::assistant(body));
            }
        }

        true
    }

    /// Tear down: abort outstanding work and stop accepting its results
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        for task in self.tasks.drain(..) {
            task.abort();
        }
        self.pending_replies = 0;
        tracing::info!(
            "Chat session {} closed ({} messages)",
            self.epoch,
            self.messages.len()
        );
        // Retire the epoch so late events can never match again
        self.epoch = next_epoch();
    }

    fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(tokio::spawn(work));
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Everything needed to mount a fresh session each time the chat screen opens
#[derive(Clone)]
pub struct SessionBuilder {
    transport: Arc<dyn ChatTransport>,
    events: UnboundedSender<SessionEvent>,
    mode: ReplyMode,
    seed: Option<u64>,
    min_delay: Duration,
    max_delay: Duration,
}

impl SessionBuilder {
    pub fn new(transport: Arc<dyn ChatTransport>, events: UnboundedSender<SessionEvent>) -> Self {
        Self {
            transport,
            events,
            mode: ReplyMode::default(),
            seed: None,
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }

    pub fn mode(mut self, mode: ReplyMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn delay_range(mut self, min: Duration, max: Duration) -> Self {
        self.min_delay = min;
        self.max_delay = max;
        self
    }

    pub fn reply_mode(&self) -> ReplyMode {
        self.mode
    }

    pub fn build(&self) -> ChatSession {
        let scheduler = SeededScheduler::new(self.seed, self.min_delay, self.max_delay);
        self.build_with_scheduler(Box::new(scheduler))
    }

    pub fn build_with_scheduler(&self, scheduler: Box<dyn ReplyScheduler>) -> ChatSession {
        ChatSession::new(
            Arc::clone(&self.transport),
            scheduler,
            self.mode,
            self.events.clone(),
        )
    }
}
