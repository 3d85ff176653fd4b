//! Deck publishing pipeline.
//!
//! Uploads fan out as independent tokio tasks. Each task reports exactly one
//! `UploadCompletion` on an mpsc channel and the publisher is the only reader
//! of that channel, so the URL list, the failure flag and the progress count
//! are owned by a single consumer and need no locking. Recording is entered
//! at most once, from that consumer.
//!
//! Upload tasks are detached: once dispatched they run to completion even
//! after the job has failed. Blobs uploaded for a failed job are left behind.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::codec::{encode_for_upload, ImageCodec, ImageHandle};
use super::draft::PublishJob;
use super::error::DeckError;
use super::store::{BlobStore, DeckRecord, DocumentStore};
use crate::core::PublishConfig;

/// Pipeline stage of a publish job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublishStage {
    NameCheck,
    Uploading,
    Aggregating,
    Recording,
    Done,
    Failed,
}

/// Progress event emitted while publishing.
#[derive(Clone, Debug, PartialEq)]
pub enum PublishEvent {
    /// The job entered a new stage.
    Stage(PublishStage),
    /// Another image finished uploading.
    Progress {
        uploaded: usize,
        total: usize,
        fraction: f64,
    },
    /// One image failed to upload.
    UploadFailed { index: usize, error: String },
    /// The deck record was written.
    Completed { name: String },
    /// The job failed.
    Failed { error: String },
}

/// Result of one upload task.
#[derive(Debug)]
struct UploadCompletion {
    index: usize,
    result: Result<String, String>,
}

/// Publishes custom decks.
pub struct DeckPublisher {
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    codec: Arc<dyn ImageCodec>,
    config: PublishConfig,
    events_tx: mpsc::Sender<PublishEvent>,
    events_rx: Option<mpsc::Receiver<PublishEvent>>,
}

impl DeckPublisher {
    /// Creates a new publisher.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        codec: Arc<dyn ImageCodec>,
        config: PublishConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(256);
        Self {
            documents,
            blobs,
            codec,
            config,
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Takes the event receiver. Can only be called once.
    ///
    /// Events are best-effort: they are dropped when the receiver falls
    /// 256 events behind or has been dropped.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<PublishEvent>> {
        self.events_rx.take()
    }

    /// The publishing configuration.
    #[must_use]
    pub fn config(&self) -> &PublishConfig {
        &self.config
    }

    /// Runs a publish job to completion and returns the deck name.
    pub async fn publish(&self, job: PublishJob) -> Result<String, DeckError> {
        match self.run(&job).await {
            Ok(()) => {
                info!(deck = %job.name, images = job.images.len(), "deck published");
                self.emit(PublishEvent::Stage(PublishStage::Done));
                self.emit(PublishEvent::Completed { name: job.name.clone() });
                Ok(job.name)
            }
            Err(e) => {
                error!(deck = %job.name, error = %e, "deck publish failed");
                self.emit(PublishEvent::Stage(PublishStage::Failed));
                self.emit(PublishEvent::Failed { error: e.to_string() });
                Err(e)
            }
        }
    }

    async fn run(&self, job: &PublishJob) -> Result<(), DeckError> {
        let expected = job.size.pairs();
        if job.images.len() != expected {
            return Err(DeckError::WrongImageCount {
                expected,
                actual: job.images.len(),
            });
        }
        if !self.config.is_valid_name(&job.name) {
            return Err(DeckError::InvalidName(job.name.clone()));
        }

        self.check_name(&job.name).await?;
        let urls = self.upload_all(job).await?;

        self.emit(PublishEvent::Stage(PublishStage::Recording));
        self.documents
            .set(&self.config.collection, &job.name, DeckRecord::new(urls))
            .await
            .map_err(DeckError::RecordWriteFailed)
    }

    async fn check_name(&self, name: &str) -> Result<(), DeckError> {
        self.emit(PublishEvent::Stage(PublishStage::NameCheck));
        match self.documents.get(&self.config.collection, name).await {
            Ok(Some(_)) => Err(DeckError::NameTaken(name.to_string())),
            Ok(None) => Ok(()),
            Err(e) => Err(DeckError::StoreUnavailable(e)),
        }
    }

    /// Fan out one upload per image and gather the URLs in input order.
    ///
    /// Waits for every dispatched upload to report before returning, so a
    /// failed job has no uploads still running against it when it returns.
    async fn upload_all(&self, job: &PublishJob) -> Result<Vec<String>, DeckError> {
        self.emit(PublishEvent::Stage(PublishStage::Uploading));

        let total = job.images.len();
        let (done_tx, mut done_rx) = mpsc::channel::<UploadCompletion>(total.max(1));

        for (index, handle) in job.images.iter().enumerate() {
            let path = self.blob_path(&job.name, index);
            let task = UploadTask {
                index,
                handle: handle.clone(),
                path,
                blobs: Arc::clone(&self.blobs),
                codec: Arc::clone(&self.codec),
                target_height: self.config.target_height,
                quality: self.config.jpeg_quality,
            };
            let tx = done_tx.clone();
            tokio::spawn(async move {
                let completion = task.run().await;
                let _ = tx.send(completion).await;
            });
        }
        drop(done_tx);

        self.emit(PublishEvent::Stage(PublishStage::Aggregating));

        let mut urls: Vec<Option<String>> = vec![None; total];
        let mut uploaded = 0usize;
        let mut failure: Option<DeckError> = None;

        while let Some(UploadCompletion { index, result }) = done_rx.recv().await {
            match result {
                Err(reason) => {
                    warn!(deck = %job.name, index, reason = %reason, "image upload failed");
                    self.emit(PublishEvent::UploadFailed {
                        index,
                        error: reason.clone(),
                    });
                    failure.get_or_insert(DeckError::UploadFailed { index, reason });
                }
                Ok(url) if failure.is_some() => {
                    debug!(deck = %job.name, index, url = %url, "discarding upload for failed job");
                }
                Ok(url) => {
                    urls[index] = Some(url);
                    uploaded += 1;
                    let fraction = uploaded as f64 / total as f64;
                    debug!(deck = %job.name, index, uploaded, total, "image uploaded");
                    self.emit(PublishEvent::Progress {
                        uploaded,
                        total,
                        fraction,
                    });
                }
            }
        }

        if let Some(e) = failure {
            return Err(e);
        }

        // A task that died without reporting leaves a hole.
        urls.into_iter()
            .enumerate()
            .map(|(index, url)| {
                url.ok_or_else(|| DeckError::UploadFailed {
                    index,
                    reason: "upload task ended without reporting".to_string(),
                })
            })
            .collect()
    }

    /// `{prefix}/{deck}/{millis}-{index}.jpg`
    fn blob_path(&self, name: &str, index: usize) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        format!("{}/{}/{}-{}.jpg", self.config.image_prefix, name, millis, index)
    }

    fn emit(&self, event: PublishEvent) {
        let _ = self.events_tx.try_send(event);
    }
}

/// Everything one upload task needs, owned so the task can be detached.
struct UploadTask {
    index: usize,
    handle: ImageHandle,
    path: String,
    blobs: Arc<dyn BlobStore>,
    codec: Arc<dyn ImageCodec>,
    target_height: u32,
    quality: u8,
}

impl UploadTask {
    async fn run(self) -> UploadCompletion {
        let index = self.index;
        UploadCompletion {
            index,
            result: self.upload().await,
        }
    }

    async fn upload(self) -> Result<String, String> {
        let codec = Arc::clone(&self.codec);
        let handle = self.handle.clone();
        let (height, quality) = (self.target_height, self.quality);
        let bytes = tokio::task::spawn_blocking(move || {
            encode_for_upload(codec.as_ref(), &handle, height, quality)
        })
        .await
        .map_err(|e| format!("encoder task failed: {}", e))?
        .map_err(|e| e.to_string())?;

        let size = bytes.len();
        self.blobs.put(&self.path, bytes).await.map_err(|e| e.to_string())?;
        debug!(path = %self.path, bytes = size, "uploaded image bytes");

        self.blobs.download_url(&self.path).await.map_err(|e| e.to_string())
    }
}
