//! Artifacts and their content channels.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, TryStreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::io::StreamReader;

use crate::descriptor::Descriptor;
use crate::error::DownloadError;

type Chunk = Result<Bytes, DownloadError>;

/// One download, handed out before its bytes have arrived.
///
/// `content` ends cleanly when the fetch completes, or yields a
/// [`DownloadError`] when it fails and no error callback is configured.
#[derive(Debug)]
pub struct Artifact {
    descriptor: Descriptor,
    content: Content,
}

impl Artifact {
    pub(crate) fn new(descriptor: Descriptor, content: Content) -> Self {
        Self {
            descriptor,
            content,
        }
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn url(&self) -> &str {
        self.descriptor.url()
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn content(&mut self) -> &mut Content {
        &mut self.content
    }

    pub fn into_content(self) -> Content {
        self.content
    }

    pub fn into_parts(self) -> (Descriptor, Content) {
        (self.descriptor, self.content)
    }
}

/// Consumer end of an artifact's byte stream.
///
/// Dropping it tells the download to stop at its next chunk.
#[derive(Debug)]
pub struct Content {
    inner: ReceiverStream<Chunk>,
}

impl Content {
    /// Adapt into an [`AsyncRead`](tokio::io::AsyncRead) for `tokio::io::copy`
    /// and friends. Download errors surface as `io::ErrorKind::Other`.
    pub fn into_reader(self) -> StreamReader<Content, Bytes> {
        StreamReader::new(self)
    }

    /// Wait for the whole body.
    pub async fn bytes(self) -> Result<Bytes, DownloadError> {
        let buf = self
            .try_fold(BytesMut::new(), |mut buf, chunk| async move {
                buf.extend_from_slice(&chunk);
                Ok(buf)
            })
            .await?;
        Ok(buf.freeze())
    }
}

impl Stream for Content {
    type Item = Chunk;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

/// Producer end of an artifact's byte stream, owned by the download task.
///
/// Dropping it closes the stream.
#[derive(Debug)]
pub(crate) struct ContentSender {
    tx: mpsc::Sender<Chunk>,
}

impl ContentSender {
    /// Forward a chunk. `false` once the reader is gone.
    pub(crate) async fn send(&self, chunk: Bytes) -> bool {
        self.tx.send(Ok(chunk)).await.is_ok()
    }

    pub(crate) async fn fail(&self, error: DownloadError) -> bool {
        self.tx.send(Err(error)).await.is_ok()
    }
}

pub(crate) fn content_channel(capacity: usize) -> (ContentSender, Content) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        ContentSender { tx },
        Content {
            inner: ReceiverStream::new(rx),
        },
    )
}
