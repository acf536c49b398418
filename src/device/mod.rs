// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Controller transport.
//!
//! Outbound, a [`DeviceLink`] receives the exported document. Inbound, device traffic arrives on
//! its own I/O context and is queued on a channel; the UI thread drains it between input events
//! so the tree is only ever touched from one place.

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::editor::{Editor, EditorHost, Notice};
use crate::store::project_file::{write_atomic, ProjectFileError, WriteDurability};
use crate::store::ProjectDocument;

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("failed to encode document")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write to device")]
    Write(#[from] ProjectFileError),
    #[error("device link closed")]
    Closed,
}

/// Where exported documents go.
pub trait DeviceLink {
    fn push(&mut self, document: &ProjectDocument) -> Result<(), DeviceError>;
}

/// Writes each pushed document to a file, replacing the previous one.
#[derive(Debug, Clone)]
pub struct FileLink {
    path: PathBuf,
    durability: WriteDurability,
}

impl FileLink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::Durable,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl DeviceLink for FileLink {
    fn push(&mut self, document: &ProjectDocument) -> Result<(), DeviceError> {
        let bytes = serde_json::to_vec(document).map_err(DeviceError::Encode)?;
        write_atomic(&self.path, &bytes, self.durability)?;
        log::info!(path:? = self.path, bytes = bytes.len(); "pushed document");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceMessage {
    /// A full project document read back from the controller.
    Document(serde_json::Value),
    Status(String),
}

/// Sending half, handed to the I/O context.
#[derive(Debug, Clone)]
pub struct DeviceSender {
    tx: mpsc::UnboundedSender<DeviceMessage>,
}

impl DeviceSender {
    pub fn send(&self, message: DeviceMessage) -> Result<(), DeviceError> {
        self.tx.send(message).map_err(|_| DeviceError::Closed)
    }
}

/// Receiving half, owned by the UI thread.
#[derive(Debug)]
pub struct DeviceInbox {
    rx: mpsc::UnboundedReceiver<DeviceMessage>,
}

impl DeviceInbox {
    pub fn channel() -> (DeviceSender, DeviceInbox) {
        let (tx, rx) = mpsc::unbounded_channel();
        (DeviceSender { tx }, DeviceInbox { rx })
    }

    /// Applies every queued message to `editor` without blocking. Returns how many were handled.
    pub fn drain_into<H: EditorHost>(&mut self, editor: &mut Editor<H>) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.rx.try_recv() {
            handled += 1;
            match message {
                DeviceMessage::Document(value) => {
                    // Failures are already reported to the host by the editor.
                    let _ = editor.apply_document(&value);
                }
                DeviceMessage::Status(status) => {
                    log::info!(status = status.as_str(); "device status");
                    editor.host_mut().notify(Notice::DeviceStatus(status));
                }
            }
        }
        handled
    }
}
