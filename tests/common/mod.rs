//! Shared helpers for end-to-end export tests

pub mod fixtures;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use board_export::{
    BoardHost, BoardItem, ContainerInfo, Error, ImageContent, ItemId, NotifyLevel, Result,
};

/// In-memory board host playing back scripted data and recording calls
#[derive(Default)]
pub struct RecordingHost {
    selection: Vec<BoardItem>,
    containers: HashMap<ItemId, ContainerInfo>,
    originals: HashMap<ItemId, ImageContent>,
    data_urls: HashMap<ItemId, String>,
    data_url_calls: AtomicUsize,
    notifications: Mutex<Vec<(NotifyLevel, String)>>,
}

impl RecordingHost {
    pub fn new(selection: Vec<BoardItem>) -> Self {
        Self {
            selection,
            ..Self::default()
        }
    }

    pub fn with_container(mut self, id: &str, title: Option<&str>, x: f64, y: f64) -> Self {
        self.containers.insert(
            ItemId::new(id),
            ContainerInfo {
                title: title.map(String::from),
                x,
                y,
            },
        );
        self
    }

    pub fn with_original(mut self, id: &str, bytes: &[u8], content_type: &str) -> Self {
        self.originals.insert(
            ItemId::new(id),
            ImageContent {
                bytes: bytes.to_vec(),
                content_type: Some(content_type.to_string()),
            },
        );
        self
    }

    pub fn with_data_url(mut self, id: &str, url: &str) -> Self {
        self.data_urls.insert(ItemId::new(id), url.to_string());
        self
    }

    pub fn data_url_calls(&self) -> usize {
        self.data_url_calls.load(Ordering::SeqCst)
    }

    pub fn notifications(&self) -> Vec<(NotifyLevel, String)> {
        self.notifications.lock().expect("notifications lock").clone()
    }
}

#[async_trait]
impl BoardHost for RecordingHost {
    async fn get_selection(&self) -> Result<Vec<BoardItem>> {
        Ok(self.selection.clone())
    }

    async fn get_container(&self, id: &ItemId) -> Result<ContainerInfo> {
        self.containers.get(id).cloned().ok_or_else(|| Error::Board {
            operation: "get_container".into(),
            reason: format!("container {id} not found"),
        })
    }

    async fn get_original_content(&self, id: &ItemId) -> Result<ImageContent> {
        self.originals.get(id).cloned().ok_or_else(|| Error::Board {
            operation: "get_original_content".into(),
            reason: format!("original content unavailable for {id}"),
        })
    }

    async fn get_original_data_url(&self, id: &ItemId) -> Result<String> {
        self.data_url_calls.fetch_add(1, Ordering::SeqCst);
        self.data_urls.get(id).cloned().ok_or_else(|| Error::Board {
            operation: "get_original_data_url".into(),
            reason: format!("no data URL for {id}"),
        })
    }

    async fn notify(&self, level: NotifyLevel, message: &str) {
        self.notifications
            .lock()
            .expect("notifications lock")
            .push((level, message.to_string()));
    }

    async fn can_open_export_surface(&self) -> bool {
        true
    }
}
