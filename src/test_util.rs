//! Shared test helpers: a scripted in-memory [`BoardHost`]
//!
//! `ScriptedHost` plays back pre-registered selection, container, and
//! content data, records notification calls, and counts how often each host
//! operation was invoked so tests can assert call discipline (fallbacks
//! taken or skipped, containers resolved once, and so on).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::board::{BoardHost, ImageContent};
use crate::error::{Error, Result};
use crate::types::{BoardItem, ContainerInfo, ItemId, ItemKind, NotifyLevel};

/// A root-level image with no title.
pub(crate) fn image(id: &str, x: f64, y: f64) -> BoardItem {
    image_in(id, x, y, None)
}

/// An image, optionally parented to a container.
pub(crate) fn image_in(id: &str, x: f64, y: f64, parent: Option<&str>) -> BoardItem {
    BoardItem {
        id: ItemId::new(id),
        kind: ItemKind::Image,
        title: None,
        parent_id: parent.map(ItemId::new),
        x,
        y,
    }
}

/// An image with a title.
pub(crate) fn titled_image(
    id: &str,
    title: &str,
    x: f64,
    y: f64,
    parent: Option<&str>,
) -> BoardItem {
    BoardItem {
        title: Some(title.to_string()),
        ..image_in(id, x, y, parent)
    }
}

/// A non-image item, for selection filtering tests.
pub(crate) fn non_image(id: &str, kind: ItemKind) -> BoardItem {
    BoardItem {
        kind,
        ..image(id, 0.0, 0.0)
    }
}

#[derive(Default)]
struct CallCounters {
    selection: AtomicUsize,
    container: AtomicUsize,
    content: AtomicUsize,
    data_url: AtomicUsize,
}

/// Scripted in-memory host
pub(crate) struct ScriptedHost {
    selection: Vec<BoardItem>,
    selection_error: Option<String>,
    containers: HashMap<ItemId, ContainerInfo>,
    originals: HashMap<ItemId, ImageContent>,
    data_urls: HashMap<ItemId, String>,
    surface_available: bool,
    counters: CallCounters,
    notifications: Mutex<Vec<(NotifyLevel, String)>>,
}

impl ScriptedHost {
    pub(crate) fn new(selection: Vec<BoardItem>) -> Self {
        Self {
            selection,
            selection_error: None,
            containers: HashMap::new(),
            originals: HashMap::new(),
            data_urls: HashMap::new(),
            surface_available: true,
            counters: CallCounters::default(),
            notifications: Mutex::new(Vec::new()),
        }
    }

    /// Clone of the scripted selection, for feeding the grouper directly.
    pub(crate) fn selection_items(&self) -> Vec<BoardItem> {
        self.selection.clone()
    }

    pub(crate) fn add_container(&mut self, id: &str, title: Option<&str>, x: f64, y: f64) {
        self.containers.insert(
            ItemId::new(id),
            ContainerInfo {
                title: title.map(String::from),
                x,
                y,
            },
        );
    }

    /// Register a primary-path payload for an item.
    pub(crate) fn add_original(&mut self, id: &str, bytes: &[u8], content_type: Option<&str>) {
        self.originals.insert(
            ItemId::new(id),
            ImageContent {
                bytes: bytes.to_vec(),
                content_type: content_type.map(String::from),
            },
        );
    }

    /// Register a fallback data URL for an item (primary path will fail).
    pub(crate) fn add_data_url(&mut self, id: &str, url: &str) {
        self.data_urls.insert(ItemId::new(id), url.to_string());
    }

    pub(crate) fn fail_selection(&mut self, reason: &str) {
        self.selection_error = Some(reason.to_string());
    }

    pub(crate) fn set_surface_available(&mut self, available: bool) {
        self.surface_available = available;
    }

    pub(crate) fn selection_calls(&self) -> usize {
        self.counters.selection.load(Ordering::SeqCst)
    }

    pub(crate) fn container_calls(&self) -> usize {
        self.counters.container.load(Ordering::SeqCst)
    }

    pub(crate) fn content_calls(&self) -> usize {
        self.counters.content.load(Ordering::SeqCst)
    }

    pub(crate) fn data_url_calls(&self) -> usize {
        self.counters.data_url.load(Ordering::SeqCst)
    }

    pub(crate) fn notifications(&self) -> Vec<(NotifyLevel, String)> {
        self.notifications.lock().expect("notifications lock").clone()
    }
}

#[async_trait]
impl BoardHost for ScriptedHost {
    async fn get_selection(&self) -> Result<Vec<BoardItem>> {
        self.counters.selection.fetch_add(1, Ordering::SeqCst);
        match &self.selection_error {
            Some(reason) => Err(Error::Board {
                operation: "get_selection".into(),
                reason: reason.clone(),
            }),
            None => Ok(self.selection.clone()),
        }
    }

    async fn get_container(&self, id: &ItemId) -> Result<ContainerInfo> {
        self.counters.container.fetch_add(1, Ordering::SeqCst);
        self.containers.get(id).cloned().ok_or_else(|| Error::Board {
            operation: "get_container".into(),
            reason: format!("container {id} not found"),
        })
    }

    async fn get_original_content(&self, id: &ItemId) -> Result<ImageContent> {
        self.counters.content.fetch_add(1, Ordering::SeqCst);
        self.originals.get(id).cloned().ok_or_else(|| Error::Board {
            operation: "get_original_content".into(),
            reason: format!("original content unavailable for {id}"),
        })
    }

    async fn get_original_data_url(&self, id: &ItemId) -> Result<String> {
        self.counters.data_url.fetch_add(1, Ordering::SeqCst);
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
        self.surface_available
    }
}
