//! Test fixtures: board items, data URLs, and archive read-back

use std::io::{Cursor, Read};

use base64::Engine as _;

use board_export::{BoardItem, Config, ItemId, ItemKind};

/// A root-level, untitled image
pub fn image(id: &str, x: f64, y: f64) -> BoardItem {
    BoardItem {
        id: ItemId::new(id),
        kind: ItemKind::Image,
        title: None,
        parent_id: None,
        x,
        y,
    }
}

/// An image inside a container
pub fn framed_image(id: &str, parent: &str, x: f64, y: f64) -> BoardItem {
    BoardItem {
        parent_id: Some(ItemId::new(parent)),
        ..image(id, x, y)
    }
}

/// A titled image, optionally inside a container
pub fn titled_image(id: &str, title: &str, parent: Option<&str>, x: f64, y: f64) -> BoardItem {
    BoardItem {
        title: Some(title.to_string()),
        parent_id: parent.map(ItemId::new),
        ..image(id, x, y)
    }
}

/// A base64 data URL carrying the given payload
pub fn data_url(mime: &str, payload: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(payload);
    format!("data:{mime};base64,{encoded}")
}

/// A config with pacing disabled, for fast test runs
pub fn unpaced_config() -> Config {
    let mut config = Config::default();
    config.pacing.delay_between_calls_ms = 0;
    config
}

/// Read every entry (name, content) out of finished archive bytes, in
/// archive order
pub fn read_archive(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes.to_vec())).expect("artifact must be a valid ZIP");
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).expect("entry must be readable");
        let mut content = Vec::new();
        file.read_to_end(&mut content).expect("entry content");
        entries.push((file.name().to_string(), content));
    }
    entries
}

/// Entry names only, in archive order
pub fn archive_names(bytes: &[u8]) -> Vec<String> {
    read_archive(bytes).into_iter().map(|(name, _)| name).collect()
}
