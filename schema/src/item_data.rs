use crate::StatusType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// A ball. `modifier` scales the capture rate.
    CaptureDevice { modifier: f64 },
    /// Restores up to `heal` health and/or cures one status.
    Medicine {
        heal: Option<u16>,
        cures: Option<StatusType>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemData {
    pub name: String,
    pub kind: ItemKind,
}

impl ItemData {
    pub fn is_capture_device(&self) -> bool {
        matches!(self.kind, ItemKind::CaptureDevice { .. })
    }
}
