//! Indicator strings for the desktop overlay and the touch controls.

use voxelbox_blocks::{BlockKindId, REGISTRY};

pub fn selected_label(kind: BlockKindId) -> String {
    format!("Selected: {}", REGISTRY.name(kind))
}

pub fn mobile_selected_label(kind: BlockKindId) -> String {
    format!("Block: {}", REGISTRY.name(kind))
}

/// `#rrggbb` for the selected-kind indicator; white for unknown ids.
pub fn selected_color(kind: BlockKindId) -> String {
    REGISTRY
        .get(kind)
        .map(|k| k.color_hex())
        .unwrap_or_else(|| "#ffffff".to_string())
}

#[inline]
fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

pub fn fly_status(flying: bool) -> String {
    format!("Fly: {}", on_off(flying))
}

pub fn fly_toggle_hint(flying: bool) -> String {
    format!("F: Toggle Fly Mode ({})", on_off(flying))
}

pub fn vertical_hint(flying: bool) -> &'static str {
    if flying {
        "Space: Ascend / Shift: Descend"
    } else {
        "Space: Jump / Shift: (Slow)"
    }
}

pub fn jump_button_label(flying: bool) -> &'static str {
    if flying { "ASCEND" } else { "JUMP" }
}

pub fn crouch_button_label(flying: bool) -> &'static str {
    if flying { "DESCEND" } else { "CROUCH" }
}

/// Snapshot of every indicator, refreshed whenever selection or flight mode changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudStatus {
    pub selected: String,
    pub mobile_selected: String,
    pub selected_color: String,
    pub fly_status: String,
    pub fly_toggle_hint: String,
    pub vertical_hint: &'static str,
    pub jump_button: &'static str,
    pub crouch_button: &'static str,
}

impl HudStatus {
    pub fn new(kind: BlockKindId, flying: bool) -> Self {
        Self {
            selected: selected_label(kind),
            mobile_selected: mobile_selected_label(kind),
            selected_color: selected_color(kind),
            fly_status: fly_status(flying),
            fly_toggle_hint: fly_toggle_hint(flying),
            vertical_hint: vertical_hint(flying),
            jump_button: jump_button_label(flying),
            crouch_button: crouch_button_label(flying),
        }
    }
}
