/// Hover hint that follows the pointer over the map.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CursorTooltip {
    hovering: bool,
    visible: bool,
    position: (f64, f64),
}

impl CursorTooltip {
    pub const TEXT: &'static str = "Click a spot to see details";

    pub fn new() -> Self {
        Self::default()
    }

    /// `detail_open` suppresses the hint while a detail panel covers the map.
    pub fn pointer_enter(&mut self, detail_open: bool) {
        self.hovering = true;
        self.visible = !detail_open;
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if self.hovering {
            self.position = (x, y);
        }
    }

    pub fn pointer_leave(&mut self) {
        self.hovering = false;
        self.visible = false;
    }

    pub fn force_hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible && self.hovering
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }
}
