//! Slider state for the reporting form.

use crate::{
    report::ResourceLevels,
    status::{self, ResourceKind, ResourceLevel, StatusCategory},
};

/// Four slider positions plus the slider that has focus.
#[derive(Clone, Debug)]
pub struct FormState {
    /// Current positions.
    levels: ResourceLevels,
    /// Index into `ResourceKind::ALL`.
    selected: usize,
}

impl FormState {
    /// Start with the given positions and the first slider focused.
    pub fn new(levels: ResourceLevels) -> Self {
        Self {
            levels,
            selected: 0,
        }
    }

    /// Slider with focus.
    pub fn selected_kind(&self) -> ResourceKind {
        ResourceKind::ALL[self.selected]
    }

    /// Focus the next slider, wrapping to the top.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % ResourceKind::ALL.len();
    }

    /// Focus the previous slider, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        let n = ResourceKind::ALL.len();
        self.selected = (self.selected + n - 1) % n;
    }

    pub fn level(&self, kind: ResourceKind) -> ResourceLevel {
        self.levels.get(kind)
    }

    pub fn set(&mut self, kind: ResourceKind, level: ResourceLevel) {
        *self.levels.get_mut(kind) = level;
    }

    /// Move the focused slider by `delta` points and return the new level.
    pub fn adjust_selected(&mut self, delta: i32) -> ResourceLevel {
        let kind = self.selected_kind();
        let level = self.level(kind).offset(delta);
        self.set(kind, level);
        level
    }

    /// Snapshot for the payload builder.
    pub fn levels(&self) -> ResourceLevels {
        self.levels
    }

    /// Live label and color for one slider.
    pub fn category(&self, kind: ResourceKind) -> StatusCategory {
        status::classify(kind, self.level(kind))
    }

    /// Live text for one slider, e.g. `"45% - HALF FULL"`.
    pub fn line(&self, kind: ResourceKind) -> String {
        status::status_line(kind, self.level(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormState {
        FormState::new(ResourceLevels {
            capacity: ResourceLevel::new(50),
            food: ResourceLevel::new(50),
            water: ResourceLevel::new(50),
            medical: ResourceLevel::new(50),
        })
    }

    #[test]
    fn test_selection_wraps() {
        let mut f = form();
        assert_eq!(f.selected_kind(), ResourceKind::Capacity);
        f.select_prev();
        assert_eq!(f.selected_kind(), ResourceKind::Medical);
        f.select_next();
        f.select_next();
        assert_eq!(f.selected_kind(), ResourceKind::Food);
    }

    #[test]
    fn test_adjust_only_touches_selected_slider() {
        let mut f = form();
        f.select_next();
        assert_eq!(f.adjust_selected(-35).percent(), 15);
        assert_eq!(f.level(ResourceKind::Food).percent(), 15);
        assert_eq!(f.level(ResourceKind::Capacity).percent(), 50);
        assert_eq!(f.line(ResourceKind::Food), "15% - CRITICAL");
    }

    #[test]
    fn test_adjust_saturates() {
        let mut f = form();
        assert_eq!(f.adjust_selected(80), ResourceLevel::MAX);
        assert_eq!(f.category(ResourceKind::Capacity).label, "FULL");
        assert_eq!(f.adjust_selected(-500), ResourceLevel::MIN);
        assert_eq!(f.category(ResourceKind::Capacity).label, "EMPTY");
    }

    #[test]
    fn test_last_change_wins() {
        let mut f = form();
        f.set(ResourceKind::Water, ResourceLevel::new(10));
        f.set(ResourceKind::Water, ResourceLevel::new(85));
        assert_eq!(f.levels().water.percent(), 85);
        assert_eq!(f.line(ResourceKind::Water), "85% - ABUNDANT");
    }
}
