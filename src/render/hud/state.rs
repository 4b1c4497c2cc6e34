//! HUD panel visibility state management.

/// Panel visibility toggles
#[derive(Debug, Clone)]
pub struct HudState {
    /// Show the mode and animation controls (top-left)
    pub show_controls_panel: bool,
    /// Show the color legend for the active mode (top-right)
    pub show_legend_panel: bool,
    /// Show scene statistics (bottom-left)
    pub show_stats_panel: bool,
    /// Show help overlay (center, toggle with F1)
    pub show_help: bool,
    /// HUD enabled at all
    pub hud_enabled: bool,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            show_controls_panel: true,
            show_legend_panel: true,
            show_stats_panel: true,
            show_help: false,
            hud_enabled: true,
        }
    }
}

impl HudState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle HUD visibility entirely
    pub fn toggle_hud(&mut self) {
        self.hud_enabled = !self.hud_enabled;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_legend(&mut self) {
        self.show_legend_panel = !self.show_legend_panel;
    }

    pub fn toggle_stats(&mut self) {
        self.show_stats_panel = !self.show_stats_panel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles() {
        let mut state = HudState::new();
        assert!(state.hud_enabled && !state.show_help);
        state.toggle_hud();
        state.toggle_help();
        state.toggle_legend();
        assert!(!state.hud_enabled);
        assert!(state.show_help);
        assert!(!state.show_legend_panel);
        assert!(state.show_stats_panel);
        state.toggle_stats();
        assert!(!state.show_stats_panel);
    }
}
