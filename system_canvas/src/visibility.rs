//! Layer visibility policy.
//!
//! Layers switch on in a fixed order (ui first, infra last) as complexity
//! rises, regardless of the active domain. A focused layer overrides the
//! progressive reveal: it is shown fully and every other layer is dimmed.

use narrative_state::{clamp_unit, Layer};
use serde::{Deserialize, Serialize};

/// Opacity of layers that are not the focused one.
pub const DIMMED_OPACITY: f64 = 0.1;

/// Opacity a layer starts at the moment it is revealed.
pub const REVEAL_FLOOR: f64 = 0.3;

/// How fast opacity climbs once a layer is past its threshold.
pub const REVEAL_RATE: f64 = 0.7;

/// Complexity at which a layer starts to show.
pub fn reveal_threshold(layer: Layer) -> f64 {
    (layer.index() + 1) as f64 * 0.25
}

/// Opacity in `[0, 1]` for a layer.
pub fn opacity_for(layer: Layer, complexity: f64, focus: Option<Layer>) -> f64 {
    match focus {
        Some(focused) if focused == layer => 1.0,
        Some(_) => DIMMED_OPACITY,
        None => {
            let complexity = clamp_unit(complexity);
            let threshold = reveal_threshold(layer);
            if complexity < threshold {
                0.0
            } else {
                (REVEAL_FLOOR + (complexity - threshold) * REVEAL_RATE).min(1.0)
            }
        }
    }
}

/// Opacity of all four layers for one state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LayerOpacities {
    pub ui: f64,
    pub api: f64,
    pub data: f64,
    pub infra: f64,
}

impl LayerOpacities {
    pub fn compute(complexity: f64, focus: Option<Layer>) -> Self {
        Self {
            ui: opacity_for(Layer::Ui, complexity, focus),
            api: opacity_for(Layer::Api, complexity, focus),
            data: opacity_for(Layer::Data, complexity, focus),
            infra: opacity_for(Layer::Infra, complexity, focus),
        }
    }

    pub fn get(&self, layer: Layer) -> f64 {
        match layer {
            Layer::Ui => self.ui,
            Layer::Api => self.api,
            Layer::Data => self.data,
            Layer::Infra => self.infra,
        }
    }

    /// Whether anything on this layer should be drawn.
    pub fn is_visible(&self, layer: Layer) -> bool {
        self.get(layer) > 0.0
    }

    /// Layers with nonzero opacity, in reveal order.
    pub fn visible_layers(&self) -> Vec<Layer> {
        Layer::ORDERED
            .into_iter()
            .filter(|layer| self.is_visible(*layer))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(reveal_threshold(Layer::Ui), 0.25);
        assert_eq!(reveal_threshold(Layer::Api), 0.5);
        assert_eq!(reveal_threshold(Layer::Data), 0.75);
        assert_eq!(reveal_threshold(Layer::Infra), 1.0);
    }

    #[test]
    fn test_focus_overrides_reveal() {
        for complexity in [0.0, 0.4, 1.0] {
            assert_eq!(opacity_for(Layer::Data, complexity, Some(Layer::Data)), 1.0);
            assert_eq!(opacity_for(Layer::Ui, complexity, Some(Layer::Data)), 0.1);
        }
    }

    #[test]
    fn test_progressive_reveal() {
        assert_eq!(opacity_for(Layer::Ui, 0.2, None), 0.0);
        assert_eq!(opacity_for(Layer::Ui, 0.25, None), 0.3);
        assert!((opacity_for(Layer::Ui, 0.5, None) - 0.475).abs() < 1e-9);
        assert!((opacity_for(Layer::Ui, 1.0, None) - 0.825).abs() < 1e-9);
    }

    #[test]
    fn test_infra_extremes() {
        assert_eq!(opacity_for(Layer::Infra, 0.0, None), 0.0);
        let full = opacity_for(Layer::Infra, 1.0, None);
        assert!((0.3..=1.0).contains(&full));
    }

    #[test]
    fn test_layer_opacities() {
        let opacities = LayerOpacities::compute(0.6, None);
        assert_eq!(opacities.visible_layers(), vec![Layer::Ui, Layer::Api]);
        assert!(!opacities.is_visible(Layer::Data));

        let focused = LayerOpacities::compute(0.0, Some(Layer::Infra));
        assert_eq!(focused.get(Layer::Infra), 1.0);
        assert_eq!(focused.visible_layers().len(), 4);
    }
}
