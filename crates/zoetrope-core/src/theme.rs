//! Display themes and the non-recompiling theme transform.
//!
//! Scenes are authored against a single dark palette. The light theme is a
//! mechanical derivation: the transform gives the scene an opaque black
//! background and a whole-scene invert + hue-rotate filter, so dark areas
//! render light while hues keep their identity. No second authored palette
//! exists, and applying a theme never touches the compiler.

use serde::Deserialize;

use crate::{
    color::Color,
    scene::{ColorFilter, Scene},
};

/// The light theme's base color: black, so the invert filter turns it into
/// a white page background.
const LIGHT_BASE: &str = "black";

/// The two display themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Colors render as authored. The default.
    #[default]
    Dark,
    /// Derived from the dark palette by inversion.
    Light,
}

impl Theme {
    /// Applies this theme to a scene by rewriting its style block.
    ///
    /// The rewrite is idempotent (applying the same theme twice is a no-op)
    /// and reversible (switching back to [`Theme::Dark`] restores the
    /// authored rendering). The scene's nodes and edges are never touched.
    pub fn apply(self, scene: &mut Scene) {
        let style = scene.style_mut();
        match self {
            Theme::Dark => {
                style.set_background(None);
                style.set_filter(None);
            }
            Theme::Light => {
                let base = Color::new(LIGHT_BASE).expect("'black' is a valid CSS color");
                style.set_background(Some(base));
                style.set_filter(Some(ColorFilter::HueInvert));
            }
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        geometry::{Point, Size},
        scene::{Palette, SceneNode},
    };

    fn scene_strategy() -> impl Strategy<Value = Scene> {
        (1usize..6).prop_map(|count| {
            let palette = Palette::default();
            let nodes = (0..count)
                .map(|i| {
                    SceneNode::new(
                        format!("n{i}"),
                        format!("n{i}"),
                        Point::new(50.0, 50.0 + i as f32 * 100.0),
                        Size::new(60.0, 40.0),
                        &palette,
                    )
                })
                .collect();
            Scene::new(Size::new(200.0, count as f32 * 100.0 + 100.0), nodes, Vec::new())
        })
    }

    fn theme_strategy() -> impl Strategy<Value = Theme> {
        prop_oneof![Just(Theme::Dark), Just(Theme::Light)]
    }

    proptest! {
        /// Whatever sequence of theme switches ran before, the display
        /// state is a pure function of the last applied theme.
        #[test]
        fn last_theme_wins(scene in scene_strategy(), themes in prop::collection::vec(theme_strategy(), 1..10)) {
            let mut switched = scene.clone();
            for theme in &themes {
                theme.apply(&mut switched);
            }

            let mut direct = scene;
            themes.last().unwrap().apply(&mut direct);

            prop_assert_eq!(switched, direct);
        }

        /// Dark restores the authored rendering after any detour.
        #[test]
        fn dark_round_trip_restores_scene(scene in scene_strategy(), themes in prop::collection::vec(theme_strategy(), 0..10)) {
            let mut s = scene.clone();
            for theme in &themes {
                theme.apply(&mut s);
            }
            Theme::Dark.apply(&mut s);

            prop_assert_eq!(s, scene);
        }
    }
}
