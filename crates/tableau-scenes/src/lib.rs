//! Tableau scenes.
//!
//! Each scene implements [`tableau_engine::scene::Scene`] and can be handed to
//! a [`tableau_engine::scene::SceneDirector`].
//!
//! | Scene | Contents |
//! |-------|----------|
//! | [`ace_of_shadows`] | A deck of cards transferred one by one between two stacks |

pub mod ace_of_shadows;

pub use ace_of_shadows::{AceConfig, AceOfShadows};
