//! Paravel is a deterministic 2-D parallax scene engine.
//!
//! A [`SceneDocument`] describes a camera move over layered vector elements.
//! [`EditorState`] applies [`Command`]s to the document without ever
//! rejecting one, and [`Evaluator`] turns (document, frame) into a camera
//! pose plus a z-ordered draw list. Same inputs, same output, byte for byte.
#![forbid(unsafe_code)]

pub mod anim;
pub mod assets;
pub mod core;
pub mod editor;
pub mod error;
pub mod eval;
pub mod ids;
pub mod model;

pub use crate::anim::RotationMode;
pub use crate::core::{Affine, FrameIndex, Point, Vec2};
pub use crate::editor::{Command, EditorState};
pub use crate::error::{ParavelError, ParavelResult};
pub use crate::eval::{CameraPose, DrawItem, EvaluatedFrame, Evaluator};
pub use crate::ids::{ElementId, LayerId};
pub use crate::model::{CameraConfig, Element, Layer, ParallaxFactor, SceneDocument};
