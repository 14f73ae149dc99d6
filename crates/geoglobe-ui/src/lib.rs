//! UI layer for geoglobe using egui.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]

pub mod integration;
pub mod panels;

pub use integration::{screen_descriptor, EguiIntegration};
pub use panels::*;
