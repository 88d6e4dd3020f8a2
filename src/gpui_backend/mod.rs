//! GPUI integration for gpui_ruler.
//!
//! This module provides a GPUI view that renders a [`Plot`](crate::plot::Plot)
//! with a [`Ruler`](crate::ruler::Ruler) on top, forwarding mouse and key
//! events to the ruler and reusing the cached background while a ruler is
//! dragged.

#![allow(clippy::collapsible_if)]

mod config;
mod frame;
mod paint;
mod text;
mod view;

pub use config::ViewConfig;
pub use view::{GpuiRulerView, RulerHandle};
