//! # sva_overlay - Display Lists for Tactical Overlays
//!
//! Renders [`sva_core::FrameSnapshot`]s into backend-neutral
//! [`DisplayList`]s: lines, polygons, ellipses, rounded rectangles and text
//! in paint order. A host rasterizes the list with whatever canvas it has.
//!
//! ```ignore
//! use sva_core::RenderAdapter;
//! use sva_overlay::DisplayListRenderer;
//!
//! let mut renderer = DisplayListRenderer::new(1920, 1080);
//! let list = renderer.render(&snapshot);
//! let json = list.to_json()?;
//! ```

pub mod board;
pub mod display_list;
pub mod renderer;

pub use board::{passes_board, possession_board, SplitBar};
pub use display_list::{Corners, DisplayList, DrawCommand, TextAnchor};
pub use renderer::{DisplayListRenderer, OverlayStyle};
