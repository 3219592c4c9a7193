//! Scroll-driven effects for the page
//!
//! ## Atoms
//! - `easing` - Pure easing curves for anchor scrolling
//! - `timing` - Progress and interpolation helpers over page time
//! - `parallax` - Offset transforms for decorative graphics
//! - `nav` - Active section lookup for the navigation bar
//!
//! ## Composites
//! - `animation` - Smooth anchor-scroll animator
//! - `coordinator` - Frame-throttled recomputation of every scroll effect
//!
//! # Usage
//!
//! ```ignore
//! let mut coordinator = ScrollCoordinator::new();
//!
//! // Any number of scroll events per frame...
//! if coordinator.on_scroll(offset) {
//!     frames.request(FrameTask::ScrollEffects);
//! }
//!
//! // ...collapse into one recomputation when the frame runs
//! let offset = coordinator.run_frame();
//! let effects = ScrollEffects::compute(offset, &inputs);
//! ```

// Atoms
pub mod easing;
pub mod nav;
pub mod parallax;
pub mod timing;

// Composites
pub mod animation;
pub mod coordinator;

pub use animation::AnchorScroll;
pub use coordinator::{FrameState, ScrollCoordinator, ScrollEffects, ScrollInputs};
pub use easing::EasingTypeExt;
pub use nav::active_section;
pub use parallax::{ParallaxLayer, Transform};
