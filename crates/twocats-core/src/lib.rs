pub mod config;
pub mod counter;
pub mod debounce;
pub mod error;
pub mod events;
pub mod form;
pub mod geometry;
pub mod notification;
pub mod page;
pub mod render;
pub mod reveal;
pub mod scheduler;
pub mod scroll;
pub mod site;

pub use config::{EasingType, ScrollConfig, SiteConfig, TimingConfig};
pub use error::{Error, Result};
pub use events::{EventSource, Scenario, ScriptedEvents, TimedEvent, UiEvent};
pub use notification::{NotificationKind, NotificationManager};
pub use page::{Page, PageManifest};
pub use render::PageView;
pub use site::Site;
