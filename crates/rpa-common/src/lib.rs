pub mod errors;
pub mod events;
pub mod notifications;

pub use errors::{BridgeError, ConfigError, PanelError, PlatformError, RpaError};
pub use events::{Event, EventBus, ELEMENT_EVENT_CHANNEL};
pub use notifications::{Toast, ToastLevel, ToastQueue};

pub type Result<T> = std::result::Result<T, RpaError>;
