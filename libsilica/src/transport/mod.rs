// libsilica/src/transport/mod.rs

//! Transport seam between sessions and the platform NFC stack.

pub mod mock;
pub mod traits;

pub use mock::{MockTag, MockTransport};
pub use traits::{close_quietly, Tag, Transport};
