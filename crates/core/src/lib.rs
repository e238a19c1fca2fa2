pub mod context;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod types;

pub use context::{SessionStateStore, ToolContext};
pub use envelope::{ErrorInfo, ToolResult};
pub use error::{codes, RegistryError, ToolError};
pub use registry::{ToolFn, ToolRegistry};
pub use types::{
    Address, AddressKind, Contact, ContactRef, Conversation, DeliveryItem, Memo, Message,
    MessageStatus, Phone, SessionState,
};
