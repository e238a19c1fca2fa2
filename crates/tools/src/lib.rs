pub mod admin;
pub mod contacts;
pub mod delivery;
pub mod memo;
pub mod messaging;
pub mod seeds;

mod args;

pub use admin::register_admin_tools;
pub use contacts::register_contacts_tools;
pub use delivery::DeliveryScheduler;
pub use memo::register_memo_tools;
pub use messaging::register_messaging_tools;
pub use seeds::{default_state_factory, state_factory_with_delay, DEFAULT_DELIVERY_DELAY_MS};

use mockline_core::{RegistryError, ToolRegistry};

/// Register every built-in service on the registry.
pub fn register_default_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    register_contacts_tools(registry)?;
    register_messaging_tools(registry)?;
    register_memo_tools(registry)?;
    register_admin_tools(registry)?;
    Ok(())
}
