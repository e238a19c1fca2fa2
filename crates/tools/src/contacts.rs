use serde_json::{json, Map, Value};

use mockline_core::{Contact, RegistryError, ToolContext, ToolError, ToolRegistry, ToolResult};

use crate::args::require_str;

pub fn register_contacts_tools(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register_tool("contacts.search", search_contacts)?;
    registry.register_tool("contacts.get", get_contact)?;
    Ok(())
}

/// Search contacts by name or phone substring, case-insensitive.
fn search_contacts(args: &Map<String, Value>, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
    let needle = require_str(args, "q")?.to_lowercase();
    ctx.state_store.with_session(ctx.session(), |state| {
        let matches: Vec<&Contact> = state
            .contacts
            .values()
            .filter(|contact| {
                contact.name.to_lowercase().contains(&needle)
                    || contact
                        .phones
                        .iter()
                        .any(|phone| phone.e164.to_lowercase().contains(&needle))
            })
            .collect();
        Ok(ToolResult::success(json!({ "contacts": matches })))
    })
}

fn get_contact(args: &Map<String, Value>, ctx: &ToolContext) -> Result<ToolResult, ToolError> {
    let contact_id = require_str(args, "contact_id")?;
    ctx.state_store.with_session(ctx.session(), |state| {
        let contact = state
            .contacts
            .get(contact_id)
            .ok_or_else(|| ToolError::not_found("Contact not found"))?;
        Ok(ToolResult::success(json!({ "contact": contact })))
    })
}
