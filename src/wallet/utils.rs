use std::collections::BTreeMap;

use sui_sdk::rpc_types::{SuiMoveStruct, SuiMoveValue};

use sui_sdk::types::base_types::SuiAddress;

use crate::transactions::parse_object_id;

// Helper method: extract string field
pub fn extract_string_field(fields: &BTreeMap<String, SuiMoveValue>, field_name: &str) -> Option<String> {
    if let Some(SuiMoveValue::String(value)) = fields.get(field_name) {
        Some(value.clone())
    } else {
        None
    }
}

// Helper method: extract address field, also accepting an address rendered as a string.
// Strings that do not parse as an address count as missing.
pub fn extract_address_field(fields: &BTreeMap<String, SuiMoveValue>, field_name: &str) -> Option<String> {
    let address = match fields.get(field_name)? {
        SuiMoveValue::Address(address) => *address,
        SuiMoveValue::String(value) if !value.trim().is_empty() => {
            SuiAddress::from(parse_object_id(value.trim()).ok()?)
        }
        _ => return None,
    };
    Some(address.to_string())
}

// Helper method: extract a url, either a plain string or a `Url { url }` struct
pub fn extract_url_field(fields: &BTreeMap<String, SuiMoveValue>, field_name: &str) -> Option<String> {
    match fields.get(field_name)? {
        SuiMoveValue::String(value) => Some(value.clone()),
        SuiMoveValue::Struct(SuiMoveStruct::WithFields(inner))
        | SuiMoveValue::Struct(SuiMoveStruct::WithTypes { fields: inner, .. }) => {
            extract_string_field(inner, "url")
        }
        _ => None,
    }
}
