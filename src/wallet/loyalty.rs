use anyhow::Result;
use sui_sdk::{
    rpc_types::{
        SuiMoveStruct, SuiObjectDataFilter, SuiObjectDataOptions, SuiObjectResponse,
        SuiObjectResponseQuery, SuiParsedData,
    },
    types::base_types::SuiAddress,
};
use tracing::debug;

use super::client::Wallet;
use super::provider::OwnedObject;
use super::types::LoyaltyCard;
use super::utils::{extract_address_field, extract_url_field};
use crate::constants::{FIELD_CUSTOMER_ID, FIELD_IMAGE_URL, LOYALTY_MODULE, LOYALTY_STRUCT, OWNED_OBJECTS_PAGE_LIMIT};

pub fn loyalty_struct_type(package_id: &str) -> String {
    format!("{}::{}::{}", package_id, LOYALTY_MODULE, LOYALTY_STRUCT)
}

impl OwnedObject {
    pub fn from_response(obj: &SuiObjectResponse) -> Self {
        let data = obj.data.as_ref();
        let fields = data
            .and_then(|data| data.content.as_ref())
            .and_then(|content| match content {
                SuiParsedData::MoveObject(move_obj) => match &move_obj.fields {
                    SuiMoveStruct::WithFields(fields) => Some(fields.clone()),
                    SuiMoveStruct::WithTypes { fields, .. } => Some(fields.clone()),
                    _ => None,
                },
                _ => None,
            });

        OwnedObject {
            object_id: data.map(|data| data.object_id.to_string()),
            fields,
        }
    }
}

impl LoyaltyCard {
    /// None when the id or either content field is missing.
    pub fn from_owned_object(obj: &OwnedObject) -> Option<LoyaltyCard> {
        let id = obj.object_id.clone()?;
        let fields = obj.fields.as_ref()?;
        let recipient = extract_address_field(fields, FIELD_CUSTOMER_ID)?;
        let image_url = extract_url_field(fields, FIELD_IMAGE_URL)?;

        Some(LoyaltyCard {
            id,
            recipient,
            image_url,
        })
    }
}

impl Wallet {
    // Walk every page of the owner's objects of one struct type
    pub async fn get_owned_objects_of_type(
        &self,
        owner: SuiAddress,
        struct_type: &str,
        options: SuiObjectDataOptions,
    ) -> Result<Vec<OwnedObject>> {
        let filter = SuiObjectDataFilter::StructType(sui_sdk::types::parse_sui_struct_tag(struct_type)?);

        let mut objects = Vec::new();
        let mut cursor = None;
        loop {
            let page = self
                .client
                .read_api()
                .get_owned_objects(
                    owner,
                    Some(SuiObjectResponseQuery::new(
                        Some(filter.clone()),
                        Some(options.clone()),
                    )),
                    cursor,
                    Some(OWNED_OBJECTS_PAGE_LIMIT),
                )
                .await?;

            objects.extend(page.data.iter().map(OwnedObject::from_response));
            debug!(count = page.data.len(), has_next = page.has_next_page, "owned objects page");

            if !page.has_next_page || page.next_cursor.is_none() {
                break;
            }
            cursor = page.next_cursor;
        }

        Ok(objects)
    }
}
