//! Mint form fields and the rules that gate submission.

use std::collections::BTreeMap;

use sui_sdk::types::base_types::SuiAddress;

use crate::constants::INPUT_MAX_LEN;

/// Editable form fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    PackageId,
    Recipient,
    ImageUrl,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::PackageId, Field::Recipient, Field::ImageUrl];

    pub fn label(&self) -> &'static str {
        match self {
            Field::PackageId => "MOVE PACKAGE ID",
            Field::Recipient => "RECIPIENT WALLET ADDRESS",
            Field::ImageUrl => "IMAGE URL FOR NFT",
        }
    }

    pub fn next(self) -> Field {
        match self {
            Field::PackageId => Field::Recipient,
            Field::Recipient => Field::ImageUrl,
            Field::ImageUrl => Field::PackageId,
        }
    }

    pub fn previous(self) -> Field {
        match self {
            Field::PackageId => Field::ImageUrl,
            Field::Recipient => Field::PackageId,
            Field::ImageUrl => Field::Recipient,
        }
    }
}

/// Keys of a validation result. `Wallet` is not editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey {
    Wallet,
    PackageId,
    Recipient,
    ImageUrl,
}

impl From<Field> for ErrorKey {
    fn from(field: Field) -> Self {
        match field {
            Field::PackageId => ErrorKey::PackageId,
            Field::Recipient => ErrorKey::Recipient,
            Field::ImageUrl => ErrorKey::ImageUrl,
        }
    }
}

/// Field name to message. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<ErrorKey, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: ErrorKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: ErrorKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn insert(&mut self, key: ErrorKey, message: impl Into<String>) {
        self.0.insert(key, message.into());
    }

    pub fn remove(&mut self, key: ErrorKey) {
        self.0.remove(&key);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// A request that passed validation. Fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    package_id: String,
    recipient: String,
    image_url: String,
}

impl MintRequest {
    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}

#[derive(Debug, Clone, Default)]
pub struct MintForm {
    pub package_id: String,
    pub recipient: String,
    pub image_url: String,
    pub errors: ValidationErrors,
}

impl MintForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::PackageId => &self.package_id,
            Field::Recipient => &self.recipient,
            Field::ImageUrl => &self.image_url,
        }
    }

    /// Sets a field and clears only that field's error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::PackageId => self.package_id = value,
            Field::Recipient => self.recipient = value,
            Field::ImageUrl => self.image_url = value,
        }
        self.errors.remove(field.into());
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        let current = self.value(field);
        if current.chars().count() >= INPUT_MAX_LEN || c.is_control() {
            return;
        }
        let mut value = current.to_string();
        value.push(c);
        self.set_field(field, value);
    }

    pub fn pop_char(&mut self, field: Field) {
        let mut value = self.value(field).to_string();
        if value.pop().is_some() {
            self.set_field(field, value);
        }
    }

    pub fn validate(&self, account: Option<SuiAddress>) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        if account.is_none() {
            errors.insert(ErrorKey::Wallet, "CONNECT YOUR WALLET FIRST.");
        }
        if self.package_id.trim().is_empty() {
            errors.insert(ErrorKey::PackageId, "Package ID is required");
        }
        if self.recipient.trim().is_empty() {
            errors.insert(ErrorKey::Recipient, "Recipient address is required");
        }
        if self.image_url.trim().is_empty() {
            errors.insert(ErrorKey::ImageUrl, "Image URL is required");
        }
        errors
    }

    /// Validate and, on success, hand back the sender plus a trimmed request.
    pub fn validated(
        &self,
        account: Option<SuiAddress>,
    ) -> Result<(SuiAddress, MintRequest), ValidationErrors> {
        let errors = self.validate(account);
        match account {
            Some(sender) if errors.is_empty() => Ok((
                sender,
                MintRequest {
                    package_id: self.package_id.trim().to_string(),
                    recipient: self.recipient.trim().to_string(),
                    image_url: self.image_url.trim().to_string(),
                },
            )),
            _ => Err(errors),
        }
    }

    /// Whether the mint trigger should be enabled.
    pub fn is_ready(&self, account: Option<SuiAddress>) -> bool {
        self.validate(account).is_empty()
    }

    pub fn clear(&mut self) {
        self.package_id.clear();
        self.recipient.clear();
        self.image_url.clear();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> MintForm {
        let mut form = MintForm::new();
        form.set_field(Field::PackageId, "0xabc");
        form.set_field(Field::Recipient, "0xdef");
        form.set_field(Field::ImageUrl, "https://x/y.png");
        form
    }

    #[test]
    fn blank_fields_each_produce_an_error() {
        let account = Some(SuiAddress::random_for_testing_only());
        for field in Field::ALL {
            for blank in ["", "   ", "\t"] {
                let mut form = filled();
                form.set_field(field, blank);
                let errors = form.validate(account);
                assert_eq!(errors.len(), 1, "{:?} = {:?}", field, blank);
                assert!(errors.contains(field.into()));
                assert!(form.validated(account).is_err());
            }
        }
    }

    #[test]
    fn missing_wallet_is_reported() {
        let errors = filled().validate(None);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(ErrorKey::Wallet));
    }

    #[test]
    fn empty_form_without_wallet_reports_everything() {
        let errors = MintForm::new().validate(None);
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn validated_request_is_trimmed() {
        let sender = SuiAddress::random_for_testing_only();
        let mut form = filled();
        form.set_field(Field::Recipient, "  0xdef \n");
        let (got_sender, request) = form.validated(Some(sender)).unwrap();
        assert_eq!(got_sender, sender);
        assert_eq!(request.recipient(), "0xdef");
        assert_eq!(request.package_id(), "0xabc");
        assert_eq!(request.image_url(), "https://x/y.png");
    }

    #[test]
    fn editing_clears_only_that_fields_error() {
        let mut form = MintForm::new();
        form.errors = form.validate(None);
        form.push_char(Field::Recipient, '0');
        assert!(!form.errors.contains(ErrorKey::Recipient));
        assert!(form.errors.contains(ErrorKey::PackageId));
        assert!(form.errors.contains(ErrorKey::ImageUrl));
        assert!(form.errors.contains(ErrorKey::Wallet));
    }

    #[test]
    fn pop_char_on_empty_field_is_a_no_op() {
        let mut form = MintForm::new();
        form.errors.insert(ErrorKey::ImageUrl, "Image URL is required");
        form.pop_char(Field::ImageUrl);
        assert!(form.errors.contains(ErrorKey::ImageUrl));

        form.push_char(Field::ImageUrl, 'h');
        form.push_char(Field::ImageUrl, 'i');
        form.pop_char(Field::ImageUrl);
        assert_eq!(form.image_url, "h");
    }

    #[test]
    fn focus_order_wraps() {
        assert_eq!(Field::ImageUrl.next(), Field::PackageId);
        assert_eq!(Field::PackageId.previous(), Field::ImageUrl);
    }

    #[test]
    fn clear_resets_fields_and_errors() {
        let mut form = filled();
        form.errors.insert(ErrorKey::Wallet, "x");
        form.clear();
        assert!(form.package_id.is_empty());
        assert!(form.recipient.is_empty());
        assert!(form.image_url.is_empty());
        assert!(form.errors.is_empty());
    }
}
