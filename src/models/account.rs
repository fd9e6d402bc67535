/// An ad account to report on, as resolved from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AdAccount {
    /// Environment variable the ID was read from.
    pub slot: String,
    pub id: String,
    /// Campaign names decide the brand label for this account.
    pub brand_override: bool,
}

impl AdAccount {
    pub fn new(slot: &str, id: impl Into<String>, brand_override: bool) -> Self {
        Self {
            slot: slot.to_string(),
            id: id.into(),
            brand_override,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;

    pub(crate) fn mock_account(id: &str) -> AdAccount {
        AdAccount::new("THC", id, false)
    }

    pub(crate) fn mock_override_account(id: &str) -> AdAccount {
        AdAccount::new("LM", id, true)
    }
}
