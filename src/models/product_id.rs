use serde::de::{self, Deserialize, Deserializer};
use uuid::Uuid;

pub const UUID_VERSION_MESSAGE: &str = "UUID version 4 expected";

/// Identifier accepted in `/products/{id}`. Only random (version 4) UUIDs are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub Uuid);

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = Uuid::deserialize(deserializer)?;
        if id.get_version_num() != 4 {
            return Err(de::Error::custom(UUID_VERSION_MESSAGE));
        }
        Ok(ProductId(id))
    }
}
