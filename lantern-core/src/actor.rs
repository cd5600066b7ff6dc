use uuid::Uuid;

/// Whoever triggered a crafting attempt.
///
/// Matchers and result functions receive `Option<&Actor>`; automated crafting
/// (hoppers, crafters, plugins) passes `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor {
    pub uuid: Uuid,
    pub name: String,
}

impl Actor {
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
        }
    }

    /// An offline-mode player, the uuid is derived from the name the same way
    /// offline servers do it.
    pub fn offline(name: &str) -> Self {
        let uuid = Uuid::new_v3(
            &Uuid::NAMESPACE_DNS,
            format!("OfflinePlayer:{name}").as_bytes(),
        );
        Self::new(uuid, name)
    }
}
