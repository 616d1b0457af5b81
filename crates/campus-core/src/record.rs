/// A resource the backend stores and identifies by an opaque id.
pub trait Record {
    /// Singular noun used in prompts and log lines ("course", "student").
    const KIND: &'static str;

    /// The server-assigned id, absent on a draft.
    fn id(&self) -> Option<&str>;

    /// Short label for lists and confirmation prompts.
    fn label(&self) -> String;
}

/// Deserializes a string field the backend may send as `null`.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
