pub mod listing;
pub mod post;

pub(crate) fn de_null_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    // the API sends `null` for some string fields instead of omitting them
    let value = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

pub(crate) mod macros {
    macro_rules! str_opt_ref {
        ($x:expr) => {
            $x.as_ref().map(|x| x.as_ref())
        };
    }

    pub(crate) use str_opt_ref;
}
