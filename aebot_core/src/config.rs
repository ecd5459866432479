use std::str::FromStr;

use anyhow::Context;

pub type Assign<T> = fn(&mut T, String) -> anyhow::Result<()>;

/// Builds a `T` from its default, overwriting a field for every key that is set.
///
/// Missing keys keep the default. A value the assign function rejects is an
/// error naming the key.
pub fn load_from_env<T: Default + std::fmt::Debug>(
    keys: &[(&str, Assign<T>)],
) -> anyhow::Result<T> {
    let get = |key: &str| {
        log::trace!("looking up {key}");
        match std::env::var(key) {
            Ok(val) => Ok(Some(val)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(err) => Err(err).with_context(|| anyhow::anyhow!("key '{key}' is not unicode")),
        }
    };

    log::trace!("loading env vars for: {}", std::any::type_name::<T>());

    let this = keys.iter().try_fold(T::default(), |mut this, (key, func)| {
        match get(*key)? {
            Some(val) => func(&mut this, val)
                .with_context(|| anyhow::anyhow!("invalid value for '{key}'"))?,
            None => log::trace!("'{key}' is not set, keeping the default"),
        }
        anyhow::Ok(this)
    });

    if let Ok(this) = &this {
        log::debug!("created: {:?}", this);
    }
    this
}

pub fn parse<V>(val: &str) -> anyhow::Result<V>
where
    V: FromStr,
    V::Err: std::error::Error + Send + Sync + 'static,
{
    val.trim()
        .parse()
        .with_context(|| anyhow::anyhow!("cannot parse '{val}'"))
}

pub fn parse_flag(val: &str) -> anyhow::Result<bool> {
    match &*val.trim().to_ascii_lowercase() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => anyhow::bail!("'{val}' is not a flag"),
    }
}

pub trait LoadFromEnv
where
    Self: Sized,
{
    fn load_from_env() -> anyhow::Result<Self>;
}
