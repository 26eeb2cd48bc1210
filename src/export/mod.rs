//! Static site export and asset checks.

pub(crate) mod assets;
pub(crate) mod opts;
pub(crate) mod site;
