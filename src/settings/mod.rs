//! Configuration loading and resolution.
//!
//! [`load`] layers the default config files, `--config` files, `TELEGREP__*`
//! environment variables, and CLI flags, then validates the result into a
//! [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;
mod util;

pub(crate) use loader::load;
pub(crate) use resolved::ResolvedConfig;
