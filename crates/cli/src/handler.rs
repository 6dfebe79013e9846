use ethctl_common::errors::dedup_chain;
use eyre::EyreHandler;
use itertools::Itertools;
use std::{error::Error, fmt, panic::Location};

/// Environment variable switching reports to the detailed `color-eyre` format.
pub const DEBUG_ENV: &str = "ETHCTL_DEBUG";

/// How `ethctl` renders an [`eyre::Report`].
///
/// `Display` is always the deduplicated chain on one line, which is what the shell prints after
/// `Error:`. `Debug` is either a short "Context:" listing or the full `color-eyre` report.
pub enum Handler {
    /// Message followed by its causes.
    Plain,
    /// Delegates `Debug` to `color-eyre`, with span trace and backtrace.
    Detailed(Box<dyn EyreHandler>),
}

impl Handler {
    fn write_plain(error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain = dedup_chain(error);
        let Some((message, causes)) = chain.split_first() else {
            return fmt::Debug::fmt(error, f);
        };
        f.write_str(message)?;
        if !causes.is_empty() {
            f.write_str("\n\nContext:")?;
            for cause in causes {
                write!(f, "\n- {cause}")?;
            }
        }
        Ok(())
    }
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", dedup_chain(error).iter().format("; "))
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detailed(inner) => inner.debug(error, f),
            Self::Plain if f.alternate() => fmt::Debug::fmt(error, f),
            Self::Plain => Self::write_plain(error, f),
        }
    }

    fn track_caller(&mut self, location: &'static Location<'static>) {
        if let Self::Detailed(inner) = self {
            inner.track_caller(location);
        }
    }
}

/// Installs the report and panic hooks of `ethctl`.
///
/// Reports use [`Handler::Plain`] unless [`DEBUG_ENV`] is set. Panics always get the detailed
/// `color-eyre` output.
pub fn install() {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section("ethctl crashed, please open an issue at https://github.com/ethctl/ethctl")
        .into_hooks();
    panic_hook.install();

    let eyre_hook = eyre_hook.into_eyre_hook();
    let detailed = std::env::var_os(DEBUG_ENV).is_some();
    let installed = eyre::set_hook(Box::new(move |error| {
        Box::new(if detailed { Handler::Detailed(eyre_hook(error)) } else { Handler::Plain })
    }));
    if let Err(err) = installed {
        debug!(%err, "eyre hook already installed");
    }
}
