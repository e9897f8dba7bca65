use eyre::EyreHandler;
use itertools::Itertools;
use std::{error::Error, fmt};

/// Collects the messages of `error` and its sources, dropping those already contained in their
/// predecessor.
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes = eyre::Chain::new(error)
        .map(|cause| cause.to_string().trim().to_string())
        .collect::<Vec<_>>();
    // `msg1: msg2; msg2` -> `msg1: msg2`
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}

/// Reports errors as their deduplicated cause chain.
///
/// When `FUNDME_DEBUG` is set, `{:?}` goes through the `color-eyre` report instead.
pub struct Handler {
    verbose: Option<Box<dyn EyreHandler>>,
}

impl Handler {
    pub fn new(verbose: Option<Box<dyn EyreHandler>>) -> Self {
        Self { verbose }
    }
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        dedup_chain(error).into_iter().format("; ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(verbose) = &self.verbose {
            return verbose.debug(error, f);
        }

        let causes = dedup_chain(error);
        let Some((error, context)) = causes.split_first() else { return Ok(()) };
        write!(f, "{error}")?;
        if !context.is_empty() {
            write!(f, "\n\nContext:")?;
            for cause in context {
                write!(f, "\n- {cause}")?;
            }
        }
        Ok(())
    }
}

/// Installs the `eyre` hook and the `color-eyre` panic hook.
pub fn install() {
    if std::env::var_os("RUST_BACKTRACE").is_none() {
        unsafe {
            std::env::set_var("RUST_BACKTRACE", "1");
        }
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section("This is a bug in fundme, please report it with the command you ran.")
        .into_hooks();
    panic_hook.install();
    let eyre_hook = eyre_hook.into_eyre_hook();
    let verbose = std::env::var_os("FUNDME_DEBUG").is_some();
    if let Err(e) = eyre::set_hook(Box::new(move |e| {
        Box::new(Handler::new(verbose.then(|| eyre_hook(e))))
    })) {
        debug!("failed to install eyre error hook: {e}");
    }
}
