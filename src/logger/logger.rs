use anyhow::{Result, anyhow};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

pub struct Logger {
    reload_handle: reload::Handle<EnvFilter, Registry>,
}

impl Logger {
    /// Install the global subscriber with a coarse bootstrap filter. Call
    /// once, before settings are available.
    pub fn bootstrap() -> Self {
        let (filter, reload_handle) = reload::Layer::new(EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();

        Self { reload_handle }
    }

    /// Swap in the filter from the parsed settings.
    pub fn reload(&self, filter: &str) -> Result<()> {
        let filter = EnvFilter::try_new(filter).map_err(|e| anyhow!(e))?;
        self.reload_handle.reload(filter).map_err(|e| anyhow!(e))?;
        Ok(())
    }
}
