//! Dock client implementation
//!
//! The dock owns its pinned-app list; we only ask it to add or remove a
//! desktop file. Calls are sent without waiting for a reply.

use crate::error::DockError;
use log::{debug, info, warn};
use std::fmt;
use tokio::runtime::Handle;
use zbus::Connection;

/// D-Bus proxy for the dock interface
#[zbus::proxy(
    interface = "org.cutefish.Dock",
    default_service = "org.cutefish.Dock",
    default_path = "/Dock"
)]
trait DockService {
    #[zbus(no_reply)]
    fn add(&self, desktop: &str) -> zbus::Result<()>;

    #[zbus(no_reply)]
    fn remove(&self, desktop: &str) -> zbus::Result<()>;
}

/// Requests the dock understands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DockRequest {
    Add,
    Remove,
}

impl fmt::Display for DockRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DockRequest::Add => f.write_str("add"),
            DockRequest::Remove => f.write_str("remove"),
        }
    }
}

/// Something that forwards dock requests. Calls must not block.
pub trait DockNotifier: Send + Sync {
    fn notify(&self, request: DockRequest, desktop: &str);

    fn add(&self, desktop: &str) {
        self.notify(DockRequest::Add, desktop);
    }

    fn remove(&self, desktop: &str) {
        self.notify(DockRequest::Remove, desktop);
    }
}

/// Dock client on the session bus
pub struct DockClient {
    proxy: DockServiceProxy<'static>,
    runtime: Handle,
}

impl DockClient {
    /// Connect to the session bus. Must be called from within a tokio runtime.
    pub async fn connect(service: &str, path: &str) -> Result<Self, DockError> {
        let runtime = Handle::try_current().map_err(|_| DockError::NoRuntime)?;
        let connection = Connection::session().await?;

        let proxy = DockServiceProxy::builder(&connection)
            .destination(service.to_string())?
            .path(path.to_string())?
            .build()
            .await?;

        info!("Dock client ready for {} at {}", service, path);
        Ok(Self { proxy, runtime })
    }
}

impl DockNotifier for DockClient {
    fn notify(&self, request: DockRequest, desktop: &str) {
        let proxy = self.proxy.clone();
        let desktop = desktop.to_string();

        self.runtime.spawn(async move {
            debug!("Sending dock {} for {}", request, desktop);
            let result = match request {
                DockRequest::Add => proxy.add(&desktop).await,
                DockRequest::Remove => proxy.remove(&desktop).await,
            };

            if let Err(e) = result {
                warn!("Dock {} for {} failed: {}", request, desktop, e);
            }
        });
    }
}
