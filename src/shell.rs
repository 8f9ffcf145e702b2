//! Passive state owned by the surrounding shell: connectivity, install
//! availability and offline-cache registration. None of it changes how the
//! library behaves; it only feeds labels and button visibility.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CacheRegistration {
    #[default]
    Unknown,
    Registered,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct ShellStatus {
    online: bool,
    installable: bool,
    cache: CacheRegistration,
}

impl ShellStatus {
    pub fn new(online: bool) -> Self {
        Self {
            online,
            ..Default::default()
        }
    }

    pub fn update_status(&mut self, online: bool) {
        if self.online != online {
            log::info!("Connectivity changed: {}", if online { "online" } else { "offline" });
        }
        self.online = online;
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn status_label(&self) -> &'static str {
        if self.online {
            "Online"
        } else {
            "Offline"
        }
    }

    /// Whether the install button should be shown
    pub fn is_installable(&self) -> bool {
        self.installable
    }

    pub fn set_installable(&mut self, installable: bool) {
        self.installable = installable;
    }

    /// Consume the pending install offer; `false` when there was none
    pub fn trigger_install(&mut self) -> bool {
        if !self.installable {
            return false;
        }
        self.installable = false;
        log::info!("Install prompt triggered");
        true
    }

    pub fn record_cache_registration(&mut self, result: Result<(), String>) {
        self.cache = match result {
            Ok(()) => {
                log::info!("Offline cache registered");
                CacheRegistration::Registered
            }
            Err(e) => {
                log::warn!("Offline cache registration failed: {}", e);
                CacheRegistration::Failed(e)
            }
        };
    }

    pub fn cache_registration(&self) -> &CacheRegistration {
        &self.cache
    }
}
