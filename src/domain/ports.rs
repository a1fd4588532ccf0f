use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of named configuration values.
///
/// `get` fails with `AppError::MissingConfigError` naming the key when the
/// value is absent or empty.
pub trait ConfigProvider: Send + Sync {
    fn get(&self, key: &str) -> Result<String>;

    fn get_optional(&self, key: &str) -> Option<String> {
        self.get(key).ok()
    }

    /// Raw value as stored, `Some("")` included. `None` only when the key is unset.
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).ok()
    }
}

impl<C: ConfigProvider + ?Sized> ConfigProvider for std::sync::Arc<C> {
    fn get(&self, key: &str) -> Result<String> {
        (**self).get(key)
    }

    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<C: ConfigProvider + ?Sized> ConfigProvider for Box<C> {
    fn get(&self, key: &str) -> Result<String> {
        (**self).get(key)
    }

    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<C: ConfigProvider + ?Sized> ConfigProvider for &C {
    fn get(&self, key: &str) -> Result<String> {
        (**self).get(key)
    }

    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Sends a magic-link email for an already-validated address.
#[async_trait]
pub trait MagicLinkSender: Send + Sync {
    async fn send_magic_link(&self, email: &str) -> Result<()>;
}
