//! Service registration for hosts that hand out shared or scoped instances

use crate::schema::SchemaCache;
use crate::service::ExcelUtil;
use std::sync::{Arc, OnceLock};

/// Hands out [`ExcelUtil`] instances for a host application
///
/// Create one at startup and keep it for the life of the host. Every
/// instance it hands out resolves schemas through the same cache.
#[derive(Debug, Default)]
pub struct Registrar {
    schemas: Arc<SchemaCache>,
    singleton: OnceLock<Arc<ExcelUtil>>,
}

impl Registrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// The one shared instance; created on first call, same `Arc` afterwards
    pub fn singleton(&self) -> Arc<ExcelUtil> {
        Arc::clone(
            self.singleton
                .get_or_init(|| Arc::new(ExcelUtil::with_cache(Arc::clone(&self.schemas)))),
        )
    }

    /// A fresh instance for one scope (request, job, ...)
    pub fn scoped(&self) -> ExcelUtil {
        ExcelUtil::with_cache(Arc::clone(&self.schemas))
    }

    pub fn schemas(&self) -> &Arc<SchemaCache> {
        &self.schemas
    }
}
