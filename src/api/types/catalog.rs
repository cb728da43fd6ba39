//! Catalog query parameters

use serde::Deserialize;

/// `?name=`
#[derive(Debug, Clone, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

/// `?capability=`
#[derive(Debug, Clone, Deserialize)]
pub struct CapabilityQuery {
    pub capability: String,
}

/// `?size=`
#[derive(Debug, Clone, Deserialize)]
pub struct SizeQuery {
    pub size: String,
}
