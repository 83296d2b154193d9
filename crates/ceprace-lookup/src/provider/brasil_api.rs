use serde::Deserialize;

use crate::{cep::strip_hyphens, provider::WireShape, types::Address};

/// `BrasilAPI` CEP v1 response body
#[derive(Debug, Deserialize)]
pub struct BrasilApiShape {
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

impl From<BrasilApiShape> for Address {
    fn from(shape: BrasilApiShape) -> Self {
        Self {
            zip_code: strip_hyphens(&shape.cep),
            street: shape.street,
            neighborhood: shape.neighborhood,
            city: shape.city,
            state: shape.state,
        }
    }
}

impl WireShape for BrasilApiShape {}
