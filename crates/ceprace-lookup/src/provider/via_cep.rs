use serde::Deserialize;

use crate::{cep::strip_hyphens, provider::WireShape, types::Address};

/// `ViaCEP` JSON response body
#[derive(Debug, Deserialize)]
pub struct ViaCepShape {
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,
    /// Set to `true` (or `"true"`) by `ViaCEP` for unknown CEPs, with HTTP 200
    #[serde(default)]
    pub erro: Option<serde_json::Value>,
}

impl From<ViaCepShape> for Address {
    fn from(shape: ViaCepShape) -> Self {
        Self {
            zip_code: strip_hyphens(&shape.cep),
            street: shape.logradouro,
            neighborhood: shape.bairro,
            city: shape.localidade,
            state: shape.uf,
        }
    }
}

impl WireShape for ViaCepShape {
    fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag == "true",
            _ => false,
        }
    }
}
