use std::time::Duration;

/// Canonical address record, whichever provider produced it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    /// Postal code without hyphen
    pub zip_code: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    /// Two-letter federative unit
    pub state: String,
}

/// Result of a decided race
#[derive(Debug, Clone)]
pub struct RaceOutcome {
    /// Name of the winning provider
    pub provider: String,
    /// Address reported by the winner
    pub address: Address,
    /// Time from race start until the winner answered
    pub elapsed: Duration,
}

impl RaceOutcome {
    /// Human-readable report: winner line followed by the record dump
    pub fn report(&self) -> String {
        format!("Fastest API: {}\n{:#?}", self.provider, self.address)
    }
}
