use crate::config::ZakatConfig;
use crate::types::ZakatResult;

/// Trait to be implemented by anything the engine can assess.
///
/// Assessment cannot fail: inputs are normalized to zero before they reach
/// the engine and every rule variant has a defined table entry.
pub trait CalculateZakat {
    fn calculate_zakat(&self, config: &ZakatConfig) -> ZakatResult;

    /// Returns the label of the declaration, if any.
    fn get_label(&self) -> Option<String> {
        None
    }
}
