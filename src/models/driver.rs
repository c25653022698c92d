//! Modelo de Driver
//! 
//! Conductores de la flota y el patch parcial que aplica el manager.

use serde::{Deserialize, Serialize};

/// Conductor. `bus_id` es solo informativo, no se usa para navegar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub bus_id: String,
}

/// Actualización parcial de un conductor: solo se tocan los campos presentes
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl DriverPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}

impl Driver {
    pub fn apply(&mut self, patch: DriverPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> Driver {
        Driver {
            id: "d1".to_string(),
            name: "Driver A".to_string(),
            phone: "+1 555-01010".to_string(),
            bus_id: "b1".to_string(),
        }
    }

    #[test]
    fn test_apply_partial_patch() {
        let mut d = driver();
        d.apply(DriverPatch { name: None, phone: Some("+1 555-9999".to_string()) });
        assert_eq!(d.name, "Driver A");
        assert_eq!(d.phone, "+1 555-9999");
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut d = driver();
        let patch = DriverPatch::default();
        assert!(patch.is_empty());
        d.apply(patch);
        assert_eq!(d, driver());
    }
}
