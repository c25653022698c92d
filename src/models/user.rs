//! Modelo de usuario de sesión
//!
//! Roles, capacidades por rol y los formularios de registro/login.
//! No hay verificación real de credenciales: el usuario se construye localmente.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Passenger,
    Manager,
    Driver,
    Guest,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Passenger => "passenger",
            UserRole::Manager => "manager",
            UserRole::Driver => "driver",
            UserRole::Guest => "guest",
        }
    }

    /// Identificador fijo que recibe el usuario de cada rol
    pub fn user_id(&self) -> &'static str {
        match self {
            UserRole::Passenger => "p1",
            UserRole::Manager => "mgr1",
            UserRole::Driver => "d1",
            UserRole::Guest => "guest",
        }
    }

    /// Nombre por defecto cuando el formulario no trae uno
    pub fn default_name(&self) -> &'static str {
        match self {
            UserRole::Manager => "Admin",
            _ => "User",
        }
    }

    /// Vista que corresponde al rol. Guest no tiene vista propia.
    pub fn view(&self) -> Option<PortalView> {
        match self {
            UserRole::Passenger => Some(PortalView::Passenger),
            UserRole::Manager => Some(PortalView::Manager),
            UserRole::Driver => Some(PortalView::Driver),
            UserRole::Guest => None,
        }
    }

    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            UserRole::Passenger => &[Capability::ViewFleet, Capability::SearchBuses],
            UserRole::Manager => &[
                Capability::ViewFleet,
                Capability::SearchBuses,
                Capability::ViewStats,
                Capability::SetBusStatus,
                Capability::PatchDriver,
            ],
            UserRole::Driver => &[Capability::ViewAssignment, Capability::ToggleOwnTracking],
            UserRole::Guest => &[],
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-rol de pasajero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassengerSubRole {
    #[default]
    Student,
    Faculty,
    Parent,
}

/// Vista de portal que expone la capa de presentación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalView {
    Passenger,
    Manager,
    Driver,
}

/// Operaciones que el gate de roles permite o niega
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewFleet,
    SearchBuses,
    ViewStats,
    SetBusStatus,
    PatchDriver,
    ViewAssignment,
    ToggleOwnTracking,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ViewFleet => "view_fleet",
            Capability::SearchBuses => "search_buses",
            Capability::ViewStats => "view_stats",
            Capability::SetBusStatus => "set_bus_status",
            Capability::PatchDriver => "patch_driver",
            Capability::ViewAssignment => "view_assignment",
            Capability::ToggleOwnTracking => "toggle_own_tracking",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Usuario de la sesión activa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub role: UserRole,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_role: Option<PassengerSubRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Formulario de registro de pasajero
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[validate(length(min = 1, message = "First name is required."))]
    pub name: String,

    #[validate(length(min = 1, message = "Surname is required."))]
    pub surname: String,

    #[serde(default)]
    pub sub_role: PassengerSubRole,

    #[validate(length(min = 1, message = "College ID is required."))]
    pub college_id: String,

    pub password: String,

    pub confirm_password: String,
}

impl RegistrationForm {
    /// Orden en que se reportan los campos requeridos
    pub const FIELD_ORDER: &'static [&'static str] = &["name", "surname", "college_id"];
}

/// Formulario de login. El rol elegido decide qué campos se exigen:
/// el conductor solo da su teléfono, el resto college ID + password.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[serde(default)]
    pub college_id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_capabilities() {
        assert!(UserRole::Manager.can(Capability::PatchDriver));
        assert!(UserRole::Manager.can(Capability::SetBusStatus));
        assert!(!UserRole::Passenger.can(Capability::SetBusStatus));
        assert!(UserRole::Driver.can(Capability::ToggleOwnTracking));
        assert!(!UserRole::Driver.can(Capability::ViewStats));
        assert!(UserRole::Guest.capabilities().is_empty());
    }

    #[test]
    fn test_role_defaults() {
        assert_eq!(UserRole::Manager.default_name(), "Admin");
        assert_eq!(UserRole::Passenger.default_name(), "User");
        assert_eq!(UserRole::Driver.user_id(), "d1");
        assert_eq!(UserRole::Guest.view(), None);
    }

    #[test]
    fn test_registration_form_required_fields() {
        let form = RegistrationForm {
            name: String::new(),
            surname: "Doe".to_string(),
            college_id: "C-1".to_string(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(!errors.field_errors().contains_key("surname"));
    }

    #[test]
    fn test_role_serde_lowercase() {
        let role: UserRole = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(role, UserRole::Manager);
        assert_eq!(serde_json::to_string(&PassengerSubRole::Faculty).unwrap(), "\"faculty\"");
    }
}
