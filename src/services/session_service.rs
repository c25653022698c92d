//! Gate de sesión y roles
//!
//! Máquina de estados `anonymous → role-chosen → authenticated`. Los
//! formularios se validan pero no se verifica ninguna credencial: el login
//! solo construye el `User` local. Un fallo de validación nunca cambia el
//! estado.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use validator::Validate;

use crate::models::{
    Capability, LoginForm, PassengerSubRole, PortalView, RegistrationForm, User, UserRole,
};
use crate::store::FleetStore;
use crate::utils::validation::{
    error_message, first_message, validate_not_empty, validate_password,
    validate_password_confirmation,
};

/// Handle compartido de la sesión activa
pub type SharedSession = Arc<RwLock<Session>>;

/// Errores del gate de sesión
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Mensaje para mostrar al usuario; el estado no cambia
    #[error("{0}")]
    Validation(String),

    #[error("Role '{0}' cannot be selected")]
    RoleNotSelectable(UserRole),

    #[error("No active session")]
    NotAuthenticated,

    #[error("Role '{role}' is not allowed to {capability}")]
    Forbidden { role: UserRole, capability: Capability },

    #[error("Cannot {action} while {state}")]
    InvalidTransition { state: &'static str, action: &'static str },
}

/// Sub-flujo que se abre al elegir rol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthFlow {
    Register,
    Login,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    RoleChosen { role: UserRole, flow: AuthFlow },
    Authenticated(User),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Anonymous => "anonymous",
            SessionState::RoleChosen { .. } => "role-chosen",
            SessionState::Authenticated(_) => "authenticated",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Campo opcional del formulario: vacío pasa a `None`, el resto se guarda tal cual
fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl Session {
    pub fn new() -> Self {
        Self { state: SessionState::Anonymous }
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn view(&self) -> Option<PortalView> {
        self.current_user().and_then(|u| u.role.view())
    }

    /// Elegir rol. Pasajero abre el registro; manager y conductor el login.
    /// Desde `role-chosen` se puede volver a elegir.
    pub fn select_role(&mut self, role: UserRole) -> Result<AuthFlow, SessionError> {
        if let SessionState::Authenticated(_) = self.state {
            return Err(self.invalid("select a role"));
        }
        if role == UserRole::Guest {
            return Err(SessionError::RoleNotSelectable(role));
        }

        let flow = if role == UserRole::Passenger { AuthFlow::Register } else { AuthFlow::Login };
        debug!("🎭 Rol elegido: {} ({:?})", role, flow);
        self.state = SessionState::RoleChosen { role, flow };
        Ok(flow)
    }

    /// Pasar del registro al login (pasajero que ya tiene cuenta)
    pub fn switch_to_login(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::RoleChosen { role, .. } => {
                self.state = SessionState::RoleChosen { role, flow: AuthFlow::Login };
                Ok(())
            }
            _ => Err(self.invalid("switch to login")),
        }
    }

    /// Volver a la selección de rol
    pub fn back_to_selection(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::RoleChosen { .. } => {
                self.state = SessionState::Anonymous;
                Ok(())
            }
            _ => Err(self.invalid("go back to role selection")),
        }
    }

    /// Registro de pasajero
    pub fn register(&mut self, form: RegistrationForm) -> Result<User, SessionError> {
        let role = match self.state {
            SessionState::RoleChosen { role, flow: AuthFlow::Register } => role,
            _ => return Err(self.invalid("register")),
        };

        form.validate()
            .map_err(|e| SessionError::Validation(first_message(&e, RegistrationForm::FIELD_ORDER)))?;
        validate_password(&form.password).map_err(|e| SessionError::Validation(error_message(&e)))?;
        validate_password_confirmation(&form.password, &form.confirm_password)
            .map_err(|e| SessionError::Validation(error_message(&e)))?;

        let user = User {
            id: role.user_id().to_string(),
            role,
            name: non_empty(&form.name).unwrap_or_else(|| role.default_name().to_string()),
            surname: non_empty(&form.surname),
            college_id: non_empty(&form.college_id),
            sub_role: Some(form.sub_role),
            phone: None,
        };
        Ok(self.authenticate(user))
    }

    /// Login: conductor con teléfono, el resto con college ID + password
    pub fn login(&mut self, form: LoginForm) -> Result<User, SessionError> {
        let role = match self.state {
            SessionState::RoleChosen { role, flow: AuthFlow::Login } => role,
            _ => return Err(self.invalid("log in")),
        };

        let phone = form.phone.unwrap_or_default();
        let college_id = form.college_id.unwrap_or_default();
        let password = form.password.unwrap_or_default();

        if role == UserRole::Driver {
            validate_not_empty(&phone)
                .map_err(|_| SessionError::Validation("Mobile number is required.".to_string()))?;
        } else {
            validate_not_empty(&college_id)
                .map_err(|_| SessionError::Validation("College ID is required.".to_string()))?;
            validate_password(&password).map_err(|e| SessionError::Validation(error_message(&e)))?;
        }

        let user = User {
            id: role.user_id().to_string(),
            role,
            name: role.default_name().to_string(),
            surname: None,
            college_id: non_empty(&college_id),
            sub_role: (role == UserRole::Passenger).then(PassengerSubRole::default),
            phone: non_empty(&phone),
        };
        Ok(self.authenticate(user))
    }

    /// Cerrar sesión. Siempre vuelve a `anonymous`.
    pub fn logout(&mut self) {
        if let SessionState::Authenticated(user) = &self.state {
            info!("👋 Sesión cerrada: {} ({})", user.name, user.role);
        }
        self.state = SessionState::Anonymous;
    }

    /// Usuario autenticado con la capacidad pedida
    pub fn require(&self, capability: Capability) -> Result<&User, SessionError> {
        let user = self.current_user().ok_or(SessionError::NotAuthenticated)?;
        if !user.role.can(capability) {
            return Err(SessionError::Forbidden { role: user.role, capability });
        }
        Ok(user)
    }

    /// Usuario tal como se muestra: si es conductor, el nombre sale de la
    /// fila del conductor para reflejar las ediciones del manager.
    pub fn effective_user(&self, store: &FleetStore) -> Option<User> {
        let user = self.current_user()?;
        let mut effective = user.clone();
        if user.role == UserRole::Driver {
            if let Some(driver) = store.driver(&user.id) {
                effective.name = driver.name.clone();
            }
        }
        Some(effective)
    }

    fn authenticate(&mut self, user: User) -> User {
        info!("✅ Sesión iniciada: {} ({})", user.name, user.role);
        self.state = SessionState::Authenticated(user.clone());
        user
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition { state: self.state.name(), action }
    }
}
