use serde::{Deserialize, Serialize};

use crate::models::{Capability, PortalView, User, UserRole};
use crate::services::session_service::{AuthFlow, SessionState};

// Request para elegir rol
#[derive(Debug, Deserialize)]
pub struct SelectRoleRequest {
    pub role: UserRole,
}

// Estado de la sesión tal como lo consume la capa de presentación
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<AuthFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<PortalView>,
    pub capabilities: Vec<Capability>,
}

impl SessionResponse {
    /// `effective_user` es el usuario ya resuelto contra la flota
    pub fn from_state(state: &SessionState, effective_user: Option<User>) -> Self {
        match state {
            SessionState::Anonymous => Self {
                state: state.name(),
                role: None,
                flow: None,
                user: None,
                view: None,
                capabilities: Vec::new(),
            },
            SessionState::RoleChosen { role, flow } => Self {
                state: state.name(),
                role: Some(*role),
                flow: Some(*flow),
                user: None,
                view: None,
                capabilities: Vec::new(),
            },
            SessionState::Authenticated(user) => Self {
                state: state.name(),
                role: Some(user.role),
                flow: None,
                view: user.role.view(),
                capabilities: user.role.capabilities().to_vec(),
                user: effective_user.or_else(|| Some(user.clone())),
            },
        }
    }
}
