use crate::dto::session_dto::SessionResponse;
use crate::models::{LoginForm, RegistrationForm, UserRole};
use crate::services::session_service::SharedSession;
use crate::store::SharedFleetStore;
use crate::utils::errors::AppResult;

pub struct SessionController {
    session: SharedSession,
    store: SharedFleetStore,
}

impl SessionController {
    pub fn new(session: SharedSession, store: SharedFleetStore) -> Self {
        Self { session, store }
    }

    pub async fn current(&self) -> SessionResponse {
        let session = self.session.read().await;
        let store = self.store.read().await;
        SessionResponse::from_state(session.state(), session.effective_user(&store))
    }

    pub async fn select_role(&self, role: UserRole) -> AppResult<SessionResponse> {
        self.session.write().await.select_role(role)?;
        Ok(self.current().await)
    }

    pub async fn switch_to_login(&self) -> AppResult<SessionResponse> {
        self.session.write().await.switch_to_login()?;
        Ok(self.current().await)
    }

    pub async fn back_to_selection(&self) -> AppResult<SessionResponse> {
        self.session.write().await.back_to_selection()?;
        Ok(self.current().await)
    }

    pub async fn register(&self, form: RegistrationForm) -> AppResult<SessionResponse> {
        self.session.write().await.register(form)?;
        Ok(self.current().await)
    }

    pub async fn login(&self, form: LoginForm) -> AppResult<SessionResponse> {
        self.session.write().await.login(form)?;
        Ok(self.current().await)
    }

    pub async fn logout(&self) -> SessionResponse {
        self.session.write().await.logout();
        self.current().await
    }
}
