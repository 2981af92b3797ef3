use farmstand_admin::SessionToken;

/// Authenticated admin context for a request.
///
/// Inserted by the admin middleware; present on every gated route.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AdminContext {
    token: SessionToken,
}

impl AdminContext {
    pub fn new(token: SessionToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }
}
