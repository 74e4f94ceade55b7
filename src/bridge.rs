//! Bridge: one authentication abstraction, several platform implementations
//! it can be wired to.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;

const TOKEN_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub user: String,
    pub role: String,
    pub token: Option<String>,
}

/// Primitive operations every platform provides.
pub trait ApiImplementation {
    fn login(&self) -> String;
    fn get_user(&self) -> UserInfo;
}

/// Short type name, used as the role of the logged-in user.
fn role_of<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full).to_owned()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CloudApiImplementation;

impl ApiImplementation for CloudApiImplementation {
    fn login(&self) -> String {
        let UserInfo { user, role, .. } = self.get_user();
        format!("Logged to cloud platform as user {user} with role {role}")
    }

    fn get_user(&self) -> UserInfo {
        UserInfo {
            user: "CloudUser".to_owned(),
            role: role_of::<Self>(),
            token: None,
        }
    }
}

pub struct ExternalApiImplementation {
    rng: RefCell<StdRng>,
}

impl ExternalApiImplementation {
    pub fn new() -> Self {
        ExternalApiImplementation {
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic tokens, for tests.
    pub fn with_seed(seed: u64) -> Self {
        ExternalApiImplementation {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Six characters drawn from `A-Z` and `0-9`.
    fn issue_token(&self) -> String {
        let mut rng = self.rng.borrow_mut();
        (&mut *rng)
            .sample_iter(&Alphanumeric)
            .map(char::from)
            .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            .take(TOKEN_LEN)
            .collect()
    }
}

impl Default for ExternalApiImplementation {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiImplementation for ExternalApiImplementation {
    fn login(&self) -> String {
        let UserInfo { user, role, token } = self.get_user();
        format!(
            "Logged to cloud platform via external API token {} as {user} with role {role}",
            token.unwrap_or_default()
        )
    }

    fn get_user(&self) -> UserInfo {
        UserInfo {
            user: "ExternalUser".to_owned(),
            role: role_of::<Self>(),
            token: Some(self.issue_token()),
        }
    }
}

/// The "control" side of the bridge. Delegates all real work to its
/// implementation.
pub struct AbstractApi {
    implementation: Box<dyn ApiImplementation>,
}

impl AbstractApi {
    pub fn new(implementation: Box<dyn ApiImplementation>) -> Self {
        AbstractApi { implementation }
    }

    pub fn authenticate(&self) -> String {
        self.implementation.login()
    }
}

pub fn client_code(api: &AbstractApi) -> String {
    api.authenticate()
}
