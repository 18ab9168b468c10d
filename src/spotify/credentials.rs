use std::fmt;

use base64::{Engine, engine::general_purpose::STANDARD};

/// Client id and secret registered with the Spotify developer dashboard.
///
/// The `Basic` header for the token endpoint is derived once on construction
/// and reused for every exchange and refresh.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredential {
    client_id: String,
    client_secret: String,
    basic_auth_header: String,
}

impl ClientCredential {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        let encoded = STANDARD.encode(format!("{}:{}", client_id, client_secret));

        Self {
            client_id,
            client_secret,
            basic_auth_header: format!("Basic {}", encoded),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// `Basic base64(client_id:client_secret)`
    pub fn basic_auth_header(&self) -> &str {
        &self.basic_auth_header
    }
}

// keep the secret out of logs
impl fmt::Debug for ClientCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredential")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}
