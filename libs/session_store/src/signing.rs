use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{SessionError, SessionId};

type HmacSha256 = Hmac<Sha256>;

const MIN_SECRET_LEN: usize = 32;

/// Signs session ids for the cookie and verifies them on the way back in.
///
/// Cookie values have the form `<session id>.<hex hmac-sha256>`.
#[derive(Clone)]
pub struct SessionSigner {
    mac: HmacSha256,
}

impl SessionSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, SessionError> {
        let secret = secret.as_ref();
        if secret.len() < MIN_SECRET_LEN {
            return Err(SessionError::Config(format!(
                "session secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| SessionError::Config(format!("invalid session secret: {e}")))?;
        Ok(Self { mac })
    }

    pub fn sign(&self, id: &SessionId) -> String {
        let mut mac = self.mac.clone();
        mac.update(id.as_str().as_bytes());
        format!("{}.{}", id, hex::encode(mac.finalize().into_bytes()))
    }

    /// Returns the session id when the signature checks out.
    pub fn verify(&self, value: &str) -> Option<SessionId> {
        let (raw_id, signature) = value.split_once('.')?;
        let id = SessionId::parse(raw_id)?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(id.as_str().as_bytes());
        mac.verify_slice(&signature).ok()?;
        Some(id)
    }
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner").finish_non_exhaustive()
    }
}
