use crate::{Context, Result};
use std::fmt::Debug;

/// SigningCredential is the trait used to decide whether a cached credential can still be used.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is valid right now.
    ///
    /// Implementations must derive the answer from the current wall-clock time on every call.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential is the trait used to obtain a fresh credential from a remote endpoint.
///
/// Each strategy (refresh token, service account, ...) implements this trait once.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Exchange the configured secret material for a new credential.
    async fn provide_credential(&self, ctx: &Context) -> Result<Self::Credential>;
}
