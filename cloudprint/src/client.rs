use cloudprint_core::{Context, Result};
use cloudprint_google::{AuthManager, Authorization, Config};

use crate::connection::Connection;
use crate::print_job::PrintJobCollection;
use crate::printer::PrinterCollection;

/// Client is the entry point: it owns the credentials, the connection and
/// the printer and print job collections built on top of it.
///
/// ```no_run
/// # async fn example() -> cloudprint_core::Result<()> {
/// use cloudprint::{default_context, Client, Config};
///
/// let config = Config::new()
///     .with_client_id("client-id")
///     .with_client_secret("client-secret")
///     .with_refresh_token("1//refresh-token");
/// let client = Client::new(default_context(), config)?;
///
/// for job in client.print_jobs().all().await? {
///     println!("{} {}", job.id(), job.status());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    ctx: Context,
    config: Config,
    auth: AuthManager,
    connection: Connection,
    printers: PrinterCollection,
    print_jobs: PrintJobCollection,
}

impl Client {
    /// Create a new client.
    ///
    /// Fails with an authentication error if service account credentials are
    /// configured but cannot be parsed. No network call is made.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let auth = AuthManager::from_config(ctx.clone(), &config)?;
        let connection = Connection::new(ctx.clone(), auth.clone());

        Ok(Self {
            ctx,
            config,
            auth,
            printers: PrinterCollection::new(connection.clone()),
            print_jobs: PrintJobCollection::new(connection.clone()),
            connection,
        })
    }

    /// Create a new client from `CLOUDPRINT_*` environment variables.
    pub fn from_env(ctx: Context) -> Result<Self> {
        let config = Config::from_env(&ctx);
        Self::new(ctx, config)
    }

    /// Point the client at another print service base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.connection = self.connection.with_base_url(base_url);
        self.printers = PrinterCollection::new(self.connection.clone());
        self.print_jobs = PrintJobCollection::new(self.connection.clone());
        self
    }

    /// The configuration the client was built from.
    ///
    /// Its `refresh_token` is the initial one; see [`Client::refresh_token`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The OAuth2 client ID.
    pub fn client_id(&self) -> Option<&str> {
        self.config.client_id.as_deref()
    }

    /// The OAuth2 client secret.
    pub fn client_secret(&self) -> Option<&str> {
        self.config.client_secret.as_deref()
    }

    /// The refresh token currently used for renewal.
    ///
    /// Shared with every clone of this client. `None` in service account mode.
    pub fn refresh_token(&self) -> Option<String> {
        self.auth.refresh_token()
    }

    /// The consent flow redirect URI.
    pub fn callback_url(&self) -> Option<&str> {
        self.config.callback_url.as_deref()
    }

    /// The consent flow access type.
    pub fn access_type(&self) -> Option<&str> {
        self.config.access_type.as_deref()
    }

    /// Whether the client authenticates with a service account.
    pub fn is_service_account(&self) -> bool {
        self.auth.is_service_account()
    }

    /// A currently-valid access token, renewed first if the cached one expired.
    pub async fn access_token(&self) -> Result<String> {
        self.auth.access_token().await
    }

    /// Whether the cached access token can be used right now.
    pub fn is_access_token_valid(&self) -> bool {
        self.auth.is_valid()
    }

    /// Replace the refresh token and renew the access token immediately.
    ///
    /// Configuration errors surface here instead of on the next API call.
    /// Clones of this client see the new token too.
    pub async fn set_refresh_token(&self, refresh_token: impl Into<String>) -> Result<()> {
        self.auth.set_refresh_token(refresh_token).await?;
        Ok(())
    }

    /// The user consent flow helper built from this client's configuration.
    pub fn auth(&self) -> Authorization {
        Authorization::from_config(&self.config)
    }

    /// Exchange an authorization code and install the resulting refresh token.
    pub async fn authorize(&self, code: &str) -> Result<()> {
        let refresh_token = self.auth().exchange_code(&self.ctx, code).await?;
        self.set_refresh_token(refresh_token).await
    }

    /// The token cache shared by the connection and the collections.
    pub fn auth_manager(&self) -> &AuthManager {
        &self.auth
    }

    /// The authorized connection to the print service.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Printers visible to the current credentials.
    pub fn printers(&self) -> &PrinterCollection {
        &self.printers
    }

    /// Print jobs visible to the current credentials.
    pub fn print_jobs(&self) -> &PrintJobCollection {
        &self.print_jobs
    }
}
