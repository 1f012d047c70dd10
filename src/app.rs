//! Application wiring.
//!
//! [`Taiga`] owns the resolved configuration, the token store and the
//! shared transport, and hands out one typed client per resource. Building
//! one resolves configuration first; nothing talks to the API until that
//! has succeeded.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::api::interceptor::{default_chain, SessionExpiredHook};
use crate::api::resources::{
    ApplicationTokensApi, ApplicationsApi, AuthApi, IssueStatusesApi, IssuesApi, LocalesApi,
    MembershipsApi, NotifyPoliciesApi, ProjectsApi, ResolverApi, TaskStatusesApi, TasksApi,
    UsersApi, WebhookLogsApi, WebhooksApi,
};
use crate::api::token_store::{FileTokenStore, KeyringTokenStore, TokenStore};
use crate::api::HttpClient;
use crate::config::{Config, ConfigError, Settings, TokenStorage};
use crate::error::Result;

/// A ready-to-use Taiga client.
#[derive(Clone)]
pub struct Taiga {
    config: Arc<Config>,
    tokens: Arc<dyn TokenStore>,
    http: Arc<HttpClient>,
    auth: AuthApi,
    users: UsersApi,
    applications: ApplicationsApi,
    application_tokens: ApplicationTokensApi,
    locales: LocalesApi,
    memberships: MembershipsApi,
    notify_policies: NotifyPoliciesApi,
    projects: ProjectsApi,
    issue_statuses: IssueStatusesApi,
    task_statuses: TaskStatusesApi,
    issues: IssuesApi,
    tasks: TasksApi,
    webhooks: WebhooksApi,
    webhook_logs: WebhookLogsApi,
    resolver: ResolverApi,
}

impl Taiga {
    /// Load settings, resolve configuration and build every client.
    ///
    /// Fails if configuration cannot be resolved; no client is built in
    /// that case.
    #[instrument(skip_all, fields(environment = %settings.environment))]
    pub async fn bootstrap(settings: &Settings, hook: Option<SessionExpiredHook>) -> Result<Self> {
        let config = Config::fetch(settings).await?;
        let tokens = token_store(settings)?;
        let timeout = Duration::from_secs(settings.timeout_secs);
        let taiga = Self::assemble(config, tokens, timeout, hook)?;
        info!(api_url = %taiga.config.api_url(), "Client ready");
        Ok(taiga)
    }

    /// Build every client around an already-resolved configuration.
    pub fn assemble(
        config: Config,
        tokens: Arc<dyn TokenStore>,
        timeout: Duration,
        hook: Option<SessionExpiredHook>,
    ) -> Result<Self> {
        let chain = default_chain(tokens.clone(), hook);
        debug!(interceptors = chain.len(), "Building transport");
        let http = Arc::new(HttpClient::new(&config, timeout, chain)?);
        let config = Arc::new(config);

        Ok(Self {
            auth: AuthApi::new(http.clone(), config.clone(), tokens.clone()),
            users: UsersApi::new(http.clone(), config.clone()),
            applications: ApplicationsApi::new(http.clone(), config.clone()),
            application_tokens: ApplicationTokensApi::new(http.clone(), config.clone()),
            locales: LocalesApi::new(http.clone(), config.clone()),
            memberships: MembershipsApi::new(http.clone(), config.clone()),
            notify_policies: NotifyPoliciesApi::new(http.clone(), config.clone()),
            projects: ProjectsApi::new(http.clone(), config.clone()),
            issue_statuses: IssueStatusesApi::new(http.clone(), config.clone()),
            task_statuses: TaskStatusesApi::new(http.clone(), config.clone()),
            issues: IssuesApi::new(http.clone(), config.clone()),
            tasks: TasksApi::new(http.clone(), config.clone()),
            webhooks: WebhooksApi::new(http.clone(), config.clone()),
            webhook_logs: WebhookLogsApi::new(http.clone(), config.clone()),
            resolver: ResolverApi::new(http.clone(), config.clone()),
            config,
            tokens,
            http,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// Check whether a session token is stored.
    pub fn is_logged_in(&self) -> bool {
        self.tokens.has_token()
    }

    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub fn users(&self) -> &UsersApi {
        &self.users
    }

    pub fn applications(&self) -> &ApplicationsApi {
        &self.applications
    }

    pub fn application_tokens(&self) -> &ApplicationTokensApi {
        &self.application_tokens
    }

    pub fn locales(&self) -> &LocalesApi {
        &self.locales
    }

    pub fn memberships(&self) -> &MembershipsApi {
        &self.memberships
    }

    pub fn notify_policies(&self) -> &NotifyPoliciesApi {
        &self.notify_policies
    }

    pub fn projects(&self) -> &ProjectsApi {
        &self.projects
    }

    pub fn issue_statuses(&self) -> &IssueStatusesApi {
        &self.issue_statuses
    }

    pub fn task_statuses(&self) -> &TaskStatusesApi {
        &self.task_statuses
    }

    pub fn issues(&self) -> &IssuesApi {
        &self.issues
    }

    pub fn tasks(&self) -> &TasksApi {
        &self.tasks
    }

    pub fn webhooks(&self) -> &WebhooksApi {
        &self.webhooks
    }

    pub fn webhook_logs(&self) -> &WebhookLogsApi {
        &self.webhook_logs
    }

    pub fn resolver(&self) -> &ResolverApi {
        &self.resolver
    }
}

impl fmt::Debug for Taiga {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Taiga")
            .field("config", &self.config)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

/// Pick the token store named by the settings.
pub fn token_store(settings: &Settings) -> Result<Arc<dyn TokenStore>> {
    Ok(match settings.token_storage {
        TokenStorage::Keyring => Arc::new(KeyringTokenStore::new()),
        TokenStorage::File => {
            let path = match &settings.token_path {
                Some(path) => path.clone(),
                None => FileTokenStore::default_path().ok_or(ConfigError::NoConfigDir)?,
            };
            debug!(path = %path.display(), "Using file token store");
            Arc::new(FileTokenStore::new(path))
        }
    })
}
