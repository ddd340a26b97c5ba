//! Infrastructure implementation of the marketplace API ports over HTTP.
//!
//! Every call goes through [`HttpMarketplaceApi::send`], which attaches the
//! bearer token, logs the exchange and turns failures into [`ApiError`].
//! Loose response shapes are normalized by the `agentmart-common` envelopes.

use agentmart_common::{
    Agent, AuthGrant, AuthRequest, Credential, CredentialEcho, CredentialRef, CredentialUpdate,
    DataEnvelope, ErrorBody, Listing, NewCredential, OptionalData, PrebuiltTeam, PrebuiltTeams,
    Team, TeamCreateRequest, TeamCreated,
};
use anyhow::Result;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::ports::{ApiError, AuthApi, CatalogApi, CredentialApi, TeamApi};
use crate::domain::session::Session;

/// Marketplace client bound to one base URL and, optionally, one session.
#[derive(Debug, Clone)]
pub struct HttpMarketplaceApi {
    client: Client,
    base_url: String,
    bearer: Option<String>,
}

impl HttpMarketplaceApi {
    /// Create a client for `base_url`. Requests carry the session's token
    /// when one is given.
    #[must_use]
    pub fn new(base_url: &str, session: Option<&Session>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer: session.map(Session::bearer),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send one request and return the raw body of a successful response.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<String, ApiError> {
        let mut request = self.client.request(method.clone(), self.url(path));
        if let Some(bearer) = &self.bearer {
            request = request.header(reqwest::header::AUTHORIZATION, bearer);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        tracing::debug!(%method, %path, "api request");
        let response = request.send().await.map_err(|e| ApiError::Unreachable {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Unreachable {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!(%method, %path, status = status.as_u16(), "api response");

        let error_body = serde_json::from_str::<ErrorBody>(&text).ok();
        if !status.is_success() {
            tracing::warn!(%method, %path, status = status.as_u16(), "api call rejected");
            return Err(ApiError::rejected(
                status.as_u16(),
                error_body.as_ref().and_then(ErrorBody::message),
            ));
        }
        if error_body.as_ref().is_some_and(|b| b.success == Some(false)) {
            return Err(ApiError::rejected(
                status.as_u16(),
                error_body.as_ref().and_then(ErrorBody::message),
            ));
        }
        Ok(text)
    }

    /// Send and decode the response body as `T`.
    async fn fetch<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.send(method, path, body).await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::Malformed {
                endpoint: path.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.fetch::<T, ()>(Method::GET, path, None).await
    }
}

impl CredentialApi for HttpMarketplaceApi {
    async fn list_credentials(&self) -> Result<Vec<Credential>> {
        let listing: Listing<Credential> = self.get("/credentials").await?;
        Ok(listing.into_vec())
    }

    /// The echo may be partial or absent; blanks are left for the caller.
    async fn store_credential(&self, credential: &NewCredential) -> Result<Credential> {
        let text = self
            .send(Method::POST, "/credentials", Some(credential))
            .await?;
        if text.trim().is_empty() {
            return Ok(CredentialEcho::default().into());
        }
        let envelope: OptionalData<CredentialEcho> =
            serde_json::from_str(&text).map_err(|e| ApiError::Malformed {
                endpoint: "/credentials".to_string(),
                reason: e.to_string(),
            })?;
        Ok(envelope.data.unwrap_or_default().into())
    }

    async fn update_credential(&self, update: &CredentialUpdate) -> Result<()> {
        self.send(Method::PUT, "/credentials", Some(update)).await?;
        Ok(())
    }

    async fn delete_credential(&self, credential: &CredentialRef) -> Result<()> {
        self.send(Method::DELETE, "/credentials", Some(credential))
            .await?;
        Ok(())
    }
}

impl CatalogApi for HttpMarketplaceApi {
    async fn list_agents(&self) -> Result<Vec<Agent>> {
        let listing: Listing<Agent> = self.get("/agents").await?;
        Ok(listing.into_vec())
    }

    async fn prebuilt_teams(&self) -> Result<Vec<PrebuiltTeam>> {
        let teams: PrebuiltTeams = self.get("/agents/teams").await?;
        Ok(teams.into_teams())
    }
}

impl TeamApi for HttpMarketplaceApi {
    async fn list_teams(&self) -> Result<Vec<Team>> {
        let listing: Listing<Team> = self.get("/teams").await?;
        Ok(listing.into_vec())
    }

    async fn create_team(&self, request: &TeamCreateRequest) -> Result<TeamCreated> {
        let envelope: DataEnvelope<TeamCreated> = self
            .fetch(Method::POST, "/teams/recruit", Some(request))
            .await?;
        Ok(envelope.data)
    }
}

impl AuthApi for HttpMarketplaceApi {
    async fn sign_up(&self, request: &AuthRequest) -> Result<AuthGrant> {
        let envelope: DataEnvelope<AuthGrant> = self
            .fetch(Method::POST, "/auth/signup", Some(request))
            .await?;
        Ok(envelope.data)
    }

    async fn sign_in(&self, request: &AuthRequest) -> Result<AuthGrant> {
        let envelope: DataEnvelope<AuthGrant> = self
            .fetch(Method::POST, "/auth/signin", Some(request))
            .await?;
        Ok(envelope.data)
    }

    async fn sign_out(&self) -> Result<()> {
        self.send::<()>(Method::POST, "/auth/signout", None).await?;
        Ok(())
    }
}
