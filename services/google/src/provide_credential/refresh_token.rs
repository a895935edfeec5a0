// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use log::debug;

use cloudprint_core::{Context, Error, ProvideCredential, Result};

use crate::constants::{OAUTH2_SITE, OAUTH2_TOKEN_PATH};
use crate::credential::{AccessToken, OAuth2Credentials};
use crate::oauth2::helpers::{oauth2_post_form, token_from_response};
use crate::oauth2::types::TokenResponse;

/// RefreshTokenCredentialProvider exchanges a user's refresh token for a short-lived access token.
#[derive(Debug, Clone)]
pub struct RefreshTokenCredentialProvider {
    oauth2_credentials: OAuth2Credentials,
    token_url: String,
}

impl RefreshTokenCredentialProvider {
    /// Create a new RefreshTokenCredentialProvider.
    pub fn new(oauth2_credentials: OAuth2Credentials) -> Self {
        Self {
            oauth2_credentials,
            token_url: format!("{OAUTH2_SITE}{OAUTH2_TOKEN_PATH}"),
        }
    }

    /// Override the token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }
}

#[async_trait::async_trait]
impl ProvideCredential for RefreshTokenCredentialProvider {
    type Credential = AccessToken;

    async fn provide_credential(&self, ctx: &Context) -> Result<Self::Credential> {
        let creds = &self.oauth2_credentials;
        if creds.refresh_token.trim().is_empty() {
            return Err(Error::authentication("no refresh token configured"));
        }

        debug!("exchanging refresh token for access token");

        let resp: TokenResponse = oauth2_post_form(
            ctx,
            &self.token_url,
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", &creds.refresh_token),
                ("client_id", &creds.client_id),
                ("client_secret", &creds.client_secret),
            ],
        )
        .await?;

        token_from_response(&resp)
    }
}
