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

// Env values used to configure the client.
pub const CLOUDPRINT_CLIENT_ID: &str = "CLOUDPRINT_CLIENT_ID";
pub const CLOUDPRINT_CLIENT_SECRET: &str = "CLOUDPRINT_CLIENT_SECRET";
pub const CLOUDPRINT_REFRESH_TOKEN: &str = "CLOUDPRINT_REFRESH_TOKEN";
pub const CLOUDPRINT_CALLBACK_URL: &str = "CLOUDPRINT_CALLBACK_URL";
pub const CLOUDPRINT_ACCESS_TYPE: &str = "CLOUDPRINT_ACCESS_TYPE";
pub const CLOUDPRINT_SERVICE_ACCOUNT_CREDENTIALS: &str = "CLOUDPRINT_SERVICE_ACCOUNT_CREDENTIALS";
pub const CLOUDPRINT_SCOPE: &str = "CLOUDPRINT_SCOPE";

// The single permission the print service requires.
pub const CLOUDPRINT_SCOPE_URL: &str = "https://www.googleapis.com/auth/cloudprint";

// Delegated OAuth2 endpoints.
pub const OAUTH2_SITE: &str = "https://accounts.google.com";
pub const OAUTH2_AUTHORIZE_PATH: &str = "/o/oauth2/auth";
pub const OAUTH2_TOKEN_PATH: &str = "/o/oauth2/token";

// Signed-JWT grant endpoint; also the `aud` claim of the assertion.
pub const SERVICE_ACCOUNT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

// Lifetime requested for the signed assertion, in seconds.
pub const JWT_LIFETIME_SECS: u64 = 3600;
