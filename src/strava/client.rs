use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{Activity, ActivityPage, StravaApp, Stream, StreamKey, TokenResponse};
use crate::{
    error::{Error, Result},
    http::{HttpRequest, HttpResponse, HttpTransport, RequestBody},
};

impl<T: HttpTransport> StravaApp<T> {
    /// Exchanges a refresh token for a fresh access token.
    pub fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        let form = vec![
            ("client_id".to_string(), self.client_id.clone()),
            ("client_secret".to_string(), self.client_secret.clone()),
            ("refresh_token".to_string(), refresh_token.to_string()),
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("f".to_string(), "json".to_string()),
        ];
        let request = HttpRequest::post(&self.settings.auth_url, RequestBody::Form(form));
        let token: TokenResponse = self.call(&request)?;
        info!("Got a Strava access token expiring at {}", token.expires_at);
        Ok(token)
    }

    /// Access token only, see [`StravaApp::refresh_token`].
    pub fn get_token(&self, refresh_token: &str) -> Result<String> {
        Ok(self.refresh_token(refresh_token)?.access_token)
    }

    /// One page of the authenticated athlete's activities.
    pub fn get_activities(&self, access_token: &str, page: &ActivityPage) -> Result<Vec<Activity>> {
        let mut request = HttpRequest::get(format!("{}/athlete/activities", self.settings.api_url))
            .bearer(access_token)
            .query("per_page", page.per_page)
            .query("page", page.page);
        if let Some(before) = page.before {
            request = request.query("before", before.timestamp());
        }
        if let Some(after) = page.after {
            request = request.query("after", after.timestamp());
        }
        let activities: Vec<Activity> = self.call(&request)?;
        debug!("Got {} activities on page {}", activities.len(), page.page);
        Ok(activities)
    }

    pub fn get_activity(&self, access_token: &str, activity_id: u64) -> Result<Activity> {
        let url = format!("{}/activities/{}", self.settings.api_url, activity_id);
        let request = HttpRequest::get(url).bearer(access_token);
        self.call(&request)
    }

    /// All streams listed in [`StreamKey::ALL`] for one activity.
    pub fn get_activity_streams(
        &self,
        access_token: &str,
        activity_id: u64,
    ) -> Result<Vec<Stream>> {
        let request = HttpRequest::get(format!(
            "{}/activities/{}/streams/{}",
            self.settings.api_url,
            activity_id,
            StreamKey::all_keys()
        ))
        .bearer(access_token);
        self.call(&request)
    }

    fn call<R: DeserializeOwned>(&self, request: &HttpRequest) -> Result<R> {
        let response = self.transport.send(request)?;
        decode(response, &request.url)
    }
}

fn decode<R: DeserializeOwned>(response: HttpResponse, url: &str) -> Result<R> {
    if !response.is_success() {
        debug!("Strava error body: {}", response.body);
        return Err(Error::Status {
            code: response.status,
            url: url.to_string(),
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}
